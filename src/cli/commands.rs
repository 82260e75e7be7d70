//! CLI command handler

use std::path::PathBuf;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::errors::TranslatorError;
use crate::core::models::BatchResult;
use crate::core::orchestrator::translate_word;
use crate::output;
use crate::providers::make_providers;

/// Options for one translation run, resolved from CLI arguments.
#[derive(Debug)]
pub struct TranslateOptions {
    pub words: Vec<String>,
    pub input_file: Option<PathBuf>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub providers: Option<String>,
    pub output_json: Option<PathBuf>,
    pub output_csv: Option<PathBuf>,
    pub back_translate: bool,
}

/// Run a translation batch and write any requested outputs.
pub async fn handle_translate(options: TranslateOptions) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let mut config = AppConfig::from_env()?;
    if options.back_translate {
        config.enable_back_translation = true;
    }

    let source = options.source.unwrap_or_else(|| config.source_lang.clone());
    let target = options.target.unwrap_or_else(|| config.target_lang.clone());

    let provider_names: Vec<String> = options
        .providers
        .as_deref()
        .unwrap_or("mock")
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let providers = make_providers(&provider_names, &config);
    if providers.is_empty() {
        return Err(TranslatorError::InvalidInput {
            message: "No providers available. Check API keys or provider names.".to_string(),
        }
        .into());
    }

    let mut words = options.words;
    if let Some(path) = &options.input_file {
        let content = std::fs::read_to_string(path)?;
        words.extend(
            content
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty()),
        );
    }
    words.retain(|word| !word.trim().is_empty());
    if words.is_empty() {
        return Err(TranslatorError::InvalidInput {
            message: "No words provided. Use positional arguments or --input-file.".to_string(),
        }
        .into());
    }

    info!(
        "Translating {} words {} -> {} with providers: {:?}",
        words.len(),
        source,
        target,
        providers.iter().map(|p| p.name()).collect::<Vec<_>>()
    );

    let pb = ProgressBar::new(words.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut batch = BatchResult { words: Vec::new() };
    for word in &words {
        pb.set_message(format!("Translating: {}", word));
        let aggregate = translate_word(&config, &providers, word.trim(), &source, &target).await;
        batch.words.push(aggregate);
        pb.inc(1);
    }
    pb.finish_with_message("Completed");

    for aggregate in &batch.words {
        println!(
            "{} -> {} (by {}, score={})",
            aggregate.word,
            aggregate.final_translation.as_deref().unwrap_or("<none>"),
            aggregate
                .final_choice_provider
                .as_deref()
                .unwrap_or("<none>"),
            aggregate
                .final_score
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "n/a".to_string()),
        );
    }

    if let Some(path) = &options.output_json {
        output::write_json(path, &batch)?;
        println!("JSON output written to {}", path.display());
    }
    if let Some(path) = &options.output_csv {
        output::write_csv(path, &batch)?;
        println!("CSV output written to {}", path.display());
    }

    info!("Completed {} words in {:?}", batch.words.len(), start_time.elapsed());

    Ok(())
}
