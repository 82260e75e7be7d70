//! Main entry point for the Ensemble Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod output;
mod providers;

use cli::commands::{handle_translate, TranslateOptions};

/// Translate words with multiple providers and aggregate by confidence scores
#[derive(Parser, Debug)]
#[command(name = "ensemble-translator", version, about, long_about = None)]
struct Args {
    /// Words to translate
    words: Vec<String>,

    /// Source language code (defaults to SOURCE_LANG env var or "en")
    #[arg(long)]
    source: Option<String>,

    /// Target language code (defaults to TARGET_LANG env var or "es")
    #[arg(long)]
    target: Option<String>,

    /// Providers to use, comma-separated (default: mock)
    #[arg(long)]
    providers: Option<String>,

    /// File with one word per line
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Path to write JSON output
    #[arg(long)]
    output_json: Option<PathBuf>,

    /// Path to write CSV output
    #[arg(long)]
    output_csv: Option<PathBuf>,

    /// Enable back-translation scoring
    #[arg(long)]
    back_translate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ensemble_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    handle_translate(TranslateOptions {
        words: args.words,
        input_file: args.input_file,
        source: args.source,
        target: args.target,
        providers: args.providers,
        output_json: args.output_json,
        output_csv: args.output_csv,
        back_translate: args.back_translate,
    })
    .await
}
