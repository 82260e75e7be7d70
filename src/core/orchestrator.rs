//! Batch orchestration: concurrent fan-out per word, optional
//! back-translation, then scoring and selection.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::config::AppConfig;
use crate::core::models::{BatchResult, ProviderResult, WordAggregate};
use crate::core::scoring::{
    apply_final_scores, compute_agreement_scores, compute_back_translation_scores,
};
use crate::providers::Provider;

/// Name stamped on synthetic results when a provider call crashes past its
/// own error handling.
const UNKNOWN_PROVIDER: &str = "unknown";

/// Issue one concurrent `translate` call per provider for a single word.
///
/// Calls are gated by a semaphore of `min(provider_count, max_workers)`
/// permits and individually wrapped in a timeout so a hung backend resolves
/// to an error result instead of stalling the batch. A task that panics is
/// converted to a synthetic `"unknown"` error result. Collection order is
/// the provider configuration order; no result is dropped.
async fn fan_out(
    config: &AppConfig,
    providers: &[Arc<dyn Provider>],
    word: &str,
    source_lang: &str,
    target_lang: &str,
) -> Vec<ProviderResult> {
    if providers.is_empty() {
        return Vec::new();
    }

    let limit = providers.len().min(config.max_workers);
    let semaphore = Arc::new(Semaphore::new(limit));
    let timeout = Duration::from_secs(config.timeout_secs);

    let handles: Vec<JoinHandle<ProviderResult>> = providers
        .iter()
        .map(|provider| {
            let provider = Arc::clone(provider);
            let semaphore = Arc::clone(&semaphore);
            let word = word.to_string();
            let source = source_lang.to_string();
            let target = target_lang.to_string();
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.unwrap();
                match tokio::time::timeout(
                    timeout,
                    provider.translate(&word, &source, &target, timeout),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => ProviderResult::new(provider.name(), &word, &source, &target)
                        .with_error(format!("timed out after {}s", timeout.as_secs())),
                }
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for outcome in join_all(handles).await {
        match outcome {
            Ok(result) => {
                debug!(
                    "provider {} finished for {:?} (error: {})",
                    result.provider,
                    result.text,
                    result.error.is_some()
                );
                results.push(result);
            }
            Err(join_error) => {
                warn!("provider task crashed: {}", join_error);
                results.push(
                    ProviderResult::new(UNKNOWN_PROVIDER, word, source_lang, target_lang)
                        .with_error(join_error.to_string()),
                );
            }
        }
    }
    results
}

/// Re-translate each forward translation back to the source language with
/// the same provider, returning a provider-name → back-translation map.
///
/// Failures of any kind (error result, panic, timeout, missing candidate)
/// simply leave a provider out of the map; partial coverage is expected.
async fn collect_back_translations(
    config: &AppConfig,
    providers: &[Arc<dyn Provider>],
    results: &[ProviderResult],
    source_lang: &str,
    target_lang: &str,
) -> HashMap<String, String> {
    let limit = providers.len().min(config.max_workers).max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let timeout = Duration::from_secs(config.timeout_secs);

    let handles: Vec<JoinHandle<(String, Option<String>)>> = results
        .iter()
        .filter(|result| result.translation().is_some_and(|t| !t.is_empty()))
        .filter_map(|result| {
            // second call goes to the same provider, looked up by name
            let provider = providers.iter().find(|p| p.name() == result.provider)?;
            let provider = Arc::clone(provider);
            let semaphore = Arc::clone(&semaphore);
            let name = result.provider.clone();
            let forward = result.translation().unwrap_or_default().to_string();
            // source/target swapped: translate the output back
            let source = target_lang.to_string();
            let target = source_lang.to_string();
            Some(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.unwrap();
                let back = tokio::time::timeout(
                    timeout,
                    provider.translate(&forward, &source, &target, timeout),
                )
                .await
                .ok()
                .and_then(|r| r.candidate.map(|c| c.translation));
                (name, back)
            }))
        })
        .collect();

    let mut back_translations = HashMap::new();
    for outcome in join_all(handles).await {
        match outcome {
            Ok((name, Some(back))) => {
                back_translations.insert(name, back);
            }
            Ok((_, None)) => {}
            Err(join_error) => debug!("back-translation task crashed: {}", join_error),
        }
    }
    back_translations
}

/// Run the full pipeline for one word: fan-out, optional back-translation
/// merge, scoring, and final selection.
pub async fn translate_word(
    config: &AppConfig,
    providers: &[Arc<dyn Provider>],
    word: &str,
    source_lang: &str,
    target_lang: &str,
) -> WordAggregate {
    let mut aggregate = WordAggregate::new(word, source_lang, target_lang);
    aggregate.results = fan_out(config, providers, word, source_lang, target_lang).await;

    if config.enable_back_translation && !aggregate.results.is_empty() {
        let back_translations = collect_back_translations(
            config,
            providers,
            &aggregate.results,
            source_lang,
            target_lang,
        )
        .await;
        // merge the immutable map into a fresh results list
        aggregate.results = aggregate
            .results
            .into_iter()
            .map(|mut result| {
                if let Some(back) = back_translations.get(&result.provider) {
                    result.back_translation = Some(back.clone());
                }
                result
            })
            .collect();
    }

    aggregate.agreement_scores = compute_agreement_scores(&aggregate.results);
    aggregate.back_translation_scores = compute_back_translation_scores(word, &aggregate.results);
    apply_final_scores(&config.weights, &mut aggregate);
    aggregate
}

/// Translate a batch of words, one aggregate per word in input order.
///
/// Words are trimmed and empty entries dropped before processing. Words run
/// strictly sequentially; within a word, provider calls are concurrent.
pub async fn run_translation(
    config: &AppConfig,
    providers: &[Arc<dyn Provider>],
    words: &[String],
    source_lang: &str,
    target_lang: &str,
) -> BatchResult {
    let mut aggregates = Vec::new();
    for word in words.iter().map(|w| w.trim()).filter(|w| !w.is_empty()) {
        let aggregate = translate_word(config, providers, word, source_lang, target_lang).await;
        debug!(
            "word {:?} -> {:?} (score {:?})",
            word, aggregate.final_translation, aggregate.final_score
        );
        aggregates.push(aggregate);
    }
    BatchResult { words: aggregates }
}
