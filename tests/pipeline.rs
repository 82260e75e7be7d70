//! End-to-end pipeline tests over scripted in-test providers

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use ensemble_translator::core::config::{AppConfig, ScoringWeights};
use ensemble_translator::core::models::{ProviderResult, TranslationCandidate};
use ensemble_translator::core::orchestrator::{run_translation, translate_word};
use ensemble_translator::providers::mock::MockProvider;
use ensemble_translator::providers::Provider;

/// Deterministic backend returning a fixed translation with fixed
/// confidence; leaves `latency_ms` unset so runs compare byte-for-byte.
struct ScriptedProvider {
    name: String,
    translation: String,
    confidence: f64,
}

impl ScriptedProvider {
    fn new(name: &str, translation: &str, confidence: f64) -> Arc<dyn Provider> {
        Arc::new(Self {
            name: name.to_string(),
            translation: translation.to_string(),
            confidence,
        })
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        _timeout: Duration,
    ) -> ProviderResult {
        ProviderResult::new(self.name(), text, source_lang, target_lang).with_candidate(
            TranslationCandidate::new(self.translation.clone(), self.confidence),
        )
    }
}

/// Backend that always reports a failure.
struct FailingProvider {
    name: String,
}

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        _timeout: Duration,
    ) -> ProviderResult {
        ProviderResult::new(self.name(), text, source_lang, target_lang)
            .with_error("simulated outage")
    }
}

/// Backend whose call panics past its own error handling.
struct PanickingProvider;

#[async_trait]
impl Provider for PanickingProvider {
    fn name(&self) -> &str {
        "panicky"
    }

    async fn translate(
        &self,
        _text: &str,
        _source_lang: &str,
        _target_lang: &str,
        _timeout: Duration,
    ) -> ProviderResult {
        panic!("implementation bug");
    }
}

/// Backend that never completes within any reasonable timeout.
struct HangingProvider;

#[async_trait]
impl Provider for HangingProvider {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        _timeout: Duration,
    ) -> ProviderResult {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        ProviderResult::new(self.name(), text, source_lang, target_lang)
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        timeout_secs: 5,
        ..Default::default()
    }
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|w| w.to_string()).collect()
}

#[tokio::test]
async fn test_batch_preserves_word_count_and_order() {
    let providers = vec![ScriptedProvider::new("a", "hola", 0.8)];
    let input = words(&["hello", "world", "apple"]);
    let batch = run_translation(&test_config(), &providers, &input, "en", "es").await;
    assert_eq!(batch.words.len(), 3);
    let collected: Vec<&str> = batch.words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(collected, vec!["hello", "world", "apple"]);
}

#[tokio::test]
async fn test_deterministic_batches_are_identical() {
    let providers = vec![
        ScriptedProvider::new("a", "hola", 0.7),
        ScriptedProvider::new("b", "hola", 0.7),
        ScriptedProvider::new("c", "ola", 0.9),
    ];
    let input = words(&["hello", "world"]);
    let first = run_translation(&test_config(), &providers, &input, "en", "es").await;
    let second = run_translation(&test_config(), &providers, &input, "en", "es").await;
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    // tie-break winner included
    assert_eq!(
        first.words[0].final_choice_provider,
        second.words[0].final_choice_provider
    );
}

#[tokio::test]
async fn test_final_score_recomputable_from_stored_maps() {
    let config = test_config();
    let providers = vec![
        ScriptedProvider::new("a", "hola", 0.6),
        ScriptedProvider::new("b", "holla", 0.8),
        ScriptedProvider::new("c", "mundo", 0.3),
    ];
    let aggregate = translate_word(&config, &providers, "hello", "en", "es").await;

    let recomputed_max = aggregate
        .results
        .iter()
        .map(|r| {
            let conf = r.candidate.as_ref().map(|c| c.self_confidence).unwrap_or(0.0);
            let agree = aggregate.agreement_scores[&r.provider];
            let back = aggregate.back_translation_scores[&r.provider];
            (config.weights.self_confidence * conf
                + config.weights.agreement * agree
                + config.weights.back_translation * back)
                .clamp(0.0, 1.0)
        })
        .fold(f64::NEG_INFINITY, f64::max);
    assert!((aggregate.final_score.unwrap() - recomputed_max).abs() < 1e-12);

    // score-map keys are exactly the providers present in results
    assert_eq!(aggregate.agreement_scores.len(), aggregate.results.len());
    assert_eq!(
        aggregate.back_translation_scores.len(),
        aggregate.results.len()
    );
}

#[tokio::test]
async fn test_single_provider_end_to_end() {
    let config = test_config();
    let providers = vec![ScriptedProvider::new("solo", "hola", 0.9)];
    let aggregate = translate_word(&config, &providers, "hello", "en", "es").await;

    assert_eq!(aggregate.final_translation.as_deref(), Some("hola"));
    assert_eq!(aggregate.final_choice_provider.as_deref(), Some("solo"));
    // isolated provider: agreement and back-translation contribute nothing
    assert_eq!(aggregate.agreement_scores["solo"], 0.0);
    let expected = 0.9 * config.weights.self_confidence;
    assert!((aggregate.final_score.unwrap() - expected).abs() < 1e-12);
}

#[tokio::test]
async fn test_identical_translations_full_agreement() {
    let providers = vec![
        ScriptedProvider::new("a", "hola", 0.6),
        ScriptedProvider::new("b", "hola", 0.8),
    ];
    let aggregate = translate_word(&test_config(), &providers, "hello", "en", "es").await;
    assert_eq!(aggregate.agreement_scores["a"], 1.0);
    assert_eq!(aggregate.agreement_scores["b"], 1.0);
    // higher combined score wins
    assert_eq!(aggregate.final_choice_provider.as_deref(), Some("b"));
}

#[tokio::test]
async fn test_exact_tie_goes_to_first_collected() {
    let providers = vec![
        ScriptedProvider::new("first", "hola", 0.7),
        ScriptedProvider::new("second", "hola", 0.7),
    ];
    let aggregate = translate_word(&test_config(), &providers, "hello", "en", "es").await;
    assert_eq!(aggregate.final_choice_provider.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_failing_provider_never_beats_a_candidate() {
    let providers: Vec<Arc<dyn Provider>> = vec![
        Arc::new(FailingProvider {
            name: "broken".to_string(),
        }),
        ScriptedProvider::new("working", "hola", 0.4),
    ];
    let aggregate = translate_word(&test_config(), &providers, "hello", "en", "es").await;
    assert_eq!(aggregate.results.len(), 2);
    assert_eq!(aggregate.final_choice_provider.as_deref(), Some("working"));
    let broken = aggregate
        .results
        .iter()
        .find(|r| r.provider == "broken")
        .unwrap();
    assert!(broken.candidate.is_none());
    assert!(broken.error.is_some());
}

#[tokio::test]
async fn test_back_translation_disabled_leaves_fields_unset() {
    let config = test_config();
    assert!(!config.enable_back_translation);
    let providers: Vec<Arc<dyn Provider>> = vec![Arc::new(MockProvider::new())];
    let aggregate = translate_word(&config, &providers, "hello", "en", "es").await;
    assert!(aggregate.results.iter().all(|r| r.back_translation.is_none()));
    assert!(aggregate
        .back_translation_scores
        .values()
        .all(|&score| score == 0.0));
}

#[tokio::test]
async fn test_back_translation_round_trip_scores() {
    let config = AppConfig {
        enable_back_translation: true,
        ..test_config()
    };
    // mock knows hello<->hola both directions, so fidelity is perfect
    let providers: Vec<Arc<dyn Provider>> = vec![Arc::new(MockProvider::new())];
    let aggregate = translate_word(&config, &providers, "hello", "en", "es").await;
    assert_eq!(
        aggregate.results[0].back_translation.as_deref(),
        Some("hello")
    );
    assert_eq!(aggregate.back_translation_scores["mock"], 1.0);
    let expected =
        0.9 * config.weights.self_confidence + 1.0 * config.weights.back_translation;
    assert!((aggregate.final_score.unwrap() - expected).abs() < 1e-12);
}

#[tokio::test]
async fn test_empty_provider_list_tolerated() {
    let providers: Vec<Arc<dyn Provider>> = Vec::new();
    let batch =
        run_translation(&test_config(), &providers, &words(&["hello"]), "en", "es").await;
    assert_eq!(batch.words.len(), 1);
    assert!(batch.words[0].results.is_empty());
    assert!(batch.words[0].final_score.is_none());
    assert!(batch.words[0].final_choice_provider.is_none());
}

#[tokio::test]
async fn test_empty_word_list_yields_empty_batch() {
    let providers = vec![ScriptedProvider::new("a", "hola", 0.8)];
    let batch = run_translation(&test_config(), &providers, &[], "en", "es").await;
    assert!(batch.words.is_empty());
}

#[tokio::test]
async fn test_panicking_provider_becomes_synthetic_unknown() {
    let providers: Vec<Arc<dyn Provider>> = vec![
        Arc::new(PanickingProvider),
        ScriptedProvider::new("working", "hola", 0.8),
    ];
    let aggregate = translate_word(&test_config(), &providers, "hello", "en", "es").await;
    assert_eq!(aggregate.results.len(), 2);
    let synthetic = aggregate
        .results
        .iter()
        .find(|r| r.provider == "unknown")
        .unwrap();
    assert!(synthetic.error.is_some());
    assert_eq!(synthetic.text, "hello");
    // batch survives and still picks the healthy backend
    assert_eq!(aggregate.final_choice_provider.as_deref(), Some("working"));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_provider_resolves_to_timeout_error() {
    let config = AppConfig {
        timeout_secs: 1,
        ..Default::default()
    };
    let providers: Vec<Arc<dyn Provider>> = vec![
        Arc::new(HangingProvider),
        ScriptedProvider::new("working", "hola", 0.8),
    ];
    let aggregate = translate_word(&config, &providers, "hello", "en", "es").await;
    let hung = aggregate
        .results
        .iter()
        .find(|r| r.provider == "hanging")
        .unwrap();
    assert!(hung.error.as_deref().unwrap().contains("timed out"));
    assert_eq!(aggregate.final_choice_provider.as_deref(), Some("working"));
}

#[tokio::test]
async fn test_weight_normalization_applies_to_scoring() {
    let config = AppConfig {
        weights: ScoringWeights {
            self_confidence: 0.0,
            agreement: 0.0,
            back_translation: 0.0,
        }
        .normalized(),
        ..test_config()
    };
    let providers = vec![ScriptedProvider::new("solo", "hola", 0.9)];
    let aggregate = translate_word(&config, &providers, "hello", "en", "es").await;
    // equal-thirds fallback, not a divide-by-zero
    assert!((aggregate.final_score.unwrap() - 0.9 / 3.0).abs() < 1e-12);
}
