//! Deterministic in-process backend for tests and offline runs

use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::core::models::{ProviderResult, TranslationCandidate};
use crate::providers::Provider;

/// Fixed word pairs the mock knows with high confidence.
const MOCK_DICT: &[(&str, &str, &str, &str)] = &[
    ("en", "es", "hello", "hola"),
    ("en", "es", "world", "mundo"),
    ("en", "fr", "hello", "bonjour"),
    ("en", "fr", "world", "monde"),
    // reverse pairs so back-translation round-trips
    ("es", "en", "hola", "hello"),
    ("es", "en", "mundo", "world"),
    ("fr", "en", "bonjour", "hello"),
    ("fr", "en", "monde", "world"),
];

/// Dictionary-backed provider with fully deterministic output.
#[derive(Debug, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    fn lookup(source_lang: &str, target_lang: &str, text: &str) -> Option<&'static str> {
        let needle = text.to_lowercase();
        MOCK_DICT
            .iter()
            .find(|(s, t, word, _)| *s == source_lang && *t == target_lang && *word == needle)
            .map(|(_, _, _, translation)| *translation)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        _timeout: Duration,
    ) -> ProviderResult {
        let start = Instant::now();
        let candidate = match Self::lookup(source_lang, target_lang, text) {
            Some(translation) => TranslationCandidate::new(translation, 0.9),
            None => TranslationCandidate::new(format!("{}-{}", text, target_lang), 0.5),
        };
        let mut result = ProviderResult::new(self.name(), text, source_lang, target_lang)
            .with_candidate(candidate);
        result.latency_ms = Some(start.elapsed().as_secs_f64() * 1000.0);
        result
    }
}
