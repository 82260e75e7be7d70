//! Core data models for translation aggregation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single translation proposal produced by a provider call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationCandidate {
    /// The translated word in the target language
    pub translation: String,
    /// Optional short usage note or disambiguation
    pub gloss: Option<String>,
    /// Provider's own estimate of correctness, in [0, 1]
    pub self_confidence: f64,
}

impl TranslationCandidate {
    pub fn new(translation: impl Into<String>, self_confidence: f64) -> Self {
        Self {
            translation: translation.into(),
            gloss: None,
            self_confidence: self_confidence.clamp(0.0, 1.0),
        }
    }

    pub fn with_gloss(mut self, gloss: impl Into<String>) -> Self {
        self.gloss = Some(gloss.into());
        self
    }
}

/// Outcome of one provider call, success or failure.
///
/// Exactly one of `candidate` / `error` is populated for a completed call.
/// `back_translation` is filled in by the orchestrator's back-translation
/// phase and is read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResult {
    pub provider: String,
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub candidate: Option<TranslationCandidate>,
    pub error: Option<String>,
    pub latency_ms: Option<f64>,
    pub back_translation: Option<String>,
}

impl ProviderResult {
    /// Create an empty result stamped with provider name and the language pair.
    pub fn new(
        provider: impl Into<String>,
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            candidate: None,
            error: None,
            latency_ms: None,
            back_translation: None,
        }
    }

    pub fn with_candidate(mut self, candidate: TranslationCandidate) -> Self {
        self.candidate = Some(candidate);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Forward translation text, if this call produced one.
    pub fn translation(&self) -> Option<&str> {
        self.candidate.as_ref().map(|c| c.translation.as_str())
    }
}

/// Everything known about one input word after processing completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordAggregate {
    pub word: String,
    pub source_lang: String,
    pub target_lang: String,
    /// One entry per participating provider, in collection order
    pub results: Vec<ProviderResult>,
    /// Cross-provider agreement score per provider
    pub agreement_scores: HashMap<String, f64>,
    /// Back-translation fidelity score per provider
    pub back_translation_scores: HashMap<String, f64>,
    pub final_choice_provider: Option<String>,
    pub final_translation: Option<String>,
    pub final_gloss: Option<String>,
    pub final_score: Option<f64>,
}

impl WordAggregate {
    pub fn new(
        word: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            results: Vec::new(),
            agreement_scores: HashMap::new(),
            back_translation_scores: HashMap::new(),
            final_choice_provider: None,
            final_translation: None,
            final_gloss: None,
            final_score: None,
        }
    }
}

/// Result for a whole batch, one aggregate per input word in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub words: Vec<WordAggregate>,
}
