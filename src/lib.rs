//! Ensemble Translator - multi-provider word translation with weighted
//! score aggregation
//!
//! Fans each word out to a set of pluggable translation providers
//! concurrently, optionally back-translates every candidate with the same
//! provider, then reduces the results to one choice per word using a
//! weighted combination of self-confidence, cross-provider agreement, and
//! back-translation fidelity.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod output;
pub mod providers;

// Re-export key types for convenience
pub use crate::core::{
    config::{AppConfig, ScoringWeights},
    errors::TranslatorError,
    models::{BatchResult, ProviderResult, TranslationCandidate, WordAggregate},
    orchestrator::{run_translation, translate_word},
};

pub use crate::providers::{make_providers, Provider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
