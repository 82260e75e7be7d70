//! Pluggable translation backends
//!
//! A provider never fails past its boundary: network, auth, and parse
//! failures are captured into `ProviderResult.error` so one broken backend
//! cannot abort a batch.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::core::config::AppConfig;
use crate::core::models::ProviderResult;

pub mod anthropic;
pub mod mock;
pub mod openai;

/// A pluggable translation backend.
///
/// Implementations must be safe for concurrent invocation; the only shared
/// state is read-only credentials and the model identifier.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable provider name, stamped on every result
    fn name(&self) -> &str;

    /// Translate `text` between the given language pair.
    ///
    /// Always resolves to a `ProviderResult` stamped with provider name,
    /// input text, and the language pair; failures land in the `error`
    /// field, never in a propagated error.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        timeout: Duration,
    ) -> ProviderResult;
}

/// Build provider instances by name.
///
/// Unknown names and live backends without credentials are skipped with a
/// warning rather than failing construction.
pub fn make_providers(names: &[String], config: &AppConfig) -> Vec<Arc<dyn Provider>> {
    let mut providers: Vec<Arc<dyn Provider>> = Vec::new();
    for name in names {
        match name.trim().to_lowercase().as_str() {
            "mock" => providers.push(Arc::new(mock::MockProvider::new())),
            "openai" => match &config.openai_api_key {
                Some(key) => providers.push(Arc::new(openai::OpenAiProvider::new(
                    key.clone(),
                    config.openai_model.clone(),
                ))),
                None => warn!("Skipping openai provider: OPENAI_API_KEY not set"),
            },
            "anthropic" => match &config.anthropic_api_key {
                Some(key) => providers.push(Arc::new(anthropic::AnthropicProvider::new(
                    key.clone(),
                    config.anthropic_model.clone(),
                ))),
                None => warn!("Skipping anthropic provider: ANTHROPIC_API_KEY not set"),
            },
            other => warn!("Unknown provider name: {}", other),
        }
    }
    providers
}

/// Parse the `{translation, gloss, confidence}` JSON object the LLM
/// backends are prompted to return.
pub(crate) fn parse_candidate_json(
    content: &str,
) -> Result<crate::core::models::TranslationCandidate, String> {
    let data: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON reply: {}", e))?;
    let translation = data["translation"]
        .as_str()
        .or_else(|| data["translated"].as_str())
        .unwrap_or("")
        .to_string();
    let confidence = data["confidence"].as_f64().unwrap_or(0.6);
    let mut candidate = crate::core::models::TranslationCandidate::new(translation, confidence);
    if let Some(gloss) = data["gloss"].as_str() {
        candidate = candidate.with_gloss(gloss);
    }
    Ok(candidate)
}
