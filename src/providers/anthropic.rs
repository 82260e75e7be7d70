//! Anthropic messages backend

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::core::models::{ProviderResult, TranslationCandidate};
use crate::providers::{parse_candidate_json, Provider};

const API_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "You are a precise translator. Translate the given word from {source} to {target}. \
     Reply ONLY in strict JSON with keys: translation (string), gloss (optional string), confidence (float 0..1).";

/// LLM-backed provider using the messages API with a strict-JSON prompt.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    async fn request_candidate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        timeout: Duration,
    ) -> Result<TranslationCandidate, String> {
        let system = SYSTEM_PROMPT
            .replace("{source}", source_lang)
            .replace("{target}", target_lang);
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": 256,
            "system": system,
            "messages": [{"role": "user", "content": text}]
        });

        let response = self
            .client
            .post(API_ENDPOINT)
            .timeout(timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(format!("API error {}: {}", status.as_u16(), detail));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("invalid response body: {}", e))?;
        let content: String = json["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter(|b| b["type"].as_str() == Some("text"))
                    .filter_map(|b| b["text"].as_str())
                    .collect()
            })
            .unwrap_or_default();
        let content = if content.is_empty() { "{}" } else { &content };
        parse_candidate_json(content)
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        timeout: Duration,
    ) -> ProviderResult {
        let start = Instant::now();
        let mut result = ProviderResult::new(self.name(), text, source_lang, target_lang);
        match self
            .request_candidate(text, source_lang, target_lang, timeout)
            .await
        {
            Ok(candidate) => {
                debug!(
                    "anthropic translated {:?} -> {:?}",
                    text, candidate.translation
                );
                result.candidate = Some(candidate);
            }
            Err(message) => result.error = Some(message),
        }
        result.latency_ms = Some(start.elapsed().as_secs_f64() * 1000.0);
        result
    }
}
