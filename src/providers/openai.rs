//! OpenAI chat-completions backend

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::core::models::{ProviderResult, TranslationCandidate};
use crate::providers::{parse_candidate_json, Provider};

const API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You are a precise translator. Translate the given word from {source} to {target}. \
     Return a concise JSON with keys: translation (string), gloss (optional string), confidence (0..1 float).";

/// LLM-backed provider using the chat-completions API in JSON mode.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
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
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": text}
            ],
            "response_format": {"type": "json_object"}
        });

        let response = self
            .client
            .post(API_ENDPOINT)
            .timeout(timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
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
        let content = json["choices"]
            .get(0)
            .and_then(|c| c["message"]["content"].as_str())
            .unwrap_or("{}");
        parse_candidate_json(content)
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
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
                debug!("openai translated {:?} -> {:?}", text, candidate.translation);
                result.candidate = Some(candidate);
            }
            Err(message) => result.error = Some(message),
        }
        result.latency_ms = Some(start.elapsed().as_secs_f64() * 1000.0);
        result
    }
}
