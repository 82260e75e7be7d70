//! Configuration management

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::errors::TranslatorError;

/// Weights for the three scoring signals.
///
/// Stored pre-normalized in `AppConfig`; `normalized()` rescales so the
/// weights sum to 1.0, falling back to equal thirds when the configured
/// sum is not positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub self_confidence: f64,
    pub agreement: f64,
    pub back_translation: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            self_confidence: 0.5,
            agreement: 0.4,
            back_translation: 0.1,
        }
    }
}

impl ScoringWeights {
    /// Rescale the weights to sum to 1.0.
    pub fn normalized(&self) -> Self {
        let total = self.self_confidence + self.agreement + self.back_translation;
        if total <= 0.0 {
            return Self {
                self_confidence: 1.0 / 3.0,
                agreement: 1.0 / 3.0,
                back_translation: 1.0 / 3.0,
            };
        }
        Self {
            self_confidence: self.self_confidence / total,
            agreement: self.agreement / total,
            back_translation: self.back_translation / total,
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Normalized scoring weights
    pub weights: ScoringWeights,
    pub enable_back_translation: bool,
    /// Ceiling on concurrent provider calls per phase
    pub max_workers: usize,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    pub source_lang: String,
    pub target_lang: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default().normalized(),
            enable_back_translation: false,
            max_workers: 8,
            timeout_secs: 60,
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            anthropic_api_key: None,
            anthropic_model: "claude-3-5-sonnet-20240620".to_string(),
        }
    }
}

/// Parse a boolean-ish environment flag ("1", "true", "yes", "on").
fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let weights = ScoringWeights {
            self_confidence: std::env::var("WEIGHT_SELF_CONFIDENCE")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse::<f64>()?,
            agreement: std::env::var("WEIGHT_AGREEMENT")
                .unwrap_or_else(|_| "0.4".to_string())
                .parse::<f64>()?,
            back_translation: std::env::var("WEIGHT_BACK_TRANSLATION")
                .unwrap_or_else(|_| "0.1".to_string())
                .parse::<f64>()?,
        }
        .normalized();

        let max_workers = std::env::var("MAX_WORKERS")
            .unwrap_or_else(|_| "8".to_string())
            .parse::<usize>()?;

        let timeout_secs = std::env::var("TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()?;

        let config = Self {
            weights,
            enable_back_translation: env_flag("ENABLE_BACK_TRANSLATION", false),
            max_workers,
            timeout_secs,
            source_lang: std::env::var("SOURCE_LANG").unwrap_or_else(|_| "en".to_string()),
            target_lang: std::env::var("TARGET_LANG").unwrap_or_else(|_| "es".to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            anthropic_model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-3-5-sonnet-20240620".to_string()),
        };

        config.validate()?;
        info!(
            "Loaded config: {} workers, {}s timeout, back-translation {}",
            config.max_workers,
            config.timeout_secs,
            if config.enable_back_translation { "on" } else { "off" }
        );

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), TranslatorError> {
        if self.max_workers == 0 {
            return Err(TranslatorError::ConfigError {
                message: "MAX_WORKERS must be greater than 0".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(TranslatorError::ConfigError {
                message: "TIMEOUT_SECONDS must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
