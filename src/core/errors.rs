//! Custom error types for the translation pipeline

use thiserror::Error;

/// Errors surfaced outside the per-provider boundary.
///
/// Provider-call failures never show up here; they are captured into
/// `ProviderResult.error` so one failing backend cannot abort a batch.
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Caller-input error (no words, no providers)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslatorError>;
