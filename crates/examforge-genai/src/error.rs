//! Error types for the Gemini client.

use thiserror::Error;

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, GenAiError>;

/// Errors that can occur when calling the generation provider.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// Configuration error (missing API key, invalid settings).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network error (connection failed, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// API error returned by the server.
    #[error("API error [{code}] {status}: {message}")]
    Api {
        code: i32,
        message: String,
        status: String,
    },

    /// Parse error (failed to deserialize response, or no candidate text).
    #[error("parse error: {0}")]
    Parse(String),

    /// Content blocked by the provider's safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),
}

impl GenAiError {
    /// Whether a caller could reasonably retry this request.
    ///
    /// The pipeline itself never retries; this is advisory for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenAiError::Network(_) => true,
            GenAiError::Api { code, .. } => {
                // 429 = rate limit, 500+ = server errors
                *code == 429 || *code >= 500
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GenAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenAiError::Network(format!("request timeout: {err}"))
        } else if err.is_connect() {
            GenAiError::Network(format!("connection failed: {err}"))
        } else {
            GenAiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GenAiError {
    fn from(err: serde_json::Error) -> Self {
        GenAiError::Parse(err.to_string())
    }
}
