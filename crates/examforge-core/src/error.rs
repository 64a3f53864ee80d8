//! Error types for examforge-core.

use thiserror::Error;

/// Result type for core pipeline operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the pure pipeline stages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The generation configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The uploaded source contained no usable text.
    #[error("no extractable text in source")]
    NoExtractableText,
}
