//! Error types for the typesetting driver.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for typesetting operations.
pub type Result<T> = std::result::Result<T, TypesetError>;

/// Errors that can occur while compiling a document.
#[derive(Debug, Error)]
pub enum TypesetError {
    /// The document is missing a structural marker; compilation is not
    /// attempted.
    #[error("malformed document: missing {0}")]
    MalformedDocument(&'static str),

    /// The compiler executable is not installed on this host. Callers
    /// should offer the uncompiled source for download instead.
    #[error("LaTeX toolchain unavailable: '{command}' not found on this host")]
    ToolchainUnavailable { command: String },

    /// The compiler ran past its wall-clock budget and was killed.
    /// Always fatal, even if a partial artifact exists.
    #[error("compilation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The compiler finished but produced no output artifact.
    #[error("compilation failed: {summary}")]
    CompilationFailed {
        /// Bounded excerpt of the compiler's diagnostic log.
        summary: String,
        /// Where the failed input was persisted for post-mortem
        /// inspection, when that copy could be written.
        debug_path: Option<PathBuf>,
    },

    /// IO fault while managing compilation intermediates.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
