//! Gemini client for Examforge question generation.
//!
//! The pipeline only depends on the [`QuestionProvider`] trait; the
//! [`GeminiClient`] is the production implementation, calling the
//! `generateContent` REST endpoint. Requests are attempted exactly once —
//! retry policy, if any, belongs to callers ([`GenAiError::is_retryable`]
//! tells them which failures are worth it).

mod client;
mod error;
mod types;

pub use client::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig};
pub use error::{GenAiError, Result};
pub use types::{GenerateContentRequest, GenerateContentResponse};

use async_trait::async_trait;

/// The generation provider seam: one prompt in, one LaTeX document out.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Generate a document from a compiled instruction.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl QuestionProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt).await
    }
}
