//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use crate::error::{GenAiError, Result};
use crate::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Default model, matching what the upload pipeline was tuned against.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Provider requests are long-running; this bounds a single HTTP call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Maximum number of bytes of an unparseable error body surfaced to callers.
const ERROR_EXCERPT_LEN: usize = 300;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key (`key=` query parameter).
    pub api_key: String,
    /// Model name, e.g. `gemini-2.0-flash-exp`.
    pub model: String,
    /// API base URL, overridable for tests.
    pub base_url: String,
}

impl GeminiConfig {
    /// Build a config with the default model and base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the API key from `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the variable is unset or empty,
    /// so a misconfigured deployment fails before any request is made.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(GenAiError::Configuration(format!(
                "{} is not set",
                API_KEY_ENV
            ))),
        }
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL (used by tests to point at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for the Gemini REST API.
#[derive(Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty API key, or a network
    /// error if the underlying HTTP client cannot be constructed.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GenAiError::Configuration("API key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenAiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Call `generateContent` with a single-turn prompt and return the
    /// first candidate's text, with any markdown code fence removed.
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        tracing::debug!(model = %self.config.model, "sending generateContent request");

        let response = self
            .http
            .post(&url)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(text) = parsed.first_candidate_text() {
            return Ok(strip_markdown_fence(&text));
        }

        // No candidate text: distinguish a safety block from a bad payload.
        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone())
        {
            return Err(GenAiError::ContentBlocked(reason));
        }
        Err(GenAiError::Parse(
            "response contained no candidate text".to_string(),
        ))
    }
}

fn parse_api_error(status: u16, body: &str) -> GenAiError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(envelope) => GenAiError::Api {
            code: envelope.error.code,
            message: envelope.error.message,
            status: envelope.error.status,
        },
        Err(_) => {
            let excerpt: String = body.chars().take(ERROR_EXCERPT_LEN).collect();
            GenAiError::Api {
                code: status as i32,
                message: excerpt,
                status: String::new(),
            }
        }
    }
}

/// Models frequently wrap the LaTeX body in a ```latex ... ``` fence even
/// when told not to; tolerate and remove a single outer fence.
fn strip_markdown_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return text.to_string();
    }

    let Some(first_newline) = trimmed.find('\n') else {
        return text.to_string();
    };
    let inner = &trimmed[first_newline + 1..];
    if let Some(stripped) = inner.trim_end().strip_suffix("```") {
        // keep one trailing newline for the document
        return format!("{}\n", stripped.trim_end());
    }
    text.to_string()
}
