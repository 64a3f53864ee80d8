//! Error types for the Examforge server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use examforge_core::CoreError;
use examforge_genai::GenAiError;
use examforge_typeset::TypesetError;

/// Result type for request handling.
pub type ApiResult<T> = Result<T, ApiError>;

/// Request-level error, mapped onto an HTTP status and a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Validation failure in the pure pipeline stages.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Generation provider failure.
    #[error("generation provider error: {0}")]
    Provider(#[from] GenAiError),

    /// Typesetting failure.
    #[error(transparent)]
    Typeset(#[from] TypesetError),

    /// Upload was not a text format the boundary can decode.
    #[error("unsupported upload format: {0}")]
    UnsupportedFormat(String),

    /// Malformed request body or multipart payload.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// Solution removal changed the number of question sections; the
    /// document is not served.
    #[error(
        "solution removal dropped question sections ({before} before, {after} after); \
         refusing to serve the document"
    )]
    QuestionCountMismatch { before: usize, after: usize },

    /// IO fault at the server boundary.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::InvalidConfig(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::NoExtractableText) => StatusCode::BAD_REQUEST,
            ApiError::Provider(GenAiError::Configuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
            ApiError::Typeset(TypesetError::MalformedDocument(_)) => StatusCode::BAD_REQUEST,
            ApiError::Typeset(TypesetError::ToolchainUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Typeset(TypesetError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Typeset(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::QuestionCountMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message. Process and provider output never leaks beyond
    /// the bounded excerpts already embedded in the source errors.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Typeset(TypesetError::ToolchainUnavailable { .. }) => {
                "PDF compilation is not available on this host (pdflatex is not \
                 installed). Download the LaTeX source instead."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::warn!(%status, error = %self, "request rejected");
        }

        let body = Json(serde_json::json!({ "error": self.user_message() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::Core(CoreError::InvalidConfig("bad".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::Typeset(TypesetError::ToolchainUnavailable {
            command: "pdflatex".to_string(),
        });
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.user_message().contains("Download the LaTeX source"));

        let err = ApiError::Typeset(TypesetError::Timeout { seconds: 30 });
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
