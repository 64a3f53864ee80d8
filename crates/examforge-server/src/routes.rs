//! HTTP routes for the Examforge server.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use examforge_core::RawGenerationConfig;
use examforge_genai::QuestionProvider;
use examforge_typeset::TypesetDriver;

use crate::error::{ApiError, ApiResult};
use crate::{extract, pipeline};

/// Application state shared across handlers.
pub struct AppState {
    /// Generation provider (Gemini in production, fakes in tests).
    pub provider: Arc<dyn QuestionProvider>,
    /// Typesetting driver for the render endpoint.
    pub typeset: TypesetDriver,
}

/// Response body for `/api/upload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub document: String,
}

/// Request body for `/api/render`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub document: String,
    /// Defaults to a full paper with worked solutions.
    #[serde(default = "default_true")]
    pub include_solutions: bool,
}

/// Request body for `/api/export`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRequest {
    pub document: String,
}

fn default_true() -> bool {
    true
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/upload", post(upload_handler))
        .route("/api/render", post(render_handler))
        .route("/api/export", post(export_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Accept source material + generation config, return the generated
/// LaTeX document.
async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let upload = parse_upload(multipart).await?;

    let source_text = match (upload.text, upload.file) {
        (Some(text), _) => {
            if text.trim().is_empty() {
                return Err(examforge_core::CoreError::NoExtractableText.into());
            }
            text
        }
        (None, Some((filename, bytes))) => extract::extract_text(filename.as_deref(), &bytes)?,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "provide a 'file' or 'text' field".to_string(),
            ));
        }
    };

    let document =
        pipeline::generate_document(state.provider.as_ref(), upload.config, &source_text).await?;
    Ok(Json(UploadResponse { document }))
}

/// Compile a document to PDF, optionally removing solutions first.
async fn render_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RenderRequest>,
) -> ApiResult<Response> {
    if request.document.trim().is_empty() {
        return Err(ApiError::BadRequest("no document provided".to_string()));
    }

    let artifact = pipeline::render_document(
        &state.typeset,
        &request.document,
        request.include_solutions,
    )
    .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        ),
    ];
    Ok((headers, artifact.bytes).into_response())
}

/// Hand back the raw LaTeX source. Works even when pdflatex is absent.
async fn export_handler(Json(request): Json<ExportRequest>) -> ApiResult<Response> {
    let export = pipeline::export_source(&request.document)?;

    let headers = [
        (header::CONTENT_TYPE, "text/x-tex; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];
    Ok((headers, export.bytes).into_response())
}

/// Parsed multipart upload: source material plus config fields.
struct ParsedUpload {
    file: Option<(Option<String>, Vec<u8>)>,
    text: Option<String>,
    config: RawGenerationConfig,
}

async fn parse_upload(mut multipart: Multipart) -> ApiResult<ParsedUpload> {
    let mut file = None;
    let mut text = None;
    let mut config = RawGenerationConfig::default();
    let mut question_types: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                file = Some((filename, bytes.to_vec()));
            }
            "text" => text = Some(field_text(field).await?),
            "subject" => config.subject = Some(field_text(field).await?),
            "level" => config.level = Some(field_text(field).await?),
            "difficulty" => config.difficulty = Some(field_text(field).await?),
            "customInstructions" => config.custom_instructions = Some(field_text(field).await?),
            // Repeated field, one value per selected type.
            "questionTypes" => question_types.push(field_text(field).await?),
            "countsByType" => {
                config.counts_by_type = Some(parse_counts(&name, &field_text(field).await?)?);
            }
            "countsByMarks" => {
                config.counts_by_marks = Some(parse_counts(&name, &field_text(field).await?)?);
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    if !question_types.is_empty() {
        config.question_types = Some(question_types);
    }

    Ok(ParsedUpload { file, text, config })
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn parse_counts(
    field: &str,
    json: &str,
) -> ApiResult<std::collections::BTreeMap<String, i64>> {
    serde_json::from_str(json)
        .map_err(|e| ApiError::BadRequest(format!("{} is not a valid count map: {}", field, e)))
}
