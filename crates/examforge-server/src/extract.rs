//! Text extraction for uploaded sources.
//!
//! The upload boundary accepts plain-text study material (`.txt`, `.md`,
//! `.tex`) or a raw text field; richer formats belong to an upstream
//! extraction service and are rejected here with a clear error.

use examforge_core::CoreError;

use crate::error::{ApiError, ApiResult};

const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "tex"];

/// Decode an uploaded file into source text.
///
/// # Errors
///
/// - [`ApiError::UnsupportedFormat`] for non-text extensions or
///   non-UTF-8 content
/// - [`CoreError::NoExtractableText`] when the decoded text is empty
pub fn extract_text(filename: Option<&str>, bytes: &[u8]) -> ApiResult<String> {
    if let Some(extension) = filename.and_then(file_extension) {
        if !TEXT_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ApiError::UnsupportedFormat(format!(
                ".{} (upload plain text: .txt, .md, or .tex)",
                extension
            )));
        }
    }

    let text = std::str::from_utf8(bytes).map_err(|_| {
        ApiError::UnsupportedFormat("file is not valid UTF-8 text".to_string())
    })?;

    if text.trim().is_empty() {
        return Err(CoreError::NoExtractableText.into());
    }

    Ok(text.to_string())
}

fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
}
