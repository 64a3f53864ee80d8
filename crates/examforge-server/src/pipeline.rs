//! Request orchestration: the pipeline stages in order.
//!
//! Each request runs the stages strictly sequentially: normalize the
//! config, compile the prompt, call the provider, post-process the
//! returned document, and (for renders) drive the typesetting toolchain.
//! Nothing here retries; generation and compilation are attempted exactly
//! once per request.

use examforge_core::{RawGenerationConfig, compile_prompt, question_marker_count, strip_solutions};
use examforge_genai::QuestionProvider;
use examforge_typeset::{CompiledArtifact, TypesetDriver, timestamped_filename};

use crate::error::{ApiError, ApiResult};

/// Raw uncompiled source handed back by the export endpoint.
#[derive(Debug)]
pub struct SourceExport {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Upload path: config + source text through generation.
pub async fn generate_document(
    provider: &dyn QuestionProvider,
    raw_config: RawGenerationConfig,
    source_text: &str,
) -> ApiResult<String> {
    let config = raw_config.normalize()?;
    let prompt = compile_prompt(&config, source_text)?;

    tracing::info!(
        subject = %config.subject,
        difficulty = %config.difficulty,
        questions = config.target_question_count(),
        "requesting document generation"
    );

    let document = provider.generate(&prompt).await?;
    Ok(document)
}

/// Post-process a document for rendering, enforcing the question-count
/// invariant: solution removal must never consume a question section.
pub fn prepare_render(document: &str, include_solutions: bool) -> ApiResult<String> {
    let before = question_marker_count(document);
    let prepared = strip_solutions(document, include_solutions);
    let after = question_marker_count(&prepared);

    if after != before {
        tracing::error!(before, after, "solution removal changed question count");
        return Err(ApiError::QuestionCountMismatch { before, after });
    }

    Ok(prepared)
}

/// Render path: post-process, then compile to PDF.
pub async fn render_document(
    driver: &TypesetDriver,
    document: &str,
    include_solutions: bool,
) -> ApiResult<CompiledArtifact> {
    let prepared = prepare_render(document, include_solutions)?;
    let artifact = driver.compile(&prepared).await?;
    Ok(artifact)
}

/// Export path: hand back the raw source. Available regardless of
/// toolchain state — this is the fallback when compilation is not.
pub fn export_source(document: &str) -> ApiResult<SourceExport> {
    if document.trim().is_empty() {
        return Err(ApiError::BadRequest("no document provided".to_string()));
    }
    Ok(SourceExport {
        bytes: document.as_bytes().to_vec(),
        filename: timestamped_filename("tex"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use examforge_genai::{GenAiError, QuestionProvider};

    /// Canned provider: returns a fixed document or a fixed error.
    struct FakeProvider {
        response: Result<String, ()>,
    }

    #[async_trait]
    impl QuestionProvider for FakeProvider {
        async fn generate(&self, _prompt: &str) -> examforge_genai::Result<String> {
            match &self.response {
                Ok(document) => Ok(document.clone()),
                Err(()) => Err(GenAiError::Network("connection refused".to_string())),
            }
        }
    }

    fn sample_document() -> String {
        "\\documentclass{article}\n\\begin{document}\n\
         \\section*{Question 1}\nQ\n\\subsection*{Solution}\nA\n\
         \\section*{Question 2}\nQ\n\\subsection*{Solution}\nA\n\
         \\end{document}\n"
            .to_string()
    }

    #[tokio::test]
    async fn test_generate_document_happy_path() {
        let provider = FakeProvider {
            response: Ok(sample_document()),
        };
        let document =
            generate_document(&provider, RawGenerationConfig::default(), "source text")
                .await
                .unwrap();
        assert!(document.contains("\\section*{Question 1}"));
    }

    #[tokio::test]
    async fn test_generate_document_empty_source_rejected() {
        let provider = FakeProvider {
            response: Ok(sample_document()),
        };
        let err = generate_document(&provider, RawGenerationConfig::default(), "  ")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Core(examforge_core::CoreError::NoExtractableText)
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let provider = FakeProvider { response: Err(()) };
        let err = generate_document(&provider, RawGenerationConfig::default(), "source")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Provider(_)));
    }

    #[test]
    fn test_prepare_render_keeps_question_count() {
        let document = sample_document();
        let prepared = prepare_render(&document, false).unwrap();

        assert_eq!(question_marker_count(&prepared), 2);
        assert!(!prepared.contains("Solution"));
    }

    #[test]
    fn test_prepare_render_with_solutions_is_identity() {
        let document = sample_document();
        assert_eq!(prepare_render(&document, true).unwrap(), document);
    }

    #[test]
    fn test_export_source_round_trips_bytes() {
        let document = sample_document();
        let export = export_source(&document).unwrap();

        assert_eq!(export.bytes, document.as_bytes());
        assert!(export.filename.starts_with("exam_questions_"));
        assert!(export.filename.ends_with(".tex"));
    }

    #[test]
    fn test_export_source_rejects_empty_document() {
        assert!(matches!(
            export_source("  "),
            Err(ApiError::BadRequest(_))
        ));
    }
}
