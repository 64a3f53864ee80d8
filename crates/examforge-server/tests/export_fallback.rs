//! Source export must remain available when PDF compilation is not.

use std::time::Duration;

use examforge_server::ApiError;
use examforge_server::pipeline;
use examforge_typeset::{TypesetConfig, TypesetDriver, TypesetError};
use tempfile::TempDir;

const DOCUMENT: &str = "\\documentclass{article}\n\\begin{document}\n\
                        \\section*{Question 1}\nState Newton's second law.\n\
                        \\end{document}\n";

#[tokio::test]
async fn export_succeeds_when_toolchain_is_missing() {
    let base = TempDir::new().unwrap();
    let driver = TypesetDriver::new(TypesetConfig {
        compiler: base
            .path()
            .join("missing-pdflatex")
            .to_string_lossy()
            .into_owned(),
        scratch_root: base.path().join("scratch"),
        debug_dir: base.path().join("debug"),
        timeout: Duration::from_secs(5),
    });

    let err = pipeline::render_document(&driver, DOCUMENT, true)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Typeset(TypesetError::ToolchainUnavailable { .. })
    ));

    // Same document, no toolchain involved: the fallback download works.
    let export = pipeline::export_source(DOCUMENT).unwrap();
    assert_eq!(export.bytes, DOCUMENT.as_bytes());
    assert!(export.filename.ends_with(".tex"));
}
