//! Render command implementation.
//!
//! Compiles a generated `.tex` document to PDF with the same driver the
//! server uses.

use std::path::{Path, PathBuf};

use examforge_server::{ApiError, pipeline};
use examforge_typeset::{TypesetConfig, TypesetDriver, TypesetError};

use crate::colors;

pub async fn execute(
    document_path: &str,
    output: Option<&str>,
    include_solutions: bool,
) -> anyhow::Result<()> {
    let path = Path::new(document_path);
    if !path.exists() {
        anyhow::bail!("Document not found: {}", document_path);
    }

    let document = std::fs::read_to_string(path)?;
    let driver = TypesetDriver::new(TypesetConfig::default());

    if !include_solutions {
        println!(
            "{}  ◆ Removing worked solutions before compiling{}",
            colors::YELLOW,
            colors::RESET
        );
    }

    let artifact = match pipeline::render_document(&driver, &document, include_solutions).await {
        Ok(artifact) => artifact,
        Err(ApiError::Typeset(TypesetError::ToolchainUnavailable { command })) => {
            anyhow::bail!(
                "'{}' is not installed; the .tex document can still be compiled elsewhere",
                command
            );
        }
        Err(e) => return Err(e.into()),
    };

    let output_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| path.with_extension("pdf"));
    std::fs::write(&output_path, &artifact.bytes)?;

    println!(
        "{}✓{} Wrote {} ({} bytes)",
        colors::GREEN,
        colors::RESET,
        output_path.display(),
        artifact.bytes.len()
    );

    Ok(())
}
