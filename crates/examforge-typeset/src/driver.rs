//! Bounded pdflatex invocation.
//!
//! The compiler's exit status is deliberately not the success criterion:
//! pdflatex routinely exits non-zero on recoverable warnings. The single
//! source of truth is whether the expected output artifact exists in the
//! work directory after the process ends.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use uuid::Uuid;

use crate::error::{Result, TypesetError};
use crate::workdir::WorkDir;

/// Name of the input file inside the work dir.
pub const INPUT_FILE: &str = "questions.tex";

/// Expected output artifact name (derived from the input name by pdflatex).
const OUTPUT_FILE: &str = "questions.pdf";

/// Diagnostic log written by pdflatex alongside the output.
const LOG_FILE: &str = "questions.log";

/// How many diagnostic lines are surfaced to callers.
const MAX_LOG_LINES: usize = 3;

/// Wall-clock budget for one compiler run.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct TypesetConfig {
    /// Compiler executable, resolved via `PATH` unless absolute.
    pub compiler: String,
    /// Base directory for per-invocation work dirs.
    pub scratch_root: PathBuf,
    /// Stable directory for failed-input debug copies. Not subject to
    /// work-dir cleanup.
    pub debug_dir: PathBuf,
    /// Wall-clock budget for one compiler run.
    pub timeout: Duration,
}

impl Default for TypesetConfig {
    fn default() -> Self {
        let scratch_root = std::env::temp_dir().join("examforge");
        let debug_dir = scratch_root.join("debug");
        Self {
            compiler: "pdflatex".to_string(),
            scratch_root,
            debug_dir,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A compiled document ready to hand back to the caller.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Drives the external LaTeX compiler.
#[derive(Debug, Clone, Default)]
pub struct TypesetDriver {
    config: TypesetConfig,
}

impl TypesetDriver {
    /// Create a driver with the given configuration.
    pub fn new(config: TypesetConfig) -> Self {
        Self { config }
    }

    /// Whether the configured compiler is present on this host.
    pub fn is_toolchain_available(&self) -> bool {
        which::which(&self.config.compiler).is_ok()
    }

    /// Compile `document` to a PDF artifact.
    ///
    /// # Errors
    ///
    /// - [`TypesetError::MalformedDocument`] if a structural marker is
    ///   missing (no work dir is created in that case)
    /// - [`TypesetError::ToolchainUnavailable`] if the compiler executable
    ///   cannot be found
    /// - [`TypesetError::Timeout`] if the compiler exceeds its budget
    /// - [`TypesetError::CompilationFailed`] if no artifact was produced
    pub async fn compile(&self, document: &str) -> Result<CompiledArtifact> {
        if let Some(marker) = examforge_core::missing_structure_marker(document) {
            return Err(TypesetError::MalformedDocument(marker));
        }

        std::fs::create_dir_all(&self.config.scratch_root)?;
        let workdir = WorkDir::create(&self.config.scratch_root)?;

        let input = workdir.join(INPUT_FILE);
        tokio::fs::write(&input, document).await?;

        self.run_compiler(&workdir).await?;

        let output = workdir.join(OUTPUT_FILE);
        match tokio::fs::read(&output).await {
            Ok(bytes) => {
                let filename = timestamped_filename("pdf");
                tracing::info!(
                    filename = %filename,
                    size = bytes.len(),
                    "compiled document"
                );
                Ok(CompiledArtifact { bytes, filename })
            }
            Err(_) => {
                let summary = self.read_log_summary(&workdir).await;
                let debug_path = self.persist_debug_copy(document).await;
                Err(TypesetError::CompilationFailed {
                    summary,
                    debug_path,
                })
            }
        }
    }

    /// Run the compiler inside `workdir`, bounded by the configured
    /// timeout. Exit status is logged but never treated as fatal here.
    async fn run_compiler(&self, workdir: &WorkDir) -> Result<()> {
        // stdout/stderr go to null: pdflatex duplicates everything into
        // the log file, and a filling pipe would stall the child.
        let mut child = Command::new(&self.config.compiler)
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(workdir.path())
            .arg(workdir.join(INPUT_FILE))
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TypesetError::ToolchainUnavailable {
                        command: self.config.compiler.clone(),
                    }
                } else {
                    TypesetError::Io(e)
                }
            })?;

        match tokio::time::timeout(self.config.timeout, child.wait()).await {
            Ok(status) => {
                let status = status?;
                if !status.success() {
                    tracing::warn!(
                        %status,
                        "compiler exited non-zero; checking for output artifact"
                    );
                }
                Ok(())
            }
            Err(_) => {
                let _ = child.kill().await;
                Err(TypesetError::Timeout {
                    seconds: self.config.timeout.as_secs(),
                })
            }
        }
    }

    /// Extract a bounded human-readable summary from the compiler log.
    async fn read_log_summary(&self, workdir: &WorkDir) -> String {
        match tokio::fs::read_to_string(workdir.join(LOG_FILE)).await {
            Ok(log) => {
                let lines: Vec<&str> = log
                    .lines()
                    .filter(|line| line.starts_with('!') || line.contains("Error"))
                    .take(MAX_LOG_LINES)
                    .collect();
                if lines.is_empty() {
                    "LaTeX compilation failed".to_string()
                } else {
                    lines.join(" | ")
                }
            }
            Err(_) => "LaTeX compilation failed (no log produced)".to_string(),
        }
    }

    /// Persist the failed input outside the work dir so it survives
    /// cleanup. Best-effort: returns `None` if the copy cannot be written.
    async fn persist_debug_copy(&self, document: &str) -> Option<PathBuf> {
        if let Err(e) = tokio::fs::create_dir_all(&self.config.debug_dir).await {
            tracing::warn!(error = %e, "failed to create debug dir");
            return None;
        }

        let path = self.config.debug_dir.join(format!("failed-{}.tex", Uuid::new_v4()));
        match tokio::fs::write(&path, document).await {
            Ok(()) => {
                tracing::error!(
                    path = %path.display(),
                    "compilation failed; input persisted for inspection"
                );
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist debug copy");
                None
            }
        }
    }
}

/// Timestamped download filename, e.g. `exam_questions_20260806_142233.pdf`.
pub fn timestamped_filename(extension: &str) -> String {
    format!(
        "exam_questions_{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}
