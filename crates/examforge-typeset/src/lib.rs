//! Typesetting driver for Examforge.
//!
//! Compiles generated LaTeX to PDF by driving an external `pdflatex`
//! process with a bounded time budget, an isolated per-invocation work
//! directory, and artifact-presence (not exit status) as the success
//! criterion. Work directories are removed on every exit path; a failed
//! input is persisted to a stable debug location for post-mortems.

mod driver;
mod error;
mod workdir;

pub use driver::{CompiledArtifact, INPUT_FILE, TypesetConfig, TypesetDriver, timestamped_filename};
pub use error::{Result, TypesetError};
pub use workdir::WorkDir;
