//! Ephemeral work directories for compilation.
//!
//! Each compiler invocation owns exactly one [`WorkDir`]; nothing is shared
//! across invocations, so concurrent requests cannot interfere. The
//! directory is removed when the handle drops — on normal return, on error,
//! and when the owning future is cancelled. Removal is best-effort: a
//! cleanup failure is logged, never surfaced over the primary result.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A uniquely named scratch directory owned by one compilation.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create a fresh `exam-<uuid>` directory under `base`.
    pub fn create(base: &Path) -> io::Result<Self> {
        let path = base.join(format!("exam-{}", Uuid::new_v4()));
        fs::create_dir_all(&path)?;
        tracing::debug!(path = %path.display(), "created work dir");
        Ok(Self { path })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `name` inside the directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to remove work dir"
                );
            }
        }
    }
}
