//! Core pipeline for Examforge question-paper generation.
//!
//! This crate holds the pure stages of the pipeline:
//! - Configuration normalization (defaults + validation)
//! - Prompt compilation for the generation provider
//! - Post-processing of generated LaTeX (solution removal)
//! - Structural checks shared with the typesetting driver
//!
//! Everything here is side-effect free; process and network I/O live in the
//! `examforge-genai`, `examforge-typeset`, and `examforge-server` crates.

pub mod config;
pub mod document;
pub mod error;
pub mod prompt;
pub mod strip;

pub use config::{Difficulty, GenerationConfig, RawGenerationConfig};
pub use document::{is_complete_document, missing_structure_marker};
pub use error::{CoreError, Result};
pub use prompt::{compile_prompt, document_title};
pub use strip::{question_marker_count, strip_solutions};
