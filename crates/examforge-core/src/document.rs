//! Structural markers of a generated LaTeX document.
//!
//! The generation provider is instructed to return a complete standalone
//! document. These helpers check for the three markers that make it
//! compilable and locate the question/solution sections the post-processor
//! operates on.

/// Root declaration every compilable document must carry.
pub const DOCUMENT_CLASS: &str = "\\documentclass";

/// Document-open marker.
pub const DOCUMENT_OPEN: &str = "\\begin{document}";

/// Document-close marker.
pub const DOCUMENT_CLOSE: &str = "\\end{document}";

/// Markers that introduce a question section.
pub const QUESTION_MARKERS: &[&str] = &[
    "\\section*{Question",
    "\\subsection*{Question",
    "\\textbf{Question",
];

/// Markers that introduce a solution block.
pub const SOLUTION_MARKERS: &[&str] = &["\\subsection*{Solution", "\\textbf{Solution"];

/// Returns the first structural marker missing from `document`, if any.
///
/// Checked in order: root declaration, document-open, document-close.
pub fn missing_structure_marker(document: &str) -> Option<&'static str> {
    for marker in [DOCUMENT_CLASS, DOCUMENT_OPEN, DOCUMENT_CLOSE] {
        if !document.contains(marker) {
            return Some(marker);
        }
    }
    None
}

/// Whether `document` carries all three structural markers.
pub fn is_complete_document(document: &str) -> bool {
    missing_structure_marker(document).is_none()
}
