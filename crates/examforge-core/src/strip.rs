//! Solution removal for generated documents.
//!
//! A questions-only rendering must drop every worked solution while leaving
//! the questions and the document frame intact. Rather than a chain of
//! regexes, this is a single left-to-right scan over three marker classes
//! (solution-open, question-open, document-close): a solution block runs
//! from its marker up to, not including, the next question marker or the
//! document close. Blocks never nest.

use crate::document::{DOCUMENT_CLOSE, QUESTION_MARKERS, SOLUTION_MARKERS};

const VSPACE_OPEN: &str = "\\vspace{";
const VSPACE_NORMALIZED: &str = "\\vspace{0.5cm}\n";

/// Remove every solution block from `document`.
///
/// With `include_solutions == true` the input is returned unchanged. A
/// document containing no solution markers is also returned unchanged, so
/// the transformation is a no-op exactly when there is nothing to remove.
///
/// Callers that care about the question-marker invariant should compare
/// [`question_marker_count`] before and after; removal never consumes a
/// question marker by construction, but the generated input is untrusted.
pub fn strip_solutions(document: &str, include_solutions: bool) -> String {
    if include_solutions {
        return document.to_string();
    }

    let mut out = String::with_capacity(document.len());
    let mut pos = 0;
    let mut removed = false;

    while let Some(start) = find_earliest(document, pos, SOLUTION_MARKERS) {
        out.push_str(&document[pos..start]);

        // Block end: next question marker or document close, whichever
        // comes first; end of input if the document is unterminated.
        let scan_from = start + 1;
        let question = find_earliest(document, scan_from, QUESTION_MARKERS);
        let close = document[scan_from..]
            .find(DOCUMENT_CLOSE)
            .map(|i| scan_from + i);
        let end = match (question, close) {
            (Some(q), Some(c)) => q.min(c),
            (Some(q), None) => q,
            (None, Some(c)) => c,
            (None, None) => document.len(),
        };

        pos = end;
        removed = true;
    }

    out.push_str(&document[pos..]);

    if !removed {
        return out;
    }

    normalize_vertical_space(&out)
}

/// Count question markers in `document` (all marker variants).
pub fn question_marker_count(document: &str) -> usize {
    QUESTION_MARKERS
        .iter()
        .map(|marker| count_occurrences(document, marker))
        .sum()
}

/// Collapse runs of `\vspace{...}` directives left dangling by solution
/// removal into a single normalized directive, and drop a run that would
/// otherwise sit immediately before the document close.
fn normalize_vertical_space(document: &str) -> String {
    let mut out = String::with_capacity(document.len());
    let mut pos = 0;

    while let Some(found) = document[pos..].find(VSPACE_OPEN) {
        let start = pos + found;
        out.push_str(&document[pos..start]);

        // Consume the whole run: directives separated only by whitespace.
        let mut cursor = start;
        loop {
            let Some(brace) = document[cursor..].find('}') else {
                // Unterminated directive; keep the tail verbatim.
                out.push_str(&document[start..]);
                return out;
            };
            cursor += brace + 1;

            let after_ws = skip_whitespace(document, cursor);
            if document[after_ws..].starts_with(VSPACE_OPEN) {
                cursor = after_ws;
            } else {
                break;
            }
        }

        let after_ws = skip_whitespace(document, cursor);
        if document[after_ws..].starts_with(DOCUMENT_CLOSE) {
            // No spacing directly before the close marker.
            pos = after_ws;
        } else {
            out.push_str(VSPACE_NORMALIZED);
            pos = cursor;
        }
    }

    out.push_str(&document[pos..]);
    out
}

fn find_earliest(document: &str, from: usize, markers: &[&str]) -> Option<usize> {
    markers
        .iter()
        .filter_map(|marker| document[from..].find(marker).map(|i| from + i))
        .min()
}

fn skip_whitespace(document: &str, from: usize) -> usize {
    document[from..]
        .find(|c: char| !c.is_whitespace())
        .map(|i| from + i)
        .unwrap_or(document.len())
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while let Some(found) = haystack[pos..].find(needle) {
        count += 1;
        pos += found + needle.len();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> String {
        "\\documentclass{article}\n\
         \\begin{document}\n\
         \\maketitle\n\
         \\section*{Question 1}\n\
         Compute $2 + 2$.\n\
         \\subsection*{Solution}\n\
         We have $$2 + 2 = 4.$$\n\
         \\vspace{1cm}\n\
         \\section*{Question 2}\n\
         State the chain rule.\n\
         \\subsection*{Solution}\n\
         $\\frac{d}{dx} f(g(x)) = f'(g(x)) g'(x)$\n\
         \\end{document}\n"
            .to_string()
    }

    #[test]
    fn test_identity_when_solutions_included() {
        let doc = sample_document();
        assert_eq!(strip_solutions(&doc, true), doc);
    }

    #[test]
    fn test_noop_without_solution_markers() {
        // Includes a vspace run: normalization must not touch a document
        // that had nothing removed.
        let doc = "\\documentclass{article}\n\\begin{document}\n\
                   \\section*{Question 1}\nWhy?\n\\vspace{1cm}\n\\vspace{2cm}\n\
                   \\end{document}\n";
        assert_eq!(strip_solutions(doc, false), doc);
    }

    #[test]
    fn test_removes_subsection_solutions() {
        let doc = sample_document();
        let stripped = strip_solutions(&doc, false);

        assert!(!stripped.contains("Solution"));
        assert!(stripped.contains("\\section*{Question 1}"));
        assert!(stripped.contains("\\section*{Question 2}"));
        assert!(stripped.contains("Compute $2 + 2$."));
        assert!(stripped.contains("State the chain rule."));
        assert!(stripped.contains("\\end{document}"));
        assert_eq!(question_marker_count(&stripped), question_marker_count(&doc));
    }

    #[test]
    fn test_removes_textbf_solutions() {
        let doc = "\\documentclass{article}\n\\begin{document}\n\
                   \\textbf{Question 1:} What is $x$?\n\
                   \\textbf{Solution:} $x = 3$.\n\
                   \\textbf{Question 2:} What is $y$?\n\
                   \\textbf{Solution:} $y = 4$.\n\
                   \\end{document}\n";
        let stripped = strip_solutions(doc, false);

        assert!(!stripped.contains("Solution"));
        assert_eq!(question_marker_count(&stripped), 2);
    }

    #[test]
    fn test_last_solution_runs_to_document_close() {
        let doc = sample_document();
        let stripped = strip_solutions(&doc, false);

        assert!(!stripped.contains("\\frac"));
        assert!(stripped.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_vspace_run_collapsed_after_removal() {
        let doc = "\\documentclass{article}\n\\begin{document}\n\
                   \\section*{Question 1}\nQ\n\
                   \\vspace{1cm}\n\\vspace{2cm}\n  \\vspace{3cm}\n\
                   \\subsection*{Solution}\nA\n\
                   \\section*{Question 2}\nQ\n\
                   \\end{document}\n";
        let stripped = strip_solutions(doc, false);

        assert_eq!(count_occurrences(&stripped, "\\vspace{"), 1);
        assert!(stripped.contains("\\vspace{0.5cm}\n"));
        assert_eq!(question_marker_count(&stripped), 2);
    }

    #[test]
    fn test_trailing_vspace_before_close_removed() {
        let doc = "\\documentclass{article}\n\\begin{document}\n\
                   \\section*{Question 1}\nQ\n\
                   \\subsection*{Solution}\nA\n\
                   \\section*{Question 2}\nQ\n\
                   \\vspace{2em}\n\
                   \\end{document}\n";
        let stripped = strip_solutions(doc, false);

        assert!(!stripped.contains("\\vspace"));
        assert!(stripped.contains("\\end{document}"));
    }

    #[test]
    fn test_question_marker_count_mixed_variants() {
        let doc = "\\section*{Question 1} a \\subsection*{Question 1.1} b \\textbf{Question 2}";
        assert_eq!(question_marker_count(doc), 3);
    }

    #[test]
    fn test_strip_is_idempotent() {
        let doc = sample_document();
        let once = strip_solutions(&doc, false);
        let twice = strip_solutions(&once, false);
        assert_eq!(once, twice);
    }
}
