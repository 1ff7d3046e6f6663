//! Structural fidelity scoring
//!
//!     Compares an original source against a reconstruction by parsing both,
//!     serializing each tree into its canonical dump, and measuring a
//!     character-level sequence-alignment ratio between the two dumps
//!     (2 × matched / total length, scaled to a percentage).
//!
//!     This is a shape comparison, not an equivalence check: renamed
//!     identifiers or reordered-but-equivalent expressions lower the score
//!     even when runtime behavior is identical.
//!
//!     Reconstructions arrive from a text-generation service and often come
//!     wrapped in fenced code blocks, so both inputs are de-fenced first.
//!     A parse failure on either side is an expected outcome, not an error:
//!     the report carries a zero score and the diagnostic.

use once_cell::sync::Lazy;
use regex::Regex;
use similar::TextDiff;

use loir_parser::{dump, parse_module};

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:python)?\n([\s\S]*?)\n```").expect("valid fence pattern"));

/// The outcome of a fidelity comparison. `score` is always in [0, 100];
/// it is 0 with a diagnostic in `failure` when either text failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct FidelityReport {
    pub score: f64,
    pub failure: Option<String>,
}

impl FidelityReport {
    fn failed(reason: String) -> Self {
        Self {
            score: 0.0,
            failure: Some(reason),
        }
    }
}

/// Drop a leading and a trailing fence-marker line, if present.
fn strip_fences(text: &str) -> String {
    let mut lines: Vec<&str> = text.trim().lines().collect();
    if lines
        .first()
        .is_some_and(|l| l.trim_start().starts_with("```"))
    {
        lines.remove(0);
    }
    if lines
        .last()
        .is_some_and(|l| l.trim_start().starts_with("```"))
    {
        lines.pop();
    }
    lines.join("\n")
}

/// Pull the body of an embedded fenced block out of surrounding prose, or
/// return the text unchanged when there is no block.
fn extract_fenced(text: &str) -> String {
    FENCED_BLOCK
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| text.to_string())
}

/// Score a reconstruction against the original source.
pub fn score(original: &str, reconstructed: &str) -> FidelityReport {
    let original = strip_fences(original);
    let reconstructed = extract_fenced(&strip_fences(reconstructed));

    let original_tree = match parse_module(&original, "original") {
        Ok(tree) => tree,
        Err(e) => return FidelityReport::failed(format!("original failed to parse: {e}")),
    };
    let reconstructed_tree = match parse_module(&reconstructed, "reconstructed") {
        Ok(tree) => tree,
        Err(e) => return FidelityReport::failed(format!("reconstruction failed to parse: {e}")),
    };

    let original_dump = dump(&original_tree);
    let reconstructed_dump = dump(&reconstructed_tree);
    let ratio = TextDiff::from_chars(original_dump.as_str(), reconstructed_dump.as_str()).ratio();

    FidelityReport {
        score: f64::from(ratio) * 100.0,
        failure: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_scores_exactly_100() {
        let source = "def f(x):\n    return x\n";
        let report = score(source, source);
        assert_eq!(report.score, 100.0);
        assert!(report.failure.is_none());
    }

    #[test]
    fn test_unparsable_reconstruction_scores_zero() {
        let report = score("x = 1\n", "def broken(:\n");
        assert_eq!(report.score, 0.0);
        assert!(report.failure.is_some());
    }

    #[test]
    fn test_unparsable_original_scores_zero() {
        let report = score("def broken(:\n", "x = 1\n");
        assert_eq!(report.score, 0.0);
        let failure = report.failure.expect("expected diagnostic");
        assert!(failure.contains("original"));
    }

    #[test]
    fn test_fence_markers_are_stripped() {
        let report = score("x = 1\n", "```python\nx = 1\n```\n");
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_fenced_block_extracted_from_prose() {
        let reconstructed = "Here is the code:\n```python\nx = 1\n```\nHope that helps!";
        let report = score("x = 1\n", reconstructed);
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_formatting_differences_do_not_lower_score() {
        let report = score("x = f( 1,2 )\n", "x = f(1, 2)\n");
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_renamed_identifier_lowers_score() {
        let report = score("total = 1\n", "blub = 1\n");
        assert!(report.score < 100.0);
        assert!(report.score > 0.0);
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let cases = [
            ("x = 1\n", "y = [1, 2, 3]\n"),
            ("def f():\n    pass\n", "class G:\n    pass\n"),
            ("import os\n", "while x:\n    break\n"),
        ];
        for (a, b) in cases {
            let report = score(a, b);
            assert!((0.0..=100.0).contains(&report.score), "{}", report.score);
        }
    }
}
