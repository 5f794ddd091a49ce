//! Score threshold check.

use serde::Serialize;

/// Printed when the score is below the threshold. Informational only.
pub const ADVISORY: &str = "\
Your code scored below the quality threshold.
Please review the linter messages above and fix what you can
before opening a pull request. CI will hold the merge until it passes.";

/// Linter score compared against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LintVerdict {
    pub score: f64,
    pub threshold: f64,
    pub passed: bool,
}

impl LintVerdict {
    /// A score equal to the threshold passes; only strictly lower fails.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn new(score: f64, threshold: f64) -> Self {
        Self {
            score,
            threshold,
            passed: !(score < threshold),
        }
    }

    /// Advisory text when the check failed.
    pub fn advisory(&self) -> Option<&'static str> {
        (!self.passed).then_some(ADVISORY)
    }
}
