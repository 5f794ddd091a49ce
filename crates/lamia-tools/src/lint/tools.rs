//! Formatter and linter collaborators.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ToolError};
use crate::process::{ExternalCommand, ProcessOutput};

static SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rated at (-?\d+(?:\.\d+)?)/10").unwrap());

/// Rewrites one source file in place.
pub trait Formatter {
    fn format_in_place(&self, path: &Path) -> Result<()>;
}

/// Score and report text from one linter run.
#[derive(Debug, Clone, PartialEq)]
pub struct LinterRun {
    pub score: f64,
    pub output: String,
}

/// Lints a set of files and returns the global score.
pub trait Linter {
    fn lint(&self, files: &[PathBuf]) -> Result<LinterRun>;
}

/// `yapf --in-place --style <style> <file>`, one file per call.
///
/// yapf's batch mode wants per-file line ranges, which the orchestrator does
/// not compute, so files are formatted individually.
pub struct Yapf {
    command: ExternalCommand,
    style_config: PathBuf,
}

impl Yapf {
    pub fn new(command: ExternalCommand, style_config: impl Into<PathBuf>) -> Self {
        Self {
            command,
            style_config: style_config.into(),
        }
    }
}

impl Formatter for Yapf {
    fn format_in_place(&self, path: &Path) -> Result<()> {
        self.command
            .clone()
            .arg("--in-place")
            .arg("--style")
            .arg(self.style_config.to_string_lossy())
            .arg(path.to_string_lossy())
            .run_checked("format")?;
        Ok(())
    }
}

/// `pylint --rcfile <rc> <files...>`, score read from the report footer.
pub struct Pylint {
    command: ExternalCommand,
    rc_file: PathBuf,
}

impl Pylint {
    pub fn new(command: ExternalCommand, rc_file: impl Into<PathBuf>) -> Self {
        Self {
            command,
            rc_file: rc_file.into(),
        }
    }
}

// pylint's exit status is a bit mask of message categories. A usage error
// means nothing was linted. A fatal message (e.g. F0001 for a file that is
// not a module) only matters when no score was produced.
const PYLINT_FATAL: i32 = 1;
const PYLINT_USAGE_ERROR: i32 = 32;

impl Linter for Pylint {
    fn lint(&self, files: &[PathBuf]) -> Result<LinterRun> {
        let command = self
            .command
            .clone()
            .arg("--rcfile")
            .arg(self.rc_file.to_string_lossy())
            .args(files.iter().map(|f| f.to_string_lossy().into_owned()));
        let output = command.output()?;

        let failed = |output: ProcessOutput| ToolError::ProcessFailed {
            program: command.program().to_string(),
            stage: "lint".to_string(),
            code: output.code,
            stderr: output.stderr,
        };

        let status = output.code;
        let code = match status {
            Some(code) if code & PYLINT_USAGE_ERROR == 0 => code,
            _ => return Err(failed(output)),
        };

        match parse_score(&output.stdout) {
            Ok(score) => {
                if code & PYLINT_FATAL != 0 {
                    tracing::warn!("linter could not process some files");
                }
                Ok(LinterRun {
                    score,
                    output: output.stdout,
                })
            }
            Err(_) if code & PYLINT_FATAL != 0 => Err(failed(output)),
            Err(e) => Err(e),
        }
    }
}

/// Extract the score from a line such as
/// `Your code has been rated at 6.99/10 (previous run: 7.00/10, -0.01)`.
pub fn parse_score(output: &str) -> Result<f64> {
    let captures = SCORE
        .captures(output)
        .ok_or_else(|| ToolError::ScoreParse("no 'rated at <score>/10' line in output".into()))?;
    captures[1]
        .parse::<f64>()
        .map_err(|e| ToolError::ScoreParse(format!("'{}': {e}", &captures[1])))
}
