//! Format-then-lint orchestration.
//!
//! A run discovers a [`FileSet`], formats each file in place, lints the whole
//! set once and compares the score with the threshold. A low score is an
//! advisory for the operator, never an error; enforcement belongs to CI.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use lamia_tools::{LintConfig, LintOrchestrator};
//!
//! let orchestrator = LintOrchestrator::from_config(&LintConfig::default());
//! let report = orchestrator.run(Path::new("./lamia"), false).unwrap();
//! if let Some(advisory) = report.verdict.and_then(|v| v.advisory()) {
//!     println!("{advisory}");
//! }
//! ```

mod discovery;
mod tools;
mod verdict;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::LintConfig;
use crate::error::Result;
use crate::process::ExternalCommand;

pub use discovery::{
    ChangedFiles, FileSet, GitDiff, discover, parse_changed_files, resolve_changed_files,
    walk_sources,
};
pub use tools::{Formatter, Linter, LinterRun, Pylint, Yapf, parse_score};
pub use verdict::{ADVISORY, LintVerdict};

/// A file the formatter could not process.
#[derive(Debug, Clone, Serialize)]
pub struct FormatFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Everything one lint run produced.
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
    /// Files considered, in discovery order.
    pub files: FileSet,
    /// Number of files the formatter processed successfully.
    pub formatted: usize,
    pub format_failures: Vec<FormatFailure>,
    /// `None` when there was nothing to lint.
    pub verdict: Option<LintVerdict>,
    /// Linter report text.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub linter_output: String,
}

impl LintReport {
    fn empty() -> Self {
        Self {
            files: Vec::new(),
            formatted: 0,
            format_failures: Vec::new(),
            verdict: None,
            linter_output: String::new(),
        }
    }
}

/// Wires discovery, formatter and linter together.
pub struct LintOrchestrator {
    formatter: Box<dyn Formatter>,
    linter: Box<dyn Linter>,
    vcs: Box<dyn ChangedFiles>,
    source_suffix: String,
    threshold: f64,
}

impl LintOrchestrator {
    /// Orchestrator over explicit collaborators.
    pub fn new(
        config: &LintConfig,
        formatter: Box<dyn Formatter>,
        linter: Box<dyn Linter>,
        vcs: Box<dyn ChangedFiles>,
    ) -> Self {
        Self {
            formatter,
            linter,
            vcs,
            source_suffix: config.source_suffix.clone(),
            threshold: config.threshold,
        }
    }

    /// Orchestrator over yapf, pylint and git as configured.
    pub fn from_config(config: &LintConfig) -> Self {
        let command = |program: &str| ExternalCommand::new(program).timeout(config.timeout);
        Self::new(
            config,
            Box::new(Yapf::new(
                command(&config.formatter_program),
                config.project_root.join(&config.style_config),
            )),
            Box::new(Pylint::new(
                command(&config.linter_program),
                config.project_root.join(&config.rc_file),
            )),
            Box::new(GitDiff::new(
                command(&config.vcs_program).current_dir(&config.project_root),
            )),
        )
    }

    /// Discover, format, lint and judge.
    ///
    /// Format failures are collected and do not stop the loop; each file is
    /// attempted exactly once. The linter runs only after every format call,
    /// and not at all for an empty set. Linter errors propagate.
    pub fn run(&self, root: &Path, changed_only: bool) -> Result<LintReport> {
        let files = discover(root, changed_only, &self.source_suffix, self.vcs.as_ref())?;
        if files.is_empty() {
            tracing::info!("no files to lint");
            return Ok(LintReport::empty());
        }

        let mut formatted = 0;
        let mut format_failures = Vec::new();
        for path in &files {
            match self.formatter.format_in_place(path) {
                Ok(()) => formatted += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "formatting failed");
                    format_failures.push(FormatFailure {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let run = self.linter.lint(&files)?;
        let verdict = LintVerdict::new(run.score, self.threshold);
        tracing::info!(score = verdict.score, passed = verdict.passed, "lint finished");

        Ok(LintReport {
            files,
            formatted,
            format_failures,
            verdict: Some(verdict),
            linter_output: run.output,
        })
    }
}
