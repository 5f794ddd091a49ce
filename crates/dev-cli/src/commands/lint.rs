//! Lint command - format discovered files in place, then lint them.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;
use lamia_tools::{LintConfig, LintOrchestrator, LintReport};

pub fn run(
    path: PathBuf,
    changed_only: bool,
    json_output: bool,
    project_root: PathBuf,
    timeout: Duration,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = LintConfig::default()
        .with_project_root(&project_root)
        .with_timeout(timeout);

    // Formatter and linter exist only for the duration of this command.
    let orchestrator = LintOrchestrator::from_config(&config);

    execute(
        &orchestrator,
        &path,
        changed_only,
        json_output,
        verbose,
        &mut io::stdout().lock(),
    )
}

/// Run `orchestrator` and render its report to `out`.
///
/// A low score is advisory only; the result stays `Ok`.
fn execute(
    orchestrator: &LintOrchestrator,
    path: &Path,
    changed_only: bool,
    json_output: bool,
    verbose: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if !json_output {
        let scope = if changed_only {
            "changed files".to_string()
        } else {
            path.display().to_string()
        };
        writeln!(out, "{} {}", "Linting".cyan().bold(), scope.white())?;
    }

    let report = orchestrator.run(path, changed_only)?;

    if json_output {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        print_human(&report, verbose, out)?;
    }

    Ok(())
}

fn print_human(report: &LintReport, verbose: bool, out: &mut impl Write) -> io::Result<()> {
    if report.files.is_empty() {
        return writeln!(out, "{}", "No files to lint.".yellow());
    }

    if verbose {
        for file in &report.files {
            writeln!(out, "  {}", file.display().to_string().dimmed())?;
        }
    }

    writeln!(
        out,
        "{} {} of {} files",
        "Formatted".cyan().bold(),
        report.formatted.to_string().white().bold(),
        report.files.len()
    )?;
    for failure in &report.format_failures {
        writeln!(
            out,
            "  {} {}: {}",
            "failed".red(),
            failure.path.display(),
            failure.message
        )?;
    }

    if !report.linter_output.is_empty() {
        writeln!(out)?;
        write!(out, "{}", report.linter_output)?;
    }

    let Some(verdict) = report.verdict else {
        return Ok(());
    };

    writeln!(out)?;
    let score = format!("{:.2}", verdict.score);
    let score = if verdict.passed {
        score.green().bold()
    } else {
        score.red().bold()
    };
    writeln!(out, "Score: {}/10 (threshold {:.1})", score, verdict.threshold)?;

    if let Some(advisory) = verdict.advisory() {
        writeln!(out)?;
        writeln!(out, "{}", advisory.yellow())?;
    }
    Ok(())
}
