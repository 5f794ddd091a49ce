//! Integration tests for the lint orchestrator with recording fakes.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;

use lamia_tools::lint::{
    ChangedFiles, Formatter, LintOrchestrator, Linter, LinterRun, Pylint, walk_sources,
};
use lamia_tools::process::ExternalCommand;
use lamia_tools::{LintConfig, Result, ToolError};

// =============================================================================
// Fakes
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Format(PathBuf),
    Lint(Vec<PathBuf>),
}

type Log = Rc<RefCell<Vec<Event>>>;

struct FakeFormatter {
    log: Log,
    fail_on: Option<PathBuf>,
}

impl Formatter for FakeFormatter {
    fn format_in_place(&self, path: &Path) -> Result<()> {
        self.log.borrow_mut().push(Event::Format(path.to_path_buf()));
        if self.fail_on.as_deref() == Some(path) {
            return Err(ToolError::ProcessFailed {
                program: "yapf".to_string(),
                stage: "format".to_string(),
                code: Some(1),
                stderr: "cannot parse".to_string(),
            });
        }
        Ok(())
    }
}

struct FakeLinter {
    log: Log,
    score: f64,
}

impl Linter for FakeLinter {
    fn lint(&self, files: &[PathBuf]) -> Result<LinterRun> {
        self.log.borrow_mut().push(Event::Lint(files.to_vec()));
        Ok(LinterRun {
            score: self.score,
            output: format!("Your code has been rated at {:.2}/10\n", self.score),
        })
    }
}

/// Diff listing paths relative to `base`, as git does for its top level.
struct FakeDiff {
    base: PathBuf,
    output: &'static str,
}

impl ChangedFiles for FakeDiff {
    fn diff_name_only(&self) -> Result<String> {
        Ok(self.output.to_string())
    }

    fn base_dir(&self) -> Result<PathBuf> {
        Ok(self.base.clone())
    }
}

struct Harness {
    log: Log,
    orchestrator: LintOrchestrator,
}

fn harness(score: f64, diff: &'static str, fail_on: Option<PathBuf>) -> Harness {
    harness_in(Path::new("."), score, diff, fail_on)
}

fn harness_in(base: &Path, score: f64, diff: &'static str, fail_on: Option<PathBuf>) -> Harness {
    let log: Log = Rc::default();
    let orchestrator = LintOrchestrator::new(
        &LintConfig::default(),
        Box::new(FakeFormatter {
            log: log.clone(),
            fail_on,
        }),
        Box::new(FakeLinter {
            log: log.clone(),
            score,
        }),
        Box::new(FakeDiff {
            base: base.to_path_buf(),
            output: diff,
        }),
    );
    Harness { log, orchestrator }
}

/// Tree with python files at several depths plus non-matching files.
fn create_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    for (path, body) in [
        ("app.py", "x = 1\n"),
        ("README.md", "# readme\n"),
        ("models/user.py", "class User: pass\n"),
        ("models/post.py", "class Post: pass\n"),
        ("models/schema.sql", "select 1;\n"),
        ("views/graph/users/mutations.py", "pass\n"),
        ("views/graph/users/mutations.pyc", "\0"),
        ("templates/index.html", "<html></html>\n"),
    ] {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, body).unwrap();
    }
    dir
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn test_walk_returns_only_matching_files_at_any_depth() {
    let dir = create_tree();
    let files = walk_sources(dir.path(), ".py").unwrap();

    assert_eq!(files.len(), 4);
    assert!(files.iter().all(|f| f.to_string_lossy().ends_with(".py")));
    assert!(files.iter().all(|f| f.exists()));
}

#[test]
fn test_walk_order_is_deterministic() {
    let dir = create_tree();
    let first = walk_sources(dir.path(), ".py").unwrap();
    let second = walk_sources(dir.path(), ".py").unwrap();
    assert_eq!(first, second);

    let relative: Vec<_> = first
        .iter()
        .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        relative,
        vec![
            PathBuf::from("app.py"),
            PathBuf::from("models/post.py"),
            PathBuf::from("models/user.py"),
            PathBuf::from("views/graph/users/mutations.py"),
        ]
    );
}

#[test]
fn test_changed_only_ignores_root_and_suffix() {
    let repo = create_tree();
    let h = harness_in(repo.path(), 9.0, "app.py\nREADME.md\n", None);

    let report = h
        .orchestrator
        .run(Path::new("/root/that/does/not/exist"), true)
        .unwrap();

    assert_eq!(
        report.files,
        vec![repo.path().join("app.py"), repo.path().join("README.md")]
    );
}

#[test]
fn test_changed_only_skips_deleted_files() {
    let repo = create_tree();
    let h = harness_in(
        repo.path(),
        9.0,
        "models/user.py\nlamia/deleted_module.py\n",
        None,
    );

    let report = h.orchestrator.run(Path::new("."), true).unwrap();

    assert_eq!(report.files, vec![repo.path().join("models/user.py")]);
    assert!(report.files.iter().all(|f| f.exists()));
    assert!(report.format_failures.is_empty());
}

#[test]
fn test_changed_only_with_only_deleted_files_skips_lint() {
    let repo = create_tree();
    let h = harness_in(repo.path(), 0.0, "gone.py\n", None);

    let report = h.orchestrator.run(Path::new("."), true).unwrap();

    assert!(report.files.is_empty());
    assert!(report.verdict.is_none());
    assert!(h.log.borrow().is_empty());
}

#[test]
fn test_changed_paths_resolve_from_repository_not_cwd() {
    // The repository lives somewhere other than the process working directory.
    let repo = create_tree();
    assert_ne!(std::env::current_dir().unwrap(), repo.path());
    let h = harness_in(repo.path(), 8.0, "views/graph/users/mutations.py\n", None);

    let report = h.orchestrator.run(Path::new("."), true).unwrap();

    let expected = repo.path().join("views/graph/users/mutations.py");
    assert_eq!(
        h.log.borrow().first(),
        Some(&Event::Format(expected.clone()))
    );
    assert_eq!(report.files, vec![expected]);
}

// =============================================================================
// Format and lint passes
// =============================================================================

#[test]
fn test_every_file_formatted_once_before_single_lint() {
    let dir = create_tree();
    let h = harness(8.0, "", None);

    let report = h.orchestrator.run(dir.path(), false).unwrap();
    let log = h.log.borrow();

    assert_eq!(log.len(), report.files.len() + 1);
    for (event, path) in log.iter().zip(&report.files) {
        assert_eq!(event, &Event::Format(path.clone()));
    }
    assert_eq!(log.last(), Some(&Event::Lint(report.files.clone())));
    assert_eq!(report.formatted, 4);
}

#[test]
fn test_format_failure_does_not_stop_remaining_files() {
    let dir = create_tree();
    let broken = dir.path().join("models/post.py");
    let h = harness(8.0, "", Some(broken.clone()));

    let report = h.orchestrator.run(dir.path(), false).unwrap();

    let formats = h
        .log
        .borrow()
        .iter()
        .filter(|e| matches!(e, Event::Format(_)))
        .count();
    assert_eq!(formats, 4);
    assert_eq!(report.formatted, 3);
    assert_eq!(report.format_failures.len(), 1);
    assert_eq!(report.format_failures[0].path, broken);
    assert!(report.verdict.is_some(), "lint still runs after a format failure");
}

#[cfg(unix)]
#[test]
fn test_non_python_changed_file_reaching_linter_keeps_score() {
    let repo = create_tree();
    let log: Log = Rc::default();
    // pylint reports F0001 for README.md, still scores app.py and sets the
    // fatal bit in its exit status.
    let pylint = Pylint::new(
        ExternalCommand::new("sh").args([
            "-c",
            "echo 'README.md:1:0: F0001: No module named README.md (fatal)'; \
             echo 'Your code has been rated at 5.00/10'; exit 17",
            "pylint",
        ]),
        ".pylintrc",
    );
    let orchestrator = LintOrchestrator::new(
        &LintConfig::default(),
        Box::new(FakeFormatter {
            log: log.clone(),
            fail_on: Some(repo.path().join("README.md")),
        }),
        Box::new(pylint),
        Box::new(FakeDiff {
            base: repo.path().to_path_buf(),
            output: "app.py\nREADME.md\n",
        }),
    );

    let report = orchestrator.run(Path::new("."), true).unwrap();

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.format_failures.len(), 1);
    let verdict = report.verdict.unwrap();
    assert_eq!(verdict.score, 5.0);
    assert!(verdict.advisory().is_some());
}

// =============================================================================
// Verdict
// =============================================================================

#[test]
fn test_score_below_threshold_is_advisory_failure() {
    let dir = create_tree();
    let h = harness(6.99, "", None);

    let verdict = h.orchestrator.run(dir.path(), false).unwrap().verdict.unwrap();

    assert!(!verdict.passed);
    assert!(verdict.advisory().is_some());
}

#[test]
fn test_score_at_threshold_passes_without_advisory() {
    let dir = create_tree();
    let h = harness(7.0, "", None);

    let verdict = h.orchestrator.run(dir.path(), false).unwrap().verdict.unwrap();

    assert!(verdict.passed);
    assert!(verdict.advisory().is_none());
}

// =============================================================================
// Empty file sets
// =============================================================================

#[test]
fn test_empty_diff_skips_format_and_lint() {
    let h = harness(0.0, "\n", None);

    let report = h.orchestrator.run(Path::new("."), true).unwrap();

    assert!(report.files.is_empty());
    assert!(report.verdict.is_none());
    assert!(h.log.borrow().is_empty());
}

#[test]
fn test_tree_without_sources_skips_lint() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "hi").unwrap();
    let h = harness(0.0, "", None);

    let report = h.orchestrator.run(dir.path(), false).unwrap();

    assert!(report.verdict.is_none());
    assert!(h.log.borrow().is_empty());
}

#[test]
fn test_report_serializes_for_ci() {
    let dir = create_tree();
    let h = harness(6.5, "", None);

    let report = h.orchestrator.run(dir.path(), false).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["verdict"]["score"], 6.5);
    assert_eq!(json["verdict"]["passed"], false);
    assert_eq!(json["files"].as_array().unwrap().len(), 4);
}
