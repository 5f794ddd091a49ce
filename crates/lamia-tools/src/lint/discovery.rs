//! File discovery: a full tree walk or the working-tree diff.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ToolError};
use crate::process::ExternalCommand;

/// Paths one lint invocation operates on, in discovery order.
pub type FileSet = Vec<PathBuf>;

/// Source of "changed files" output.
pub trait ChangedFiles {
    /// Raw whitespace-separated list of paths changed in the working tree.
    fn diff_name_only(&self) -> Result<String>;

    /// Directory the listed paths are relative to.
    fn base_dir(&self) -> Result<PathBuf>;
}

/// `git diff --name-only` against the working tree.
///
/// git lists paths relative to the repository top level, whichever directory
/// it runs in, so [`ChangedFiles::base_dir`] asks git for that top level.
pub struct GitDiff {
    command: ExternalCommand,
}

impl GitDiff {
    /// `command` is the git program, usually with its working directory set.
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

impl ChangedFiles for GitDiff {
    fn diff_name_only(&self) -> Result<String> {
        Ok(self
            .command
            .clone()
            .args(["diff", "--name-only"])
            .run_checked("diff")?
            .stdout)
    }

    fn base_dir(&self) -> Result<PathBuf> {
        let output = self
            .command
            .clone()
            .args(["rev-parse", "--show-toplevel"])
            .run_checked("diff")?;
        Ok(PathBuf::from(output.stdout.trim_end_matches(['\r', '\n'])))
    }
}

/// Every file under `root` whose name ends with `suffix`.
///
/// Entries are visited sorted by file name, so the order is stable across
/// runs and platforms.
pub fn walk_sources(root: &Path, suffix: &str) -> Result<FileSet> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ToolError::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(suffix) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Split diff output into paths. No suffix filtering is applied.
pub fn parse_changed_files(output: &str) -> FileSet {
    output.split_whitespace().map(PathBuf::from).collect()
}

/// Join diff paths onto `base` and keep those still on disk.
///
/// Deleted and renamed-away files show up in the diff but cannot be formatted
/// or linted.
pub fn resolve_changed_files(base: &Path, output: &str) -> FileSet {
    parse_changed_files(output)
        .into_iter()
        .map(|path| base.join(path))
        .filter(|path| {
            let present = path.exists();
            if !present {
                tracing::debug!(path = %path.display(), "skipping changed path missing from disk");
            }
            present
        })
        .collect()
}

/// Resolve the file set for one run.
///
/// With `changed_only` the root is ignored and the set comes from `vcs`
/// without suffix filtering; otherwise it is a suffix-filtered walk of
/// `root`. Either way every returned path exists.
pub fn discover(
    root: &Path,
    changed_only: bool,
    suffix: &str,
    vcs: &dyn ChangedFiles,
) -> Result<FileSet> {
    let files = if changed_only {
        let output = vcs.diff_name_only()?;
        if output.trim().is_empty() {
            Vec::new()
        } else {
            resolve_changed_files(&vcs.base_dir()?, &output)
        }
    } else {
        walk_sources(root, suffix)?
    };
    tracing::debug!(count = files.len(), changed_only, "discovered files");
    Ok(files)
}
