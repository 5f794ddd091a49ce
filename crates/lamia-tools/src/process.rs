//! External process invocation with an explicit timeout.
//!
//! Every collaborator that lives outside this process (formatter, linter,
//! version control, catalog compiler) is started through [`ExternalCommand`].
//! Output pipes are drained on helper threads while the child is polled, so a
//! chatty child cannot block on a full pipe before the deadline is checked.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Result, ToolError};

/// Default timeout applied to external programs.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of a finished external program.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the program exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// A single invocation of an external program.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    timeout: Duration,
}

impl ExternalCommand {
    /// Create a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the program from `dir` instead of the current directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Override the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Command line as a single string, for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion and capture output. A non-zero exit is not an error
    /// here; callers decide what a failed status means for them.
    pub fn output(&self) -> Result<ProcessOutput> {
        tracing::debug!(command = %self.display(), "running external program");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| ToolError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let code = self.wait(&mut child)?;

        Ok(ProcessOutput {
            code,
            stdout: join_drain(stdout),
            stderr: join_drain(stderr),
        })
    }

    /// Run to completion and fail with [`ToolError::ProcessFailed`] on a
    /// non-zero exit. `stage` names the step in the error message.
    pub fn run_checked(&self, stage: &str) -> Result<ProcessOutput> {
        let output = self.output()?;
        if !output.success() {
            return Err(ToolError::ProcessFailed {
                program: self.program.clone(),
                stage: stage.to_string(),
                code: output.code,
                stderr: output.stderr,
            });
        }
        Ok(output)
    }

    fn wait(&self, child: &mut Child) -> Result<Option<i32>> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let polled = child.try_wait().map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;
            if let Some(status) = polled {
                return Ok(status.code());
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(command = %self.display(), "external program timed out");
                return Err(ToolError::Timeout {
                    program: self.program.clone(),
                    seconds: self.timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_drain(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = ExternalCommand::new("pybabel").args(["compile", "-l", "en"]);
        assert_eq!(cmd.display(), "pybabel compile -l en");
    }

    #[test]
    fn test_output_captures_stdout() {
        let output = ExternalCommand::new("sh")
            .args(["-c", "echo hello"])
            .output()
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn test_run_checked_reports_exit_code() {
        let err = ExternalCommand::new("sh")
            .args(["-c", "echo broken >&2; exit 3"])
            .run_checked("extract")
            .unwrap_err();
        match err {
            ToolError::ProcessFailed {
                stage, code, stderr, ..
            } => {
                assert_eq!(stage, "extract");
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timeout_kills_child() {
        let err = ExternalCommand::new("sleep")
            .arg("5")
            .timeout(Duration::from_millis(100))
            .output()
            .unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = ExternalCommand::new("definitely-not-a-real-program-xyz")
            .output()
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }
}
