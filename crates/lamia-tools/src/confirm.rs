//! Confirmation gate for destructive operations.
//!
//! The gate either trusts an explicit skip flag or reads a single line and
//! authorizes only when it is exactly the expected token. It performs no side
//! effect besides the prompt and the cancellation notice; callers act on the
//! returned [`Decision`].

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{Result, ToolError};

/// Token that authorizes dropping the schema.
pub const DROP_TOKEN: &str = "yes";

/// Prompt shown before dropping the schema.
pub const DROP_PROMPT: &str =
    "This will drop all tables in the database. Type 'yes' to continue: ";

/// Printed when the operator does not type the token.
pub const CANCELLED_NOTICE: &str = "Operation cancelled.";

/// Outcome of a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Denied,
}

impl Decision {
    pub fn is_confirmed(self) -> bool {
        self == Decision::Confirmed
    }
}

/// Interactive confirmation over a line reader and a writer.
pub struct Confirmation<R, W> {
    input: R,
    output: W,
}

impl Confirmation<StdinLock<'static>, Stdout> {
    /// Gate reading from stdin and prompting on stdout.
    pub fn stdio() -> Self {
        Self::with_io(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirmation<R, W> {
    /// Gate over arbitrary input/output, used by tests and scripted callers.
    pub fn with_io(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for confirmation.
    ///
    /// With `skip` set the answer is [`Decision::Confirmed`] and nothing is
    /// read or written. Otherwise `prompt` is written, one line is read and
    /// compared with `token` after removing only the line terminator. End of
    /// input counts as an empty answer.
    pub fn confirm(&mut self, skip: bool, prompt: &str, token: &str) -> Result<Decision> {
        if skip {
            tracing::debug!("confirmation skipped by flag");
            return Ok(Decision::Confirmed);
        }

        self.output
            .write_all(prompt.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(ToolError::Prompt)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(ToolError::Prompt)?;

        if strip_line_terminator(&line) == token {
            return Ok(Decision::Confirmed);
        }

        writeln!(self.output, "{CANCELLED_NOTICE}").map_err(ToolError::Prompt)?;
        Ok(Decision::Denied)
    }

    /// Give back the writer, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }
}

fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
