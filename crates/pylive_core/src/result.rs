//! Execution results.

use std::time::Duration;

/// Fallback when a failed run leaves no message at all.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Captured output of one interpreter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// Set when the process exited unsuccessfully.
    pub exit_error: Option<String>,
    /// Wall-clock time, recorded for prefix runs only.
    pub duration: Option<Duration>,
}

/// Success or failure, as seen by the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    Success(&'a str),
    Failure(&'a str),
}

impl ExecutionResult {
    /// Builds a result for a run that never produced process output.
    pub fn from_error(message: impl Into<String>, duration: Option<Duration>) -> Self {
        Self {
            exit_error: Some(message.into()),
            duration,
            ..Default::default()
        }
    }

    /// A non-zero exit or any stderr text counts as failure.
    pub fn is_error(&self) -> bool {
        self.exit_error.is_some() || !self.stderr.is_empty()
    }

    /// Classifies the result, picking the error message by preference:
    /// stderr, then the process error, then a generic message.
    pub fn outcome(&self) -> Outcome<'_> {
        if !self.is_error() {
            return Outcome::Success(&self.stdout);
        }

        if !self.stderr.trim().is_empty() {
            Outcome::Failure(&self.stderr)
        } else if let Some(message) = self.exit_error.as_deref().filter(|m| !m.trim().is_empty()) {
            Outcome::Failure(message)
        } else {
            Outcome::Failure(UNKNOWN_ERROR)
        }
    }

    /// Duration formatted with two decimals, e.g. `0.12`.
    pub fn duration_seconds(&self) -> String {
        format!("{:.2}", self.duration.unwrap_or_default().as_secs_f64())
    }
}
