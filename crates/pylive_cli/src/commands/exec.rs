//! Exec command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::debug;

use pylive_core::{LiveConfig, LiveError, Outcome, ScriptRunner};

use crate::utils::scratch_name;

/// Runs the whole file as a selected block.
///
/// Returns `Ok(true)` when the script failed or there was nothing to run.
pub fn run_exec(config: &LiveConfig, file: &Path) -> Result<bool> {
    let source = std::fs::read_to_string(file).into_diagnostic()?;
    let runner = ScriptRunner::from_config(config);

    let result = match runner.run_selection(&source, &scratch_name("exec")) {
        Ok(result) => result,
        Err(LiveError::EmptySelection) => {
            eprintln!("{}", LiveError::EmptySelection);
            return Ok(true);
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    debug!("{} finished: {:?}", file.display(), result.exit_error);

    match result.outcome() {
        Outcome::Success(stdout) => {
            print!("{}", stdout);
            Ok(false)
        }
        Outcome::Failure(message) => {
            eprintln!("{}", message.trim_end());
            Ok(true)
        }
    }
}
