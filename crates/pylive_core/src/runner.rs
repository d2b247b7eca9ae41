//! Script runner: scratch file, interpreter process, timing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::{ExecutionRequest, ExecutionResult, LiveConfig, LiveError, RunMode};

/// Message shown when selection mode is invoked without code.
pub const EMPTY_SELECTION_MESSAGE: &str = "No code selected to execute.";

/// A script written to disk for the lifetime of the guard.
///
/// The file is created exclusively under a randomized `<name>-XXXXXX.py`
/// path, so an existing file or symlink is never written through. It is
/// removed on drop, whether or not the run succeeded.
#[derive(Debug)]
pub struct ScratchFile {
    file: Option<NamedTempFile>,
}

impl ScratchFile {
    /// Writes `contents` to a new file in `dir`, creating `dir` if needed.
    pub fn create(dir: &Path, name: &str, contents: &str) -> Result<Self, LiveError> {
        fs::create_dir_all(dir)?;
        let mut file = tempfile::Builder::new()
            .prefix(&format!("{}-", name))
            .suffix(".py")
            .tempfile_in(dir)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(Self { file: Some(file) })
    }

    pub fn path(&self) -> &Path {
        match &self.file {
            Some(file) => file.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        let path = file.path().to_path_buf();
        if let Err(e) = file.close()
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!("Failed to remove scratch file {}: {}", path.display(), e);
        }
    }
}

/// Runs scripts with an external interpreter.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    interpreter: String,
    scratch_dir: PathBuf,
}

impl ScriptRunner {
    pub fn new(interpreter: impl Into<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn from_config(config: &LiveConfig) -> Self {
        Self::new(config.python_path.clone(), config.scratch_dir())
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Runs lines `0..=target_line` of `full_text`.
    pub fn run_prefix(
        &self,
        full_text: &str,
        target_line: usize,
        scratch_name: &str,
    ) -> Result<ExecutionResult, LiveError> {
        let request = ExecutionRequest::prefix(full_text, target_line)?;
        self.run(&request, scratch_name)
    }

    /// Runs the literal selected text. Blank text never spawns a process.
    pub fn run_selection(
        &self,
        selected_text: &str,
        scratch_name: &str,
    ) -> Result<ExecutionResult, LiveError> {
        let request = ExecutionRequest::selection(selected_text)?;
        self.run(&request, scratch_name)
    }

    /// Writes the request's script to a scratch file and waits for the
    /// interpreter to finish.
    ///
    /// A non-zero exit is reported through [`ExecutionResult::exit_error`],
    /// not as an `Err`. Errors are reserved for failures to write the
    /// script or start the process.
    pub fn run(
        &self,
        request: &ExecutionRequest,
        scratch_name: &str,
    ) -> Result<ExecutionResult, LiveError> {
        let scratch = ScratchFile::create(&self.scratch_dir, scratch_name, &request.script())?;
        debug!(
            "Running {} {} ({:?} mode)",
            self.interpreter,
            scratch.path().display(),
            request.mode()
        );

        let started = Instant::now();
        let output = Command::new(&self.interpreter)
            .arg(scratch.path())
            .output()
            .map_err(|source| LiveError::Spawn {
                interpreter: self.interpreter.clone(),
                source,
            })?;
        let elapsed = started.elapsed();

        let exit_error = if output.status.success() {
            None
        } else {
            Some(format!(
                "Command failed: {} \"{}\" ({})",
                self.interpreter,
                scratch.path().display(),
                output.status
            ))
        };

        let duration = match request.mode() {
            RunMode::Prefix => Some(elapsed),
            RunMode::Selection => None,
        };

        debug!("Interpreter finished in {:?}", elapsed);

        Ok(ExecutionResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_error,
            duration,
        })
    }
}
