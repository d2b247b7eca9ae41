//! Run command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;

use pylive_core::{
    AnnotationColor, ExecutionRequest, LiveConfig, LiveUpdate, ScriptRunner, evaluate_line,
};

use crate::utils::scratch_name;

/// Evaluates `line` (1-based) the way the editor does on a cursor move.
///
/// Prints the annotation text. Returns `Ok(true)` for error annotations.
pub fn run_line(config: &LiveConfig, file: &Path, line: usize) -> Result<bool> {
    let source = std::fs::read_to_string(file).into_diagnostic()?;

    let Some(target) = line.checked_sub(1) else {
        return Err(miette::miette!("Line numbers start at 1"));
    };
    ExecutionRequest::prefix(&source, target).into_diagnostic()?;

    let runner = ScriptRunner::from_config(config);
    let file_path = file.display().to_string();

    match evaluate_line(&runner, &source, target, &file_path, &scratch_name("run")) {
        LiveUpdate::Annotate(annotation) => {
            println!("{}", annotation.text);
            Ok(annotation.color == AnnotationColor::Error)
        }
        LiveUpdate::Skip => {
            info!("Line {} is not runnable", line);
            Ok(false)
        }
        LiveUpdate::Nothing => Ok(false),
    }
}
