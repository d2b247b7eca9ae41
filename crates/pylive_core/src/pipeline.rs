//! Classify, run and format one cursor line.

use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    ExecutionRequest, ExecutionResult, FormattedAnnotation, LiveError, ScriptRunner, classify,
    format_annotation,
};

/// What the editor should do after evaluating a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveUpdate {
    /// The line is not runnable; clear any annotation.
    Skip,
    /// Show this annotation.
    Annotate(FormattedAnnotation),
    /// The run produced nothing to display.
    Nothing,
}

/// Evaluates `line` (0-based) of `text`.
///
/// Never fails: interpreter and scratch-file errors become error annotations,
/// a line outside the document becomes [`LiveUpdate::Skip`].
pub fn evaluate_line(
    runner: &ScriptRunner,
    text: &str,
    line: usize,
    file_path: &str,
    scratch_name: &str,
) -> LiveUpdate {
    let request = match ExecutionRequest::prefix(text, line) {
        Ok(request) => request,
        Err(e) => {
            debug!("Skipping evaluation: {}", e);
            return LiveUpdate::Skip;
        }
    };

    if !classify(request.target_text()).is_runnable() {
        debug!("Line {} is not runnable", line);
        return LiveUpdate::Skip;
    }

    let result = match runner.run(&request, scratch_name) {
        Ok(result) => result,
        Err(e) => {
            warn!("Execution failed: {}", e);
            failed_run(e)
        }
    };

    match format_annotation(&result, line, request.line_count(), file_path) {
        Some(annotation) => LiveUpdate::Annotate(annotation),
        None => LiveUpdate::Nothing,
    }
}

fn failed_run(error: LiveError) -> ExecutionResult {
    ExecutionResult::from_error(error.to_string(), Some(Duration::ZERO))
}
