//! Turns interpreter output into annotation text.

use std::sync::OnceLock;

use regex::Regex;

use crate::{ExecutionResult, Outcome};

/// Color token used for every error annotation.
pub const ERROR_COLOR: &str = "red";

static FILE_LINE_PATTERN: OnceLock<Regex> = OnceLock::new();
static CARET_PATTERN: OnceLock<Regex> = OnceLock::new();

fn file_line_pattern() -> &'static Regex {
    FILE_LINE_PATTERN
        .get_or_init(|| Regex::new(r#"File ".*?", line (\d+)"#).expect("valid file pattern"))
}

fn caret_pattern() -> &'static Regex {
    CARET_PATTERN.get_or_init(|| Regex::new(r"\n( *\^)").expect("valid caret pattern"))
}

/// Which color token an annotation is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationColor {
    /// The configured inline color.
    Normal,
    /// Always [`ERROR_COLOR`].
    Error,
}

impl AnnotationColor {
    /// Resolves the token against the configured inline color.
    pub fn token<'a>(&self, inline_color: &'a str) -> &'a str {
        match self {
            AnnotationColor::Normal => inline_color,
            AnnotationColor::Error => ERROR_COLOR,
        }
    }
}

/// Annotation text together with the line it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedAnnotation {
    /// 0-based document line.
    pub line: usize,
    pub text: String,
    pub color: AnnotationColor,
}

/// Markers found in interpreter error text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorLocation {
    /// 1-based line from the first `File "...", line N` marker.
    pub line: Option<usize>,
    /// Number of spaces before the caret on the first caret line.
    pub caret_offset: Option<usize>,
}

/// Scans error text for the file/line marker and the caret line.
pub fn parse_error_location(text: &str) -> ErrorLocation {
    let line = file_line_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    let caret_offset = caret_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().len() - 1);

    ErrorLocation { line, caret_offset }
}

/// Formats a run result for display.
///
/// `current_line` is the 0-based trigger line and `line_count` the number of
/// lines in the document. Returns `None` when there is nothing to show.
pub fn format_annotation(
    result: &ExecutionResult,
    current_line: usize,
    line_count: usize,
    file_path: &str,
) -> Option<FormattedAnnotation> {
    let duration = result.duration_seconds();

    match result.outcome() {
        Outcome::Success(stdout) => {
            let last = stdout
                .trim()
                .lines()
                .map(str::trim)
                .rfind(|line| !line.is_empty())?;

            Some(FormattedAnnotation {
                line: current_line,
                text: format!("{} (Execution Time: {}s)", last, duration),
                color: AnnotationColor::Normal,
            })
        }
        Outcome::Failure(message) => {
            let output = format!("Error: {}", message.trim());
            let location = parse_error_location(&output);

            let error_line = location.line.unwrap_or(current_line + 1);
            let mut text = format!(
                "Error in file: {} at line {}\n{}",
                file_path, error_line, output
            );
            if let Some(offset) = location.caret_offset {
                text.push_str(&format!(
                    "\n{}^ (Execution Time: {}s)",
                    " ".repeat(offset),
                    duration
                ));
            }

            let last_line = line_count.saturating_sub(1);
            Some(FormattedAnnotation {
                line: error_line.saturating_sub(1).min(last_line),
                text,
                color: AnnotationColor::Error,
            })
        }
    }
}
