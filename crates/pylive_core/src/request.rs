//! Execution requests.

use crate::LiveError;

/// How a request selects the code to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Every line from the start of the document up to the target line.
    Prefix,
    /// The literal text of an explicit selection.
    Selection,
}

/// A single, immutable unit of work for the script runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    lines: Vec<String>,
    target_line: usize,
    mode: RunMode,
}

impl ExecutionRequest {
    /// Creates a prefix-mode request for `target_line` (0-based).
    pub fn prefix(full_text: &str, target_line: usize) -> Result<Self, LiveError> {
        let lines = split_lines(full_text);
        if target_line >= lines.len() {
            return Err(LiveError::LineOutOfRange {
                line: target_line,
                line_count: lines.len(),
            });
        }

        Ok(Self {
            lines,
            target_line,
            mode: RunMode::Prefix,
        })
    }

    /// Creates a selection-mode request over the selected text.
    pub fn selection(selected_text: &str) -> Result<Self, LiveError> {
        if selected_text.trim().is_empty() {
            return Err(LiveError::EmptySelection);
        }

        Ok(Self {
            lines: vec![selected_text.to_string()],
            target_line: 0,
            mode: RunMode::Selection,
        })
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn target_line(&self) -> usize {
        self.target_line
    }

    /// Number of lines in the source document.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of the target line, untrimmed.
    pub fn target_text(&self) -> &str {
        &self.lines[self.target_line]
    }

    /// Builds the script handed to the interpreter.
    ///
    /// Prefix mode terminates every line with a newline and appends one more.
    /// Selection mode passes the text through unchanged.
    pub fn script(&self) -> String {
        match self.mode {
            RunMode::Prefix => {
                let mut script = String::new();
                for line in &self.lines[..=self.target_line] {
                    script.push_str(line);
                    script.push('\n');
                }
                script.push('\n');
                script
            }
            RunMode::Selection => self.lines[0].clone(),
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
