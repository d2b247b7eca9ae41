//! Heuristic classification of the line under the cursor.
//!
//! This is a best-effort gate, not a parser. It skips some runnable lines
//! (for example bare expressions such as `x + 1`) and accepts some lines
//! that the interpreter will reject (for example `return f(x)` at module
//! level). A false positive only surfaces as an interpreter error.

use std::sync::OnceLock;

use regex::Regex;

/// Prefixes that open a block. They win over the call pattern.
const BLOCK_HEADERS: &[&str] = &[
    "def ",
    "async def ",
    "class ",
    "@",
    "for ",
    "async for ",
    "while ",
    "if ",
    "elif ",
    "else:",
    "with ",
    "async with ",
    "try:",
    "except ",
    "except:",
    "finally:",
];

/// Print-style calls accepted without consulting the call pattern.
const PRINT_PREFIXES: &[&str] = &["print("];

static CALL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn call_pattern() -> &'static Regex {
    CALL_PATTERN.get_or_init(|| Regex::new(r"\w+\s*\(.*\)").expect("valid call pattern"))
}

/// Verdict for a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// The line looks like a call worth executing.
    Runnable,
    /// The line should not trigger execution.
    Skip,
}

impl LineClass {
    /// Returns `true` for [`LineClass::Runnable`].
    pub fn is_runnable(self) -> bool {
        matches!(self, LineClass::Runnable)
    }
}

/// Classifies the text of the line under the cursor.
///
/// The input is trimmed before matching.
pub fn classify(line: &str) -> LineClass {
    let line = line.trim();

    if line.is_empty() {
        return LineClass::Skip;
    }

    if BLOCK_HEADERS.iter().any(|header| line.starts_with(header)) {
        return LineClass::Skip;
    }

    let is_print = PRINT_PREFIXES.iter().any(|prefix| line.starts_with(prefix));
    if is_print || call_pattern().is_match(line) {
        LineClass::Runnable
    } else {
        LineClass::Skip
    }
}
