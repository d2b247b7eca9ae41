//! Classify command implementation

use pylive_core::{LineClass, classify};

pub fn run_classify(line: &str) -> bool {
    let label = match classify(line) {
        LineClass::Runnable => "runnable",
        LineClass::Skip => "skip",
    };
    println!("{}", label);
    false
}
