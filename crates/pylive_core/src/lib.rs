//! # pylive_core
//!
//! Core live-execution pipeline for pylive.
//!
//! This crate provides:
//! - The line classifier deciding which cursor lines are worth running
//! - The script runner (scratch file, interpreter process, timing)
//! - The output formatter turning interpreter output into annotation text
//! - A single-call pipeline gluing the three together
//! - Per-editor session state and the single-annotation presenter
//! - Configuration loading
//!
//! ## Example
//!
//! ```rust,ignore
//! use pylive_core::{ExecutionRequest, LiveConfig, ScriptRunner, classify, format_annotation};
//!
//! let config = LiveConfig::new();
//! let runner = ScriptRunner::from_config(&config);
//!
//! let text = "x = 40\nprint(x + 2)\n";
//! if classify("print(x + 2)").is_runnable() {
//!     let request = ExecutionRequest::prefix(text, 1)?;
//!     let result = runner.run(&request, "example")?;
//!     if let Some(annotation) = format_annotation(&result, 1, request.line_count(), "example.py") {
//!         println!("{}", annotation.text);
//!     }
//! }
//! ```

mod classifier;
mod config;
mod error;
mod formatter;
mod pipeline;
mod presenter;
mod request;
mod result;
mod runner;
mod session;

pub use classifier::{LineClass, classify};
pub use config::LiveConfig;
pub use error::LiveError;
pub use formatter::{
    AnnotationColor, ERROR_COLOR, ErrorLocation, FormattedAnnotation, format_annotation,
    parse_error_location,
};
pub use pipeline::{LiveUpdate, evaluate_line};
pub use presenter::{Annotation, AnnotationPresenter, Transition};
pub use request::{ExecutionRequest, RunMode};
pub use result::{ExecutionResult, Outcome};
pub use runner::{EMPTY_SELECTION_MESSAGE, ScratchFile, ScriptRunner};
pub use session::{RequestToken, SessionRegistry};
