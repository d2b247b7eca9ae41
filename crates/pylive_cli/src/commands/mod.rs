//! Subcommand implementations

pub mod classify;
pub mod exec;
pub mod init;
pub mod lsp;
pub mod run;

pub use classify::run_classify;
pub use exec::run_exec;
pub use init::run_init;
pub use lsp::run_lsp;
pub use run::run_line;
