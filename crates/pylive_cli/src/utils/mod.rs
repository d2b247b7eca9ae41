//! CLI utility functions

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::info;

use pylive_core::LiveConfig;

use crate::cli::Cli;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Resolves the effective configuration for a command.
///
/// An explicit `--config` wins over discovery in the current directory;
/// `--python` is applied last.
pub fn load_config(cli: &Cli) -> Result<LiveConfig> {
    let mut config = match cli.config {
        Some(ref path) => LiveConfig::from_file(path).into_diagnostic()?,
        None => find_config(".")?,
    };

    if let Some(ref python) = cli.python {
        config.python_path = python.clone();
    }

    Ok(config)
}

pub fn find_config(dir: impl AsRef<Path>) -> Result<LiveConfig> {
    if let Some(path) = LiveConfig::discover(dir) {
        info!("Using config: {}", path.display());
        return LiveConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LiveConfig::new())
}

/// Scratch file name unique to this process.
pub fn scratch_name(command: &str) -> String {
    format!("pylive-{}-{}", command, std::process::id())
}
