//! Init command implementation

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tracing::info;

use pylive_core::LiveConfig;

const DEFAULT_CONFIG: &str = r#"{
  // Milliseconds to wait after the last cursor move or edit
  "executionDelay": 300,
  "pythonPath": "python3",
  "inlineColor": "grey"
}
"#;

/// Writes the default config file into `dir`.
///
/// The content goes to a fresh temporary file first and is then renamed into
/// place, so an existing file or symlink at the target is replaced rather
/// than written through.
pub fn run_init(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(LiveConfig::CONFIG_FILES[0]);

    let mut staged = tempfile::Builder::new()
        .prefix(".pylive-init-")
        .tempfile_in(dir)
        .into_diagnostic()?;
    staged
        .write_all(DEFAULT_CONFIG.as_bytes())
        .into_diagnostic()?;

    let persisted = if force {
        staged.persist(&config_path)
    } else {
        staged.persist_noclobber(&config_path)
    };

    match persisted {
        Ok(_) => {
            info!("Created {}", config_path.display());
            Ok(config_path)
        }
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Err(miette::miette!(
            "Config file already exists. Use --force to overwrite."
        )),
        Err(e) => Err(e.error).into_diagnostic(),
    }
}
