//! Configuration management for LSP server.

use tracing::{error, info, warn};

use pylive_core::LiveConfig;

use crate::state::BackendState;

/// Reloads configuration from the workspace root.
///
/// Keeps the current configuration if no file is found or it fails to load.
pub fn reload_config(state: &BackendState) {
    let root_guard = match state.workspace_root.read() {
        Ok(g) => g,
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let path = match root_guard.as_ref() {
        Some(p) => p,
        None => return,
    };

    if let Some(config_path) = LiveConfig::discover(path) {
        info!("Found config file: {}", config_path.display());
        match LiveConfig::from_file(&config_path) {
            Ok(config) => match state.config.write() {
                Ok(mut config_guard) => {
                    *config_guard = config;
                    info!("Loaded configuration from workspace");
                }
                Err(e) => error!("Config lock poisoned: {}", e),
            },
            Err(e) => {
                error!("Failed to load config: {}", e);
            }
        }
    }
}

/// Applies client settings on top of the current configuration.
pub fn apply_settings(state: &BackendState, settings: &serde_json::Value) {
    let mut config_guard = match state.config.write() {
        Ok(g) => g,
        Err(e) => {
            error!("Config lock poisoned: {}", e);
            return;
        }
    };

    match config_guard.with_settings(settings) {
        Ok(config) => {
            if *config_guard != config {
                info!("Configuration updated from client settings");
                *config_guard = config;
            }
        }
        Err(e) => warn!("Ignoring client settings: {}", e),
    }
}
