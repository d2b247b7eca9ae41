//! Client settings handler.

use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::config::apply_settings;
use crate::state::BackendState;

/// Handles the `workspace/didChangeConfiguration` notification.
pub async fn handle_did_change_configuration(
    state: &BackendState,
    params: DidChangeConfigurationParams,
) {
    debug!("Configuration changed: {}", params.settings);
    apply_settings(state, &params.settings);
}
