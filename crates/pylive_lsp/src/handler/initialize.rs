//! Initialize and shutdown handlers.

use std::sync::atomic::Ordering;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{error, info};

use crate::config::{apply_settings, reload_config};
use crate::protocol::RUN_BLOCK_COMMAND;
use crate::state::BackendState;

/// Handles the `initialize` LSP request.
pub async fn handle_initialize(
    state: &BackendState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("pylive LSP server initializing...");

    let refresh_support = params
        .capabilities
        .workspace
        .as_ref()
        .and_then(|w| w.inlay_hint.as_ref())
        .and_then(|h| h.refresh_support)
        .unwrap_or(false);
    state
        .inlay_hint_refresh
        .store(refresh_support, Ordering::Relaxed);

    if let Some(path) = params.root_uri.and_then(|u| u.to_file_path().ok()) {
        match state.workspace_root.write() {
            Ok(mut root) => {
                *root = Some(path);
            }
            Err(e) => {
                error!("Workspace root lock poisoned: {}", e);
                return Ok(InitializeResult::default());
            }
        }

        reload_config(state);
    }

    if let Some(options) = params.initialization_options {
        apply_settings(state, &options);
    }

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    ..Default::default()
                },
            )),
            inlay_hint_provider: Some(OneOf::Left(true)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![RUN_BLOCK_COMMAND.to_string()],
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "pylive-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handles the `initialized` LSP notification.
pub async fn handle_initialized(client: &tower_lsp::Client) {
    client
        .log_message(MessageType::INFO, "pylive LSP server initialized!")
        .await;
}

/// Handles the `shutdown` LSP request.
pub async fn handle_shutdown() -> Result<()> {
    info!("pylive LSP server shutting down...");
    Ok(())
}
