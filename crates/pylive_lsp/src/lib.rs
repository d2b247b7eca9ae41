//! pylive LSP Server
//!
//! Language Server Protocol implementation for pylive.
//! Re-runs the script prefix under the cursor and shows the last output inline.

mod config;
pub mod conversion;
pub mod debounce;
mod handler;
mod live;
pub mod protocol;
mod state;

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::info;

use pylive_core::LiveConfig;

use crate::protocol::{CURSOR_MOVED_METHOD, CursorMovedParams};
use crate::state::{BackendState, SharedState};

/// The LSP backend for pylive.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
        }
    }

    /// Creates a new backend with an initial configuration.
    ///
    /// Workspace files and client settings still apply on top of it.
    pub fn with_config(client: Client, config: LiveConfig) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::with_config(config)),
        }
    }

    /// Handles the `pythonLiveExecution/cursorMoved` notification.
    pub async fn cursor_moved(&self, params: CursorMovedParams) {
        handler::handle_cursor_moved(&self.state, &self.client, params).await;
    }

    /// Text of the live annotation for `uri`, if one is shown.
    pub fn annotation_text(&self, uri: &Url) -> Option<String> {
        self.state
            .sessions
            .lock()
            .annotation(uri)
            .map(|a| a.text.clone())
    }

    /// The active configuration.
    pub fn config(&self) -> LiveConfig {
        self.state.config_snapshot()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handler::handle_did_open(&self.state, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handler::handle_did_change(&self.state, &self.client, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handler::handle_did_close(&self.state, &self.client, params).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handler::handle_did_change_configuration(&self.state, params).await;
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        handler::handle_execute_command(&self.state, &self.client, params).await
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        handler::handle_inlay_hint(&self.state, params).await
    }
}

/// Builds the service with the protocol extensions registered.
pub fn build_service(config: LiveConfig) -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::build(move |client| Backend::with_config(client, config))
        .custom_method(CURSOR_MOVED_METHOD, Backend::cursor_moved)
        .finish()
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run(config: LiveConfig) {
    info!("pylive LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = build_service(config);
    Server::new(stdin, stdout, socket).serve(service).await;
}
