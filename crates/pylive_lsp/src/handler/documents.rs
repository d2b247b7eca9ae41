//! Document lifecycle handlers (open, change, close).

use tower_lsp::Client;
use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use crate::live::{present, schedule_update};
use crate::state::{DocumentData, SharedState};

/// Handles the `textDocument/didOpen` notification.
pub async fn handle_did_open(state: &SharedState, params: DidOpenTextDocumentParams) {
    debug!("Document opened: {}", params.text_document.uri);

    {
        let mut docs = match state.documents.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return;
            }
        };
        docs.insert(
            params.text_document.uri.clone(),
            DocumentData {
                text: params.text_document.text,
                version: params.text_document.version,
            },
        );
    }

    state.sessions.lock().open(params.text_document.uri);
}

/// Handles the `textDocument/didChange` notification.
///
/// Re-runs the editor's cursor line once edits settle.
pub async fn handle_did_change(
    state: &SharedState,
    client: &Client,
    params: DidChangeTextDocumentParams,
) {
    debug!("Document changed: {}", params.text_document.uri);

    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };
    let uri = params.text_document.uri;
    let version = params.text_document.version;

    {
        let mut docs = match state.documents.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return;
            }
        };
        if docs.get(&uri).is_some_and(|doc| doc.version > version) {
            debug!("Ignoring out-of-order change for {}", uri);
            return;
        }
        docs.insert(
            uri.clone(),
            DocumentData {
                text: change.text,
                version,
            },
        );
    }

    let has_cursor = state.sessions.lock().cursor_line(&uri).is_some();
    if has_cursor {
        schedule_update(state, client, uri);
    }
}

/// Handles the `textDocument/didClose` notification.
pub async fn handle_did_close(
    state: &SharedState,
    client: &Client,
    params: DidCloseTextDocumentParams,
) {
    let uri = params.text_document.uri;
    debug!("Document closed: {}", uri);

    {
        let mut docs = match state.documents.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return;
            }
        };
        docs.remove(&uri);
    }

    state.debouncer.cancel(&uri);
    let transition = state.sessions.lock().close(&uri);
    present(state, client, transition).await;
}
