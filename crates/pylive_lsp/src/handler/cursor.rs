//! Cursor movement handler.

use tower_lsp::Client;
use tracing::debug;

use crate::live::schedule_update;
use crate::protocol::CursorMovedParams;
use crate::state::SharedState;

/// Handles the `pythonLiveExecution/cursorMoved` notification.
pub async fn handle_cursor_moved(state: &SharedState, client: &Client, params: CursorMovedParams) {
    let uri = params.text_document.uri;
    let line = params.position.line as usize;
    debug!("Cursor moved: {} line {}", uri, line);

    state.sessions.lock().set_cursor(uri.clone(), line);
    schedule_update(state, client, uri);
}
