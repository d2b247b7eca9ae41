//! Inlay hint handler rendering the live annotation.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::conversion::to_inlay_hint;
use crate::state::SharedState;

/// Handles the `textDocument/inlayHint` request.
pub async fn handle_inlay_hint(
    state: &SharedState,
    params: InlayHintParams,
) -> Result<Option<Vec<InlayHint>>> {
    debug!("Inlay hint request: {}", params.text_document.uri);

    let uri = &params.text_document.uri;
    let Some(text) = state.document_text(uri) else {
        return Ok(None);
    };

    let annotation = state.sessions.lock().annotation(uri).cloned();
    let Some(annotation) = annotation else {
        return Ok(Some(Vec::new()));
    };

    let visible = params.range.start.line..=params.range.end.line;
    let hints = to_inlay_hint(&annotation, &text)
        .filter(|hint| visible.contains(&hint.position.line))
        .into_iter()
        .collect();

    Ok(Some(hints))
}
