//! Live re-execution: debounce, evaluate, present.

use std::sync::atomic::Ordering;

use tower_lsp::Client;
use tower_lsp::lsp_types::Url;
use tracing::{debug, error};

use pylive_core::{LiveUpdate, ScriptRunner, Transition, evaluate_line};

use crate::protocol::{AnnotationNotification, AnnotationParams};
use crate::state::SharedState;

/// Arms a debounced live update for `uri` at its last known cursor line.
pub fn schedule_update(state: &SharedState, client: &Client, uri: Url) {
    let delay = state.config_snapshot().execution_delay();
    let state_for_task = SharedState::clone(state);
    let client = client.clone();
    let key = uri.clone();

    state.debouncer.schedule(key, delay, async move {
        update_output(&state_for_task, &client, uri).await;
    });
}

/// Evaluates the cursor line of `uri` and presents the result.
///
/// The result is dropped if a newer request for the same editor started
/// while the interpreter was running.
pub async fn update_output(state: &SharedState, client: &Client, uri: Url) {
    let Some(line) = state.sessions.lock().cursor_line(&uri) else {
        debug!("No cursor position for {}", uri);
        return;
    };
    let Some(text) = state.document_text(&uri) else {
        debug!("Document not cached: {}", uri);
        return;
    };

    debug!("Evaluating line {} of {}", line, uri);

    let Some(token) = state.sessions.lock().begin_request(uri.clone()) else {
        debug!("Session closed before evaluation: {}", uri);
        return;
    };
    let runner = ScriptRunner::from_config(&state.config_snapshot());
    let file_path = display_path(&uri);
    let scratch_name = token.scratch_name("pylive");

    let evaluated = tokio::task::spawn_blocking(move || {
        evaluate_line(&runner, &text, line, &file_path, &scratch_name)
    })
    .await;

    let update = match evaluated {
        Ok(update) => update,
        Err(e) => {
            error!("Evaluation task failed: {}", e);
            return;
        }
    };

    let annotation = match update {
        LiveUpdate::Annotate(annotation) => Some(annotation),
        LiveUpdate::Skip | LiveUpdate::Nothing => None,
    };

    let transition = state.sessions.lock().complete(&token, annotation);
    match transition {
        Some(transition) => present(state, client, transition).await,
        None => debug!("Discarding stale result for {}", uri),
    }
}

/// Sends a presenter transition to the client, teardown first.
pub async fn present(state: &SharedState, client: &Client, transition: Transition<Url>) {
    if transition.is_empty() {
        return;
    }

    let inline_color = state.config_snapshot().inline_color;

    if let Some(removed) = &transition.removed {
        client
            .send_notification::<AnnotationNotification>(AnnotationParams::remove(
                removed,
                &inline_color,
            ))
            .await;
    }

    if let Some(installed) = &transition.installed {
        client
            .send_notification::<AnnotationNotification>(AnnotationParams::show(
                installed,
                &inline_color,
            ))
            .await;
    }

    if state.inlay_hint_refresh.load(Ordering::Relaxed)
        && let Err(e) = client.inlay_hint_refresh().await
    {
        debug!("Inlay hint refresh failed: {}", e);
    }
}

/// File path shown in error annotations.
pub fn display_path(uri: &Url) -> String {
    match uri.to_file_path() {
        Ok(path) => path.display().to_string(),
        Err(_) => uri.to_string(),
    }
}
