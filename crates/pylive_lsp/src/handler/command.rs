//! Run-selected-block command.

use tower_lsp::Client;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use pylive_core::{EMPTY_SELECTION_MESSAGE, LiveError, Outcome, ScriptRunner};

use crate::conversion::range_to_text;
use crate::live::present;
use crate::protocol::{RUN_BLOCK_COMMAND, RunBlockArgs, RunBlockResponse};
use crate::state::SharedState;

/// Handles the `workspace/executeCommand` request.
///
/// The outcome is shown to the user as a message and also returned to the
/// caller as a [`RunBlockResponse`].
pub async fn handle_execute_command(
    state: &SharedState,
    client: &Client,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    debug!("Execute command: {}", params.command);

    if params.command != RUN_BLOCK_COMMAND {
        return Err(Error::invalid_params(format!(
            "Unknown command: {}",
            params.command
        )));
    }

    let args: RunBlockArgs = match params.arguments.into_iter().next() {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| Error::invalid_params(format!("Invalid arguments: {}", e)))?,
        None => return Err(Error::invalid_params("Missing command arguments")),
    };

    let (uri, selected) = match args {
        RunBlockArgs::Selection {
            text_document,
            range,
        } => {
            let selected = state
                .document_text(&text_document.uri)
                .and_then(|text| range_to_text(range, &text).map(str::to_string))
                .unwrap_or_default();
            (Some(text_document.uri), selected)
        }
        RunBlockArgs::Text { text, uri } => (uri, text),
    };

    let response = run_block(state, selected).await;

    if response.success {
        client
            .show_message(MessageType::INFO, &response.message)
            .await;
    } else {
        client
            .show_message(MessageType::ERROR, &response.message)
            .await;

        if let Some(uri) = uri {
            let transition = state.sessions.lock().clear(&uri);
            present(state, client, transition).await;
        }
    }

    serde_json::to_value(&response)
        .map(Some)
        .map_err(|e| Error::invalid_params(e.to_string()))
}

async fn run_block(state: &SharedState, selected: String) -> RunBlockResponse {
    let runner = ScriptRunner::from_config(&state.config_snapshot());
    let scratch_name = state.next_block_name();

    let joined =
        tokio::task::spawn_blocking(move || runner.run_selection(&selected, &scratch_name)).await;

    let result = match joined {
        Ok(result) => result,
        Err(e) => {
            let e = LiveError::internal(format!("Block execution task failed: {}", e));
            error!("{}", e);
            return failure(e.to_string());
        }
    };

    match result {
        Ok(result) => match result.outcome() {
            Outcome::Success(stdout) => RunBlockResponse {
                success: true,
                message: stdout.trim().to_string(),
            },
            Outcome::Failure(message) => failure(message.trim().to_string()),
        },
        Err(LiveError::EmptySelection) => failure(EMPTY_SELECTION_MESSAGE.to_string()),
        Err(e) => {
            error!("Block execution failed: {}", e);
            failure(e.to_string())
        }
    }
}

fn failure(message: String) -> RunBlockResponse {
    RunBlockResponse {
        success: false,
        message,
    }
}
