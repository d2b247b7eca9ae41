//! Protocol extensions shared with editor clients.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{Position, Range, TextDocumentIdentifier, Url};

use pylive_core::Annotation;

/// Command that runs the selected block once.
pub const RUN_BLOCK_COMMAND: &str = "pythonLiveExecution.runBlock";

/// Client to server: the cursor of an editor moved.
pub const CURSOR_MOVED_METHOD: &str = "pythonLiveExecution/cursorMoved";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorMovedParams {
    pub text_document: TextDocumentIdentifier,
    pub position: Position,
}

/// Arguments of [`RUN_BLOCK_COMMAND`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunBlockArgs {
    /// Run the text covered by `range` in a cached document.
    #[serde(rename_all = "camelCase")]
    Selection {
        text_document: TextDocumentIdentifier,
        range: Range,
    },
    /// Run literal code, optionally on behalf of a document.
    Text {
        text: String,
        #[serde(default)]
        uri: Option<Url>,
    },
}

/// Outcome returned from [`RUN_BLOCK_COMMAND`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunBlockResponse {
    pub success: bool,
    pub message: String,
}

/// Server to client: the live annotation of a document changed.
#[derive(Debug)]
pub enum AnnotationNotification {}

impl Notification for AnnotationNotification {
    type Params = AnnotationParams;
    const METHOD: &'static str = "pythonLiveExecution/annotation";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationParams {
    pub uri: Url,
    pub line: u32,
    /// `None` removes the annotation.
    pub text: Option<String>,
    pub color: String,
}

impl AnnotationParams {
    pub fn show(annotation: &Annotation<Url>, inline_color: &str) -> Self {
        Self {
            uri: annotation.editor.clone(),
            line: u32::try_from(annotation.line).unwrap_or(u32::MAX),
            text: Some(annotation.text.clone()),
            color: annotation.color.token(inline_color).to_string(),
        }
    }

    pub fn remove(annotation: &Annotation<Url>, inline_color: &str) -> Self {
        Self {
            text: None,
            ..Self::show(annotation, inline_color)
        }
    }
}
