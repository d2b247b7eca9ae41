//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use parking_lot::Mutex;
use tower_lsp::lsp_types::Url;

use pylive_core::{LiveConfig, SessionRegistry};

use crate::debounce::Debouncer;

/// Document content and version cache.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
}

/// Shared backend state.
pub(crate) struct BackendState {
    /// Document contents cache.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Active configuration.
    pub config: RwLock<LiveConfig>,
    /// Per-editor sessions and their annotations.
    pub sessions: Mutex<SessionRegistry<Url>>,
    /// Pending live updates, one per editor.
    pub debouncer: Debouncer<Url>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
    /// Whether the client accepts `workspace/inlayHint/refresh`.
    pub inlay_hint_refresh: AtomicBool,
    block_sequence: AtomicU64,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("config", &self.config)
            .field("sessions", &"<SessionRegistry<Url>>")
            .field("workspace_root", &self.workspace_root)
            .finish()
    }
}

impl BackendState {
    /// Creates a new state with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LiveConfig::new())
    }

    /// Creates a new state with the given configuration.
    pub fn with_config(config: LiveConfig) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            config: RwLock::new(config),
            sessions: Mutex::new(SessionRegistry::new()),
            debouncer: Debouncer::new(),
            workspace_root: RwLock::new(None),
            inlay_hint_refresh: AtomicBool::new(false),
            block_sequence: AtomicU64::new(0),
        }
    }

    /// Returns a copy of the current configuration.
    pub fn config_snapshot(&self) -> LiveConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns a copy of the cached document text.
    pub fn document_text(&self, uri: &Url) -> Option<String> {
        let docs = self.documents.read().ok()?;
        docs.get(uri).map(|d| d.text.clone())
    }

    /// Scratch file stem for the next block run.
    pub fn next_block_name(&self) -> String {
        let sequence = self.block_sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("pylive-block-{}-{}", std::process::id(), sequence)
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;
