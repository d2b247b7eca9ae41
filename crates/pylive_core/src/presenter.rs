//! Single-annotation-per-editor state machine.
//!
//! The presenter owns the live annotation of every editor. Rendering is left
//! to the host: each call returns a [`Transition`] describing what to tear
//! down and what to draw, in that order.

use std::collections::HashMap;
use std::hash::Hash;

use crate::AnnotationColor;

/// An inline annotation attached to one editor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation<K> {
    pub editor: K,
    /// 0-based document line.
    pub line: usize,
    pub text: String,
    pub color: AnnotationColor,
}

/// The visible change produced by a presenter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<K> {
    /// Torn down first.
    pub removed: Option<Annotation<K>>,
    /// Installed after `removed` is gone.
    pub installed: Option<Annotation<K>>,
}

impl<K> Transition<K> {
    fn none() -> Self {
        Self {
            removed: None,
            installed: None,
        }
    }

    /// Returns `true` if nothing changed on screen.
    pub fn is_empty(&self) -> bool {
        self.removed.is_none() && self.installed.is_none()
    }
}

/// Tracks at most one live annotation per editor.
#[derive(Debug)]
pub struct AnnotationPresenter<K> {
    live: HashMap<K, Annotation<K>>,
}

impl<K: Eq + Hash + Clone> AnnotationPresenter<K> {
    pub fn new() -> Self {
        Self {
            live: HashMap::new(),
        }
    }

    /// Replaces the editor's annotation, tearing down the previous one first.
    pub fn show(&mut self, annotation: Annotation<K>) -> Transition<K> {
        let removed = self.live.remove(&annotation.editor);
        self.live
            .insert(annotation.editor.clone(), annotation.clone());

        Transition {
            removed,
            installed: Some(annotation),
        }
    }

    /// Removes the editor's annotation. Idempotent.
    pub fn clear(&mut self, editor: &K) -> Transition<K> {
        match self.live.remove(editor) {
            Some(removed) => Transition {
                removed: Some(removed),
                installed: None,
            },
            None => Transition::none(),
        }
    }

    /// The annotation currently shown for `editor`.
    pub fn current(&self, editor: &K) -> Option<&Annotation<K>> {
        self.live.get(editor)
    }

    /// Number of editors with a visible annotation.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for AnnotationPresenter<K> {
    fn default() -> Self {
        Self::new()
    }
}
