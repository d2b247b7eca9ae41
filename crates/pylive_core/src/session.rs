//! Per-editor session state.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::{Annotation, AnnotationPresenter, FormattedAnnotation, Transition};

/// Identifies one execution request of one editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken<K> {
    pub editor: K,
    pub sequence: u64,
}

impl<K: Hash> RequestToken<K> {
    /// Scratch file stem unique to this process, editor and request.
    pub fn scratch_name(&self, prefix: &str) -> String {
        let mut hasher = DefaultHasher::new();
        self.editor.hash(&mut hasher);
        format!(
            "{}-{}-{:016x}-{}",
            prefix,
            std::process::id(),
            hasher.finish(),
            self.sequence
        )
    }
}

#[derive(Debug, Default)]
struct EditorSession {
    sequence: u64,
    cursor_line: Option<usize>,
}

/// Sessions keyed by editor identity, plus their annotations.
///
/// Sequence numbers come from one registry-wide counter, so a token issued
/// before an editor was closed can never match a session opened later.
#[derive(Debug)]
pub struct SessionRegistry<K> {
    sessions: HashMap<K, EditorSession>,
    presenter: AnnotationPresenter<K>,
    next_sequence: u64,
}

impl<K: Eq + Hash + Clone> SessionRegistry<K> {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            presenter: AnnotationPresenter::new(),
            next_sequence: 0,
        }
    }

    /// Creates the session for `editor` if it does not exist yet.
    pub fn open(&mut self, editor: K) {
        self.sessions.entry(editor).or_default();
    }

    /// Destroys the session, its annotation and any pending request.
    pub fn close(&mut self, editor: &K) -> Transition<K> {
        self.sessions.remove(editor);
        self.presenter.clear(editor)
    }

    pub fn contains(&self, editor: &K) -> bool {
        self.sessions.contains_key(editor)
    }

    /// Records the cursor line, opening the session if needed.
    pub fn set_cursor(&mut self, editor: K, line: usize) {
        self.sessions.entry(editor).or_default().cursor_line = Some(line);
    }

    pub fn cursor_line(&self, editor: &K) -> Option<usize> {
        self.sessions.get(editor).and_then(|s| s.cursor_line)
    }

    /// Starts a new request, superseding every earlier one for `editor`.
    ///
    /// Returns `None` if the editor has no session, e.g. it was closed while
    /// the request was being prepared.
    pub fn begin_request(&mut self, editor: K) -> Option<RequestToken<K>> {
        let session = self.sessions.get_mut(&editor)?;
        self.next_sequence += 1;
        session.sequence = self.next_sequence;
        Some(RequestToken {
            editor,
            sequence: self.next_sequence,
        })
    }

    /// Whether `token` belongs to the latest request of a live session.
    pub fn is_current(&self, token: &RequestToken<K>) -> bool {
        self.sessions
            .get(&token.editor)
            .is_some_and(|s| s.sequence == token.sequence)
    }

    /// Applies the result of `token`'s request.
    ///
    /// `Some(annotation)` replaces the editor's annotation, `None` clears it.
    /// Returns `None` without touching anything if the token is stale.
    pub fn complete(
        &mut self,
        token: &RequestToken<K>,
        annotation: Option<FormattedAnnotation>,
    ) -> Option<Transition<K>> {
        if !self.is_current(token) {
            return None;
        }

        let transition = match annotation {
            Some(formatted) => self.presenter.show(Annotation {
                editor: token.editor.clone(),
                line: formatted.line,
                text: formatted.text,
                color: formatted.color,
            }),
            None => self.presenter.clear(&token.editor),
        };
        Some(transition)
    }

    /// Clears the editor's annotation and supersedes its pending request.
    pub fn clear(&mut self, editor: &K) -> Transition<K> {
        if let Some(session) = self.sessions.get_mut(editor) {
            self.next_sequence += 1;
            session.sequence = self.next_sequence;
        }
        self.presenter.clear(editor)
    }

    pub fn annotation(&self, editor: &K) -> Option<&Annotation<K>> {
        self.presenter.current(editor)
    }
}

impl<K: Eq + Hash + Clone> Default for SessionRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnnotationColor;
    use pretty_assertions::assert_eq;

    fn formatted(line: usize, text: &str) -> FormattedAnnotation {
        FormattedAnnotation {
            line,
            text: text.to_string(),
            color: AnnotationColor::Normal,
        }
    }

    fn registry_with(editors: &[&'static str]) -> SessionRegistry<&'static str> {
        let mut registry = SessionRegistry::new();
        for editor in editors {
            registry.open(*editor);
        }
        registry
    }

    #[test]
    fn test_latest_token_wins() {
        let mut registry = registry_with(&["a"]);
        let first = registry.begin_request("a").unwrap();
        let second = registry.begin_request("a").unwrap();

        assert!(!registry.is_current(&first));
        assert!(registry.is_current(&second));

        // The older run finishes last but is discarded.
        let applied = registry.complete(&second, Some(formatted(1, "new")));
        assert!(applied.is_some());
        assert_eq!(registry.complete(&first, Some(formatted(0, "old"))), None);
        assert_eq!(registry.annotation(&"a").unwrap().text, "new");
    }

    #[test]
    fn test_complete_with_none_clears() {
        let mut registry = registry_with(&["a"]);
        let token = registry.begin_request("a").unwrap();
        registry.complete(&token, Some(formatted(0, "x")));

        let token = registry.begin_request("a").unwrap();
        let transition = registry.complete(&token, None).unwrap();
        assert_eq!(transition.removed.unwrap().text, "x");
        assert_eq!(registry.annotation(&"a"), None);
    }

    #[test]
    fn test_clear_supersedes_pending_request() {
        let mut registry = registry_with(&["a"]);
        let token = registry.begin_request("a").unwrap();
        registry.clear(&"a");

        assert!(!registry.is_current(&token));
        assert_eq!(registry.complete(&token, Some(formatted(0, "late"))), None);
    }

    #[test]
    fn test_close_invalidates_tokens_across_reopen() {
        let mut registry = registry_with(&["a"]);
        let stale = registry.begin_request("a").unwrap();
        registry.complete(&stale, Some(formatted(0, "x")));

        let transition = registry.close(&"a");
        assert!(transition.removed.is_some());
        assert!(!registry.contains(&"a"));

        registry.open("a");
        let fresh = registry.begin_request("a").unwrap();
        assert_ne!(stale.sequence, fresh.sequence);
        assert!(!registry.is_current(&stale));
    }

    #[test]
    fn test_cursor_tracking() {
        let mut registry = SessionRegistry::new();
        assert_eq!(registry.cursor_line(&"a"), None);

        registry.set_cursor("a", 4);
        assert!(registry.contains(&"a"));
        assert_eq!(registry.cursor_line(&"a"), Some(4));
    }

    #[test]
    fn test_scratch_names_are_unique_per_request() {
        let mut registry = registry_with(&["a", "b"]);
        let a1 = registry.begin_request("a").unwrap();
        let a2 = registry.begin_request("a").unwrap();
        let b1 = registry.begin_request("b").unwrap();

        let names = [
            a1.scratch_name("pylive"),
            a2.scratch_name("pylive"),
            b1.scratch_name("pylive"),
        ];
        assert_ne!(names[0], names[1]);
        assert_ne!(names[0], names[2]);
        assert_ne!(names[1], names[2]);
        assert!(names.iter().all(|n| n.starts_with("pylive-")));
    }

    #[test]
    fn test_no_request_for_closed_editor() {
        let mut registry = registry_with(&["a"]);
        let pending = registry.begin_request("a").unwrap();
        registry.close(&"a");

        assert_eq!(registry.begin_request("a"), None);
        assert!(!registry.contains(&"a"));
        assert_eq!(registry.complete(&pending, Some(formatted(0, "late"))), None);
        assert_eq!(registry.annotation(&"a"), None);
    }
}
