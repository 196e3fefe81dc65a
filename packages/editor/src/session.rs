//! # Edit Session
//!
//! The view model for one open file. It owns the parsed document, runs edits
//! against it, writes the result through the file store and answers reload
//! notifications from the host.
//!
//! Writes are transactional from the caller's point of view: the edit runs on
//! a copy, and the copy replaces the in-memory document only after the write
//! succeeded. A write this session triggered will come back as a change
//! notification. The session remembers the text it wrote last and swallows
//! one load carrying exactly that text. Any other text is reloaded.

use std::path::PathBuf;

use telescope_parser::ast::Document as ParsedDocument;
use telescope_parser::{parse, serialize};
use tracing::{debug, info, warn};

use crate::store::FileStore;
use crate::undo_stack::{Revision, UndoStack};
use crate::{Document, EditorError, Mutation, MutationEffect, MutationResult};

/// What a load notification did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Ignored: it echoed this session's own write
    Suppressed,
    /// Document re-parsed from the new text
    Reloaded,
}

/// Editing session for a single file
pub struct EditSession<S: FileStore> {
    /// Session identifier (for logs)
    pub id: String,

    document: Document,
    store: S,
    history: UndoStack,
    pending_write: Option<String>,
}

impl<S: FileStore> EditSession<S> {
    /// Open a file and parse it
    pub fn open(id: impl Into<String>, store: S, path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let document = Document::open(&store, path.into())?;
        let id = id.into();
        info!(session = %id, path = %document.path.display(), "opened document");

        Ok(Self {
            id,
            document,
            store,
            history: UndoStack::new(),
            pending_write: None,
        })
    }

    /// Limit undo history (0 = unlimited)
    pub fn with_history_depth(mut self, max_levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(max_levels);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Parsed model the UI renders from
    pub fn model(&self) -> &ParsedDocument {
        self.document.model()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn self_write_pending(&self) -> bool {
        self.pending_write.is_some()
    }

    /// Current index of the paragraph with this id
    pub fn paragraph_index(&self, id: &str) -> Option<usize> {
        self.model().paragraph_by_id(id).map(|(index, _)| index)
    }

    /// Run a mutation, write the result and adopt it.
    ///
    /// Nothing is written when the mutation leaves the text unchanged. If the
    /// write fails, the in-memory document keeps its previous state.
    pub fn apply_and_persist(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let current = self.document.model();
        let mut next = current.clone();
        let effect = mutation.apply(&mut next)?;

        if effect == MutationEffect::Refused {
            warn!(session = %self.id, "completion refused: paragraph has open alternatives");
        }

        if next == *current {
            debug!(session = %self.id, mutation = mutation.name(), "nothing to write");
            return Ok(MutationResult {
                version: self.document.version,
                effect,
            });
        }

        let revision = Revision::new(current.raw_paragraphs(), next.raw_paragraphs())
            .with_description(mutation.name());

        self.persist(next)?;
        self.history.push(revision);

        debug!(
            session = %self.id,
            mutation = mutation.name(),
            version = self.document.version,
            "persisted"
        );
        Ok(MutationResult {
            version: self.document.version,
            effect,
        })
    }

    /// Host notification that the file has new contents
    pub fn handle_load(&mut self, text: &str) -> LoadOutcome {
        if let Some(written) = self.pending_write.take() {
            if written == text {
                info!(session = %self.id, "ignoring load triggered by own write");
                return LoadOutcome::Suppressed;
            }
            info!(session = %self.id, "file changed after our write");
        }

        self.document.reload(text);
        self.history.clear();
        info!(session = %self.id, version = self.document.version, "reloaded from disk");
        LoadOutcome::Reloaded
    }

    /// Read the file from the store and feed it to [`handle_load`](Self::handle_load)
    pub fn reload(&mut self) -> Result<LoadOutcome, EditorError> {
        let text = self.store.read(&self.document.path)?;
        Ok(self.handle_load(&text))
    }

    /// Revert the most recent persisted edit
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let Some(revision) = self.history.pop_undo() else {
            return Ok(false);
        };

        let mut next = self.document.model().clone();
        next.replace_paragraphs(&revision.before);

        match self.persist(next) {
            Ok(()) => {
                self.history.push_redo(revision);
                Ok(true)
            }
            Err(err) => {
                self.history.push_undone(revision);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone edit
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let Some(revision) = self.history.pop_redo() else {
            return Ok(false);
        };

        let mut next = self.document.model().clone();
        next.replace_paragraphs(&revision.after);

        match self.persist(next) {
            Ok(()) => {
                self.history.push_undone(revision);
                Ok(true)
            }
            Err(err) => {
                self.history.push_redo(revision);
                Err(err)
            }
        }
    }

    fn persist(&mut self, mut next: ParsedDocument) -> Result<(), EditorError> {
        let text = serialize(&next);

        if let Err(err) = self.store.write(&self.document.path, &text) {
            warn!(session = %self.id, error = %err, "write failed; keeping previous state");
            return Err(err.into());
        }

        // Keep the model identical to what a re-read of the file would give
        let written = parse(&text).raw_paragraphs();
        if written != next.raw_paragraphs() {
            debug!(session = %self.id, "normalized paragraphs on write");
            next.replace_paragraphs(&written);
        }

        self.pending_write = Some(text);
        self.document.replace_model(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::DropPosition;
    use std::path::Path;

    fn session(text: &str) -> (EditSession<MemoryStore>, MemoryStore) {
        let store = MemoryStore::with_file("draft.md", text);
        let session = EditSession::open("client-1", store.clone(), "draft.md").unwrap();
        (session, store)
    }

    fn swap() -> Mutation {
        Mutation::MoveParagraph {
            from: 0,
            target: 1,
            position: DropPosition::After,
        }
    }

    #[test]
    fn test_session_creation() {
        let (session, _) = session("One.\n\nTwo.");
        assert_eq!(session.id, "client-1");
        assert_eq!(session.model().paragraphs.len(), 2);
        assert!(!session.self_write_pending());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_apply_and_persist_writes_file() {
        let (mut session, store) = session("One.\n\nTwo.");

        let result = session.apply_and_persist(&swap()).unwrap();
        assert_eq!(result.effect, MutationEffect::Changed);
        assert_eq!(result.version, 1);
        assert_eq!(store.contents(Path::new("draft.md")).as_deref(), Some("Two.\n\nOne."));
        assert!(session.self_write_pending());
    }

    #[test]
    fn test_self_write_suppresses_one_load() {
        let (mut session, store) = session("One.\n\nTwo.");
        session.apply_and_persist(&swap()).unwrap();

        // Echo of our own write
        assert_eq!(session.reload().unwrap(), LoadOutcome::Suppressed);
        assert!(!session.self_write_pending());

        // A genuine external edit afterwards is picked up
        store.insert("draft.md", "Three.");
        assert_eq!(session.reload().unwrap(), LoadOutcome::Reloaded);
        assert_eq!(session.model().raw_paragraphs(), vec!["Three."]);
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let (mut session, store) = session("One.\n\nTwo.");
        store.set_fail_writes(true);

        let err = session.apply_and_persist(&swap()).unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
        assert_eq!(session.model().raw_paragraphs(), vec!["One.", "Two."]);
        assert_eq!(session.document().version, 0);
        assert!(!session.self_write_pending());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_unchanged_mutation_does_not_write() {
        let (mut session, _) = session("One.\n\nTwo.");
        let noop = Mutation::MoveParagraph {
            from: 1,
            target: 1,
            position: DropPosition::After,
        };

        let result = session.apply_and_persist(&noop).unwrap();
        assert_eq!(result.effect, MutationEffect::Unchanged);
        assert!(!session.self_write_pending());
    }

    #[test]
    fn test_undo_and_redo() {
        let (mut session, store) = session("One.\n\nTwo.");
        session.apply_and_persist(&swap()).unwrap();

        assert!(session.undo().unwrap());
        assert_eq!(store.contents(Path::new("draft.md")).as_deref(), Some("One.\n\nTwo."));
        assert_eq!(session.history().redo_description(), Some("move paragraph"));

        assert!(session.redo().unwrap());
        assert_eq!(store.contents(Path::new("draft.md")).as_deref(), Some("Two.\n\nOne."));

        assert!(!session.redo().unwrap());
    }

    #[test]
    fn test_external_reload_clears_history() {
        let (mut session, store) = session("One.\n\nTwo.");
        session.apply_and_persist(&swap()).unwrap();
        assert_eq!(session.handle_load("Two.\n\nOne."), LoadOutcome::Suppressed);

        store.insert("draft.md", "Elsewhere.");
        session.reload().unwrap();
        assert!(!session.history().can_undo());
        assert!(!session.undo().unwrap());
    }

    #[test]
    fn test_external_write_racing_ours_is_reloaded() {
        let (mut session, store) = session("One.\n\nTwo.");
        session.apply_and_persist(&swap()).unwrap();

        // Another editor saves before our change notification arrives
        store.insert("draft.md", "Two.\n\nOne.\n\nThree.");
        assert_eq!(session.reload().unwrap(), LoadOutcome::Reloaded);
        assert_eq!(session.model().raw_paragraphs(), vec!["Two.", "One.", "Three."]);
        assert!(!session.self_write_pending());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_paragraph_id_follows_moves_and_undo() {
        let (mut session, _) = session("One.\n\nTwo.\n\nThree.");
        let id = session.model().paragraphs[0].id.clone();

        session
            .apply_and_persist(&Mutation::MoveParagraph {
                from: 0,
                target: 2,
                position: DropPosition::After,
            })
            .unwrap();
        assert_eq!(session.paragraph_index(&id), Some(2));

        session.undo().unwrap();
        assert_eq!(session.paragraph_index(&id), Some(0));
        assert_eq!(session.paragraph_index("missing"), None);
    }

    #[test]
    fn test_write_splits_heading_out_of_prose_paragraph() {
        let (mut session, store) = session("Intro.\n## Part\nBody.");
        assert_eq!(session.model().paragraphs.len(), 1);

        let at = telescope_parser::LineAddress::new(0, 0);
        session
            .apply_and_persist(&Mutation::AddAlternative {
                at,
                text: "Intro, again.".to_string(),
            })
            .unwrap();

        let text = store.contents(Path::new("draft.md")).unwrap();
        assert_eq!(text, "Intro.\n%% Intro, again. %%\n\n## Part\n\nBody.");
        assert_eq!(session.model().raw_paragraphs(), vec!["Intro.\n%% Intro, again. %%", "## Part", "Body."]);
        assert!(session.model().paragraphs[1].is_heading());
        assert_eq!(session.model().sections.len(), 1);
        assert_eq!(session.handle_load(&text), LoadOutcome::Suppressed);
    }
}
