//! # Telescope Editor
//!
//! Text-surgery engine and view model for telescopic writing.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: markdown text → paragraphs + model  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Move paragraphs and sentence-lines       │
//! │  - Alternatives, selection, completion      │
//! │  - Persist through a FileStore              │
//! │  - Suppress reloads of our own writes       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ serializer: model → normalized markdown     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The file is the database**: alternatives and flags live in `%%` comments
//! 2. **Positional addressing**: operations take indices from the latest render
//! 3. **All or nothing**: a rejected edit or failed write leaves state untouched
//!
//! ## Usage
//!
//! ```rust,ignore
//! use telescope_editor::{EditSession, MemoryStore, Mutation, AltChoice};
//! use telescope_parser::LineAddress;
//!
//! let store = MemoryStore::with_file("draft.md", "First line.\nSecond line.");
//! let mut session = EditSession::open("main", store, "draft.md")?;
//!
//! let at = LineAddress::new(0, 1);
//! session.apply_and_persist(&Mutation::AddAlternative { at, text: "Second line, revised.".into() })?;
//! session.apply_and_persist(&Mutation::SelectAlternative { at, choice: AltChoice::Alternative(0) })?;
//! ```

mod document;
mod errors;
mod mutations;
mod queries;
mod session;
mod store;
mod surgery;
mod undo_stack;

pub use document::Document;
pub use errors::EditorError;
pub use mutations::{AltChoice, DropPosition, Mutation, MutationEffect, MutationError, MutationResult};
pub use queries::{
    is_draggable_paragraph, line_alternatives, line_has_alternatives, paragraph_has_annotations,
    paragraph_is_complete, LineAlternatives,
};
pub use session::{EditSession, LoadOutcome};
pub use store::{FileStore, MemoryStore};
pub use surgery::Completion;
pub use undo_stack::{Revision, UndoStack};

// Re-export common types for convenience
pub use telescope_parser::ast::Document as ParsedDocument;
pub use telescope_parser::LineAddress;
