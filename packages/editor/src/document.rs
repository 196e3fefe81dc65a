//! # Document Handle
//!
//! A Document is one markdown file opened through a [`FileStore`], its parsed
//! model and a version counter. Writing back is the session's job.
//!
//! ## Lifecycle
//!
//! ```text
//! Open → Parse → Mutate → Serialize → Write
//!   ↓      ↓        ↓          ↓         ↓
//! Store  Model  Surgery    Markdown    Store
//! ```

use std::path::PathBuf;

use telescope_parser::ast::Document as ParsedDocument;
use telescope_parser::parse_with_path;

use crate::store::FileStore;
use crate::EditorError;

/// Open markdown document
#[derive(Debug)]
pub struct Document {
    /// Path of the source file
    pub path: PathBuf,

    /// Current version number (increments on each change)
    pub version: u64,

    model: ParsedDocument,
}

impl Document {
    /// Read and parse a file from the store
    pub fn open(store: &dyn FileStore, path: PathBuf) -> Result<Self, EditorError> {
        let source = store.read(&path)?;
        let model = parse_with_path(&source, &path.to_string_lossy());

        Ok(Self {
            path,
            version: 0,
            model,
        })
    }

    /// Parsed model: paragraphs, sections and clean view
    pub fn model(&self) -> &ParsedDocument {
        &self.model
    }

    /// Swap in a new model, returning the previous one
    pub fn replace_model(&mut self, model: ParsedDocument) -> ParsedDocument {
        self.version += 1;
        std::mem::replace(&mut self.model, model)
    }

    /// Replace the model with freshly parsed text
    pub fn reload(&mut self, source: &str) {
        let model = parse_with_path(source, &self.path.to_string_lossy());
        self.replace_model(model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::path::Path;
    use telescope_parser::serialize;

    #[test]
    fn test_open_parses_store_contents() {
        let store = MemoryStore::with_file("draft.md", "One.\n\nTwo.");
        let doc = Document::open(&store, PathBuf::from("draft.md")).unwrap();

        assert_eq!(doc.version, 0);
        assert_eq!(doc.model().paragraphs.len(), 2);
        assert_eq!(serialize(doc.model()), "One.\n\nTwo.");
    }

    #[test]
    fn test_open_missing_file() {
        let store = MemoryStore::new();
        let err = Document::open(&store, PathBuf::from("missing.md")).unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
    }

    #[test]
    fn test_replace_and_reload_bump_version() {
        let store = MemoryStore::with_file("draft.md", "One.");
        let mut doc = Document::open(&store, PathBuf::from("draft.md")).unwrap();

        let mut next = doc.model().clone();
        next.replace_paragraphs(&["Two."]);
        let previous = doc.replace_model(next);
        assert_eq!(previous.raw_paragraphs(), vec!["One."]);
        assert_eq!(doc.version, 1);

        doc.reload("Three.\n\nFour.");
        assert_eq!(doc.version, 2);
        assert_eq!(doc.model().raw_paragraphs(), vec!["Three.", "Four."]);
        assert_eq!(doc.path, Path::new("draft.md"));
    }
}
