//! # File Store
//!
//! The host's file API, reduced to what the editor needs: read the whole file
//! and write it back. Change notifications arrive separately through
//! [`EditSession::handle_load`](crate::EditSession::handle_load).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub trait FileStore {
    fn read(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, text: &str) -> io::Result<()>;
}

/// In-memory store. Clones share the same files, so a test can keep a handle
/// and inspect what the session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: Rc<RefCell<HashMap<PathBuf, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(path, text);
        store
    }

    /// Put a file in place without going through `write`
    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), text.into());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Make every subsequent write fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl FileStore for MemoryStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }

    fn write(&self, path: &Path, text: &str) -> io::Result<()> {
        if self.fail_writes.get() {
            return Err(io::Error::new(io::ErrorKind::Other, "write rejected"));
        }
        self.insert(path, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_files() {
        let store = MemoryStore::with_file("a.md", "Text.");
        let handle = store.clone();

        store.write(Path::new("a.md"), "Changed.").unwrap();
        assert_eq!(handle.contents(Path::new("a.md")).as_deref(), Some("Changed."));
    }

    #[test]
    fn test_missing_file_and_failing_writes() {
        let store = MemoryStore::new();
        let err = store.read(Path::new("missing.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        store.set_fail_writes(true);
        assert!(store.write(Path::new("a.md"), "x").is_err());
        assert!(store.contents(Path::new("a.md")).is_none());
    }
}
