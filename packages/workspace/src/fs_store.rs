//! File store backed by the local filesystem

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use telescope_editor::FileStore;
use tracing::debug;

/// Reads and writes files with `std::fs`. Relative paths resolve against the
/// root when one is set, otherwise against the process working directory.
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    root: Option<PathBuf>,
}

impl FsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn write(&self, path: &Path, text: &str) -> io::Result<()> {
        let path = self.resolve(path);
        debug!(path = %path.display(), bytes = text.len(), "writing file");
        fs::write(path, text)
    }
}
