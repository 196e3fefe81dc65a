//! Error types for the workspace layer

use std::path::PathBuf;

use telescope_editor::EditorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    Notify(#[from] notify::Error),

    #[error("Cannot watch {0}: {1}")]
    Path(PathBuf, std::io::Error),

    #[error("{0} has no parent directory")]
    NoParent(PathBuf),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error(transparent)]
    Watcher(#[from] WatcherError),

    #[error(transparent)]
    Editor(#[from] EditorError),
}
