//! # Telescope Workspace
//!
//! Connects an [`EditSession`](telescope_editor::EditSession) to the local
//! filesystem: a [`FileStore`](telescope_editor::FileStore) over `std::fs` and
//! a watcher that turns changes of the open file into reloads.

mod errors;
mod follow;
mod fs_store;
mod watcher;

pub use errors::{WatcherError, WatcherResult, WorkspaceError};
pub use follow::{apply_pending, follow};
pub use fs_store::FsStore;
pub use watcher::FileWatcher;
