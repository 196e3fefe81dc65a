//! Feeds file-change notifications into an edit session

use std::ops::ControlFlow;

use telescope_editor::{EditSession, FileStore, LoadOutcome};
use tracing::{debug, info};

use crate::errors::WorkspaceError;
use crate::watcher::FileWatcher;

/// Handle every change that has already arrived. Returns the load outcomes in
/// the order they happened.
pub fn apply_pending<S: FileStore>(
    session: &mut EditSession<S>,
    watcher: &FileWatcher,
) -> Result<Vec<LoadOutcome>, WorkspaceError> {
    let mut outcomes = Vec::new();
    while watcher.try_next_change()?.is_some() {
        outcomes.push(session.reload()?);
    }
    Ok(outcomes)
}

/// Block on the watcher and reload the session on every change until the
/// callback breaks or the watcher shuts down.
pub fn follow<S, F>(
    session: &mut EditSession<S>,
    watcher: &FileWatcher,
    mut on_load: F,
) -> Result<(), WorkspaceError>
where
    S: FileStore,
    F: FnMut(&EditSession<S>, LoadOutcome) -> ControlFlow<()>,
{
    info!(session = %session.id, path = %watcher.path().display(), "following file");

    while let Some(event) = watcher.next_change()? {
        debug!(kind = ?event.kind, "file changed");
        let outcome = session.reload()?;
        if on_load(session, outcome).is_break() {
            break;
        }
    }

    Ok(())
}
