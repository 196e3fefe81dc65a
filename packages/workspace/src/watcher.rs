//! Change notifications for a single open file.
//!
//! The parent directory is watched rather than the file itself, so saves that
//! replace the file (write to a temp file, then rename) are still seen. A
//! single write usually produces a burst of events; bursts are coalesced into
//! one change. Which change was our own write is decided by the session, by
//! comparing the text it reads back with the text it wrote.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tracing::trace;

use crate::errors::{WatcherError, WatcherResult};

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

pub struct FileWatcher {
    path: PathBuf,
    debounce: Duration,
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
}

impl FileWatcher {
    /// Start watching an existing file
    pub fn new(path: impl AsRef<Path>) -> WatcherResult<Self> {
        let requested = path.as_ref();
        let path = fs::canonicalize(requested)
            .map_err(|err| WatcherError::Path(requested.to_path_buf(), err))?;
        let parent = path
            .parent()
            .ok_or_else(|| WatcherError::NoParent(path.clone()))?
            .to_path_buf();

        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        watcher.watch(&parent, RecursiveMode::NonRecursive)?;

        Ok(Self {
            path,
            debounce: DEFAULT_DEBOUNCE,
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Quiet period that ends a burst of events
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Canonical path of the watched file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the file changes. `None` once the watcher has shut down.
    pub fn next_change(&self) -> WatcherResult<Option<Event>> {
        loop {
            match self.receiver.recv() {
                Ok(res) => {
                    let event = res?;
                    if self.is_relevant(&event) {
                        self.drain_burst()?;
                        return Ok(Some(event));
                    }
                }
                Err(_) => return Ok(None),
            }
        }
    }

    /// Wait up to `timeout` for the file to change
    pub fn next_change_timeout(&self, timeout: Duration) -> WatcherResult<Option<Event>> {
        loop {
            match self.receiver.recv_timeout(timeout) {
                Ok(res) => {
                    let event = res?;
                    if self.is_relevant(&event) {
                        self.drain_burst()?;
                        return Ok(Some(event));
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return Ok(None)
                }
            }
        }
    }

    /// A change that already arrived, without blocking
    pub fn try_next_change(&self) -> WatcherResult<Option<Event>> {
        while let Ok(res) = self.receiver.try_recv() {
            let event = res?;
            if self.is_relevant(&event) {
                self.drain_burst()?;
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn is_relevant(&self, event: &Event) -> bool {
        let kind_matches = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
        let relevant = kind_matches && event.paths.iter().any(|p| p == &self.path);
        trace!(kind = ?event.kind, paths = ?event.paths, relevant, "watch event");
        relevant
    }

    fn drain_burst(&self) -> WatcherResult<()> {
        loop {
            match self.receiver.recv_timeout(self.debounce) {
                Ok(res) => {
                    res?;
                }
                Err(_) => return Ok(()),
            }
        }
    }
}
