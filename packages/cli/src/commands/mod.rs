pub mod edit;
pub mod format;
pub mod view;
pub mod watch;

pub use edit::{
    alt, commit, complete, move_paragraph, move_sentence, AltCommand, CommitArgs, CompleteArgs,
    MoveParagraphArgs, MoveSentenceArgs,
};
pub use format::{format, FormatArgs};
pub use view::{outline, show, stats, OutlineArgs, ShowArgs, StatsArgs};
pub use watch::{watch, WatchArgs};

use anyhow::{Context, Result};
use std::path::Path;
use telescope_editor::EditSession;
use telescope_parser::{parse_with_path, Document};
use telescope_workspace::FsStore;

use crate::config::Config;

/// Parse a file for read-only commands
fn load_document(path: &Path) -> Result<Document> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    Ok(parse_with_path(&source, &path.to_string_lossy()))
}

/// Open an edit session for mutating commands
fn open_session(path: &Path, config: &Config) -> Result<EditSession<FsStore>> {
    let session = EditSession::open("cli", FsStore::new(), path)
        .with_context(|| format!("Cannot open {}", path.display()))?
        .with_history_depth(config.undo_depth);
    Ok(session)
}
