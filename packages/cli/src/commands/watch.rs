use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::ops::ControlFlow;
use std::path::PathBuf;
use telescope_editor::LoadOutcome;
use telescope_parser::DocumentStats;
use telescope_workspace::{follow, FileWatcher};

use super::open_session;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Markdown file to follow
    pub file: PathBuf,
}

pub fn watch(args: WatchArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.file, config)?;
    let watcher = FileWatcher::new(&args.file)
        .with_context(|| format!("Cannot watch {}", args.file.display()))?;

    println!("👀 {} {}", "Watching".green().bold(), args.file.display());
    println!("   {}", status_line(&DocumentStats::collect(session.model())));

    follow(&mut session, &watcher, |session, outcome| {
        if outcome == LoadOutcome::Reloaded {
            let stats = DocumentStats::collect(session.model());
            println!(
                "{} v{}  {}",
                "↻".cyan(),
                session.document().version,
                status_line(&stats)
            );
        }
        ControlFlow::Continue(())
    })?;

    Ok(())
}

fn status_line(stats: &DocumentStats) -> String {
    format!(
        "{} paragraphs, {} sentences, {} words, {}/{} complete, {} open",
        stats.paragraphs,
        stats.sentences,
        stats.words,
        stats.completed_paragraphs,
        stats.paragraphs,
        stats.open_alternatives
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use telescope_parser::parse;

    #[test]
    fn test_status_line() {
        let doc = parse("## H\n\n%% PARAGRAPH_COMPLETE %%\nOne two.\n\nThree.\n%% alt %%");
        assert_eq!(
            status_line(&DocumentStats::collect(&doc)),
            "2 paragraphs, 2 sentences, 3 words, 1/2 complete, 1 open"
        );
    }
}
