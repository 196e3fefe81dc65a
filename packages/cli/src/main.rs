mod address;
mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    alt, commit, complete, format, move_paragraph, move_sentence, outline, show, stats, watch,
    AltCommand, CommitArgs, CompleteArgs, FormatArgs, MoveParagraphArgs, MoveSentenceArgs,
    OutlineArgs, ShowArgs, StatsArgs, WatchArgs,
};
use config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Telescope - expand and contract markdown drafts sentence by sentence
#[derive(Parser, Debug)]
#[command(name = "telescope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the clean view with line addresses
    Show(ShowArgs),

    /// Print the section outline
    Outline(OutlineArgs),

    /// Print word, sentence and completion counts
    Stats(StatsArgs),

    /// Normalize heading spacing and blank-line runs
    Format(FormatArgs),

    /// Move a paragraph before or after another paragraph
    MoveParagraph(MoveParagraphArgs),

    /// Move a sentence-line together with its annotations
    MoveSentence(MoveSentenceArgs),

    /// Manage alternative phrasings of a sentence-line
    Alt {
        #[command(subcommand)]
        command: AltCommand,
    },

    /// Keep the visible text of a sentence-line and drop its alternatives
    Commit(CommitArgs),

    /// Toggle the completion flag of a paragraph
    Complete(CompleteArgs),

    /// Follow a file and report every change
    Watch(WatchArgs),
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;
    init_tracing(&config.log_level);
    debug!(?config, cwd = %cwd.display(), "loaded config");

    match cli.command {
        Command::Show(args) => show(args, &config),
        Command::Outline(args) => outline(args, &config),
        Command::Stats(args) => stats(args, &config),
        Command::Format(args) => format(args, &config),
        Command::MoveParagraph(args) => move_paragraph(args, &config),
        Command::MoveSentence(args) => move_sentence(args, &config),
        Command::Alt { command } => alt(command, &config),
        Command::Commit(args) => commit(args, &config),
        Command::Complete(args) => complete(args, &config),
        Command::Watch(args) => watch(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
