use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use telescope_editor::{AltChoice, DropPosition, Mutation, MutationEffect};
use telescope_parser::LineAddress;

use super::open_session;
use crate::address::{parse_address, parse_choice};
use crate::config::Config;

/// Drop side relative to the target
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Before,
    After,
}

impl From<Position> for DropPosition {
    fn from(position: Position) -> Self {
        match position {
            Position::Before => DropPosition::Before,
            Position::After => DropPosition::After,
        }
    }
}

#[derive(Args, Debug)]
pub struct MoveParagraphArgs {
    /// Markdown file to edit
    pub file: PathBuf,

    /// Index of the paragraph to move
    pub from: usize,

    /// Index of the paragraph to drop on
    pub target: usize,

    /// Drop before or after the target
    #[arg(short, long, value_enum, default_value = "before")]
    pub position: Position,
}

#[derive(Args, Debug)]
pub struct MoveSentenceArgs {
    /// Markdown file to edit
    pub file: PathBuf,

    /// Sentence-line to move (PARAGRAPH:LINE)
    #[arg(value_parser = parse_address)]
    pub from: LineAddress,

    /// Sentence-line to drop on (PARAGRAPH:LINE)
    #[arg(value_parser = parse_address)]
    pub to: LineAddress,

    /// Drop before or after the target
    #[arg(short, long, value_enum, default_value = "before")]
    pub position: Position,
}

#[derive(Subcommand, Debug)]
pub enum AltCommand {
    /// Append an alternative phrasing
    Add {
        file: PathBuf,
        #[arg(value_parser = parse_address)]
        at: LineAddress,
        text: String,
    },

    /// Show an alternative (index) or the original text
    Select {
        file: PathBuf,
        #[arg(value_parser = parse_address)]
        at: LineAddress,
        #[arg(value_parser = parse_choice)]
        choice: AltChoice,
    },

    /// Remove an alternative by index
    Delete {
        file: PathBuf,
        #[arg(value_parser = parse_address)]
        at: LineAddress,
        index: usize,
    },
}

#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Markdown file to edit
    pub file: PathBuf,

    /// Sentence-line to commit (PARAGRAPH:LINE)
    #[arg(value_parser = parse_address)]
    pub at: LineAddress,
}

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Markdown file to edit
    pub file: PathBuf,

    /// Paragraph index
    pub paragraph: usize,
}

pub fn move_paragraph(args: MoveParagraphArgs, config: &Config) -> Result<()> {
    let mutation = Mutation::MoveParagraph {
        from: args.from,
        target: args.target,
        position: args.position.into(),
    };
    run_mutation(&args.file, mutation, config)
}

pub fn move_sentence(args: MoveSentenceArgs, config: &Config) -> Result<()> {
    let mutation = Mutation::MoveSentence {
        from: args.from,
        to: args.to,
        position: args.position.into(),
    };
    run_mutation(&args.file, mutation, config)
}

pub fn alt(command: AltCommand, config: &Config) -> Result<()> {
    let (file, mutation) = match command {
        AltCommand::Add { file, at, text } => (file, Mutation::AddAlternative { at, text }),
        AltCommand::Select { file, at, choice } => {
            (file, Mutation::SelectAlternative { at, choice })
        }
        AltCommand::Delete { file, at, index } => {
            (file, Mutation::DeleteAlternative { at, index })
        }
    };
    run_mutation(&file, mutation, config)
}

pub fn commit(args: CommitArgs, config: &Config) -> Result<()> {
    run_mutation(&args.file, Mutation::CommitSentence { at: args.at }, config)
}

pub fn complete(args: CompleteArgs, config: &Config) -> Result<()> {
    let mutation = Mutation::ToggleComplete {
        paragraph: args.paragraph,
    };
    run_mutation(&args.file, mutation, config)
}

fn run_mutation(file: &Path, mutation: Mutation, config: &Config) -> Result<()> {
    let mut session = open_session(file, config)?;
    let result = session.apply_and_persist(&mutation)?;

    match result.effect {
        MutationEffect::Changed => {
            println!("{} {} {}", "✓".green(), mutation.name(), file.display());
        }
        MutationEffect::Unchanged => {
            println!("{} {}: nothing to change", "·".dimmed(), mutation.name());
        }
        MutationEffect::Refused => {
            println!(
                "{} Paragraph still has open alternatives; commit them before marking it complete",
                "!".yellow().bold()
            );
        }
    }

    Ok(())
}
