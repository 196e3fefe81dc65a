use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use telescope_parser::{parse_with_path, serialize};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Markdown files to format
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Report files that would change without writing them
    #[arg(long)]
    pub check: bool,
}

pub fn format(args: FormatArgs, _config: &Config) -> Result<()> {
    let mut changed = 0;

    for file in &args.files {
        let source = fs::read_to_string(file)
            .with_context(|| format!("Cannot read {}", file.display()))?;
        let formatted = formatted_text(&source, &file.to_string_lossy());

        if formatted == source {
            println!("  {} {}", "✓".green(), file.display());
            continue;
        }

        changed += 1;
        if args.check {
            println!("  {} {} would be reformatted", "✗".red(), file.display());
        } else {
            fs::write(file, &formatted)
                .with_context(|| format!("Cannot write {}", file.display()))?;
            println!("  {} {} reformatted", "✎".yellow(), file.display());
        }
    }

    if args.check && changed > 0 {
        return Err(anyhow!("{} file(s) are not formatted", changed));
    }

    Ok(())
}

fn formatted_text(source: &str, path: &str) -> String {
    serialize(&parse_with_path(source, path))
}
