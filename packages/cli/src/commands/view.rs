use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use telescope_parser::{Document, DocumentStats, Paragraph};

use super::load_document;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Markdown file to display
    pub file: PathBuf,

    /// Also print hidden annotation lines (overrides config)
    #[arg(short, long)]
    pub annotations: bool,
}

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Markdown file to outline
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Markdown file to measure
    pub file: PathBuf,

    /// Print the counts as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, config: &Config) -> Result<()> {
    let doc = load_document(&args.file)?;
    let with_annotations = args.annotations || config.show_annotations;

    for (index, paragraph) in doc.paragraphs.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_paragraph(index, paragraph, with_annotations);
    }

    Ok(())
}

fn print_paragraph(index: usize, paragraph: &Paragraph, with_annotations: bool) {
    if paragraph.is_heading() {
        for line in paragraph.clean_lines() {
            println!("{:>7}  {}", format!("{}:", index).dimmed(), line.bold());
        }
        return;
    }

    let mark = if paragraph.is_complete() {
        "✓".green()
    } else {
        " ".normal()
    };

    for visible in 0..paragraph.sentence_count() {
        let Some(range) = paragraph.block_range(visible) else {
            continue;
        };
        let lines = &paragraph.lines()[range];
        let flag = if visible == 0 { mark.clone() } else { " ".normal() };
        let has_annotations = lines.len() > 1;
        let text = if has_annotations && !with_annotations {
            format!("{} {}", lines[0].text, "*".cyan())
        } else {
            lines[0].text.clone()
        };

        println!("{} {:>5}  {}", flag, format!("{}:{}", index, visible).dimmed(), text);

        if with_annotations {
            for line in &lines[1..] {
                println!("{:>7}  {}", "", line.text.dimmed());
            }
        }
    }
}

pub fn outline(args: OutlineArgs, _config: &Config) -> Result<()> {
    let doc = load_document(&args.file)?;

    for &index in &doc.leading {
        println!("{:>3}  {}", index, summary(&doc, index).dimmed());
    }

    for section in &doc.sections {
        println!("{:>3}  {}", section.heading_index, section.heading.bold());
        for member in &section.members {
            let text = if member.is_subheading {
                doc.paragraphs[member.index]
                    .heading_text()
                    .unwrap_or_default()
                    .italic()
            } else {
                summary(&doc, member.index).normal()
            };
            let indent = if member.is_subheading { "  " } else { "    " };
            println!("{:>3}  {}{}", member.index, indent, text);
        }
    }

    Ok(())
}

/// First sentence-line of a paragraph, with a completion mark
fn summary(doc: &Document, index: usize) -> String {
    let Some(paragraph) = doc.paragraph(index) else {
        return String::new();
    };
    let first = paragraph.clean_lines().first().copied().unwrap_or("").trim();
    let more = paragraph.sentence_count().saturating_sub(1);

    let mut text = first.to_string();
    if more > 0 {
        text.push_str(&format!(" (+{})", more));
    }
    if paragraph.is_complete() {
        text.push_str(" ✓");
    }
    text
}

pub fn stats(args: StatsArgs, _config: &Config) -> Result<()> {
    let doc = load_document(&args.file)?;
    let stats = DocumentStats::collect(&doc);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("📊 {}", args.file.display().to_string().bold());
    println!("   Paragraphs:        {}", stats.paragraphs);
    println!("   Sentences:         {}", stats.sentences);
    println!("   Words:             {}", stats.words);
    println!(
        "   Complete:          {} ({:.0}%)",
        stats.completed_paragraphs,
        stats.completion_ratio() * 100.0
    );
    if stats.open_alternatives > 0 {
        println!("   {} {}", "Open alternatives:".yellow(), stats.open_alternatives);
    }

    Ok(())
}
