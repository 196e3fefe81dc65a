//! # Serializer
//!
//! Joins raw paragraphs back into file text and normalizes heading spacing:
//! every heading line gets exactly one blank line before and after it, and
//! runs of three or more newlines collapse to two. Normalizing twice is a
//! no-op.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Document, PARAGRAPH_SEPARATOR};

static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Serialize a document to markdown text
pub fn serialize(doc: &Document) -> String {
    let joined = doc
        .paragraphs
        .iter()
        .map(|paragraph| paragraph.raw_text())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR);

    normalize_spacing(&joined)
}

/// Apply heading-spacing normalization to arbitrary text
pub fn normalize_spacing(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut output: Vec<&str> = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let heading = is_heading_line(line);

        if heading && output.last().is_some_and(|prev| !prev.trim().is_empty()) {
            output.push("");
        }

        output.push(line);

        if heading && lines.get(index + 1).is_some_and(|next| !next.trim().is_empty()) {
            output.push("");
        }
    }

    NEWLINE_RUN.replace_all(&output.join("\n"), "\n\n").into_owned()
}

fn is_heading_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
