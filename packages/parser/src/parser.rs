//! # Document Parser
//!
//! Splits file text into paragraphs on blank lines and derives the section
//! outline from `##` headings. Parsing is total: any text produces a document.

use crate::ast::{Document, Paragraph, Section, SectionMember, PARAGRAPH_SEPARATOR};
use crate::id_generator::IDGenerator;

/// Parse document text with ids seeded from an anonymous path
pub fn parse(source: &str) -> Document {
    parse_with_path(source, "untitled.md")
}

/// Parse document text; paragraph ids are seeded from `path`
pub fn parse_with_path(source: &str, path: &str) -> Document {
    let mut ids = IDGenerator::new(path);

    let paragraphs = split_paragraphs(source)
        .into_iter()
        .map(|raw| Paragraph::from_raw(ids.new_id(), raw))
        .collect();

    Document::new(paragraphs, ids)
}

/// Raw paragraph texts, dropping those that are empty after trimming
pub fn split_paragraphs(source: &str) -> Vec<&str> {
    source
        .split(PARAGRAPH_SEPARATOR)
        .filter(|raw| !raw.trim().is_empty())
        .collect()
}

/// Scan paragraphs in order and group them under `##` headings.
///
/// Returns the sections and the indices of unsectioned leading paragraphs.
pub fn build_sections(paragraphs: &[Paragraph]) -> (Vec<Section>, Vec<usize>) {
    let mut sections: Vec<Section> = Vec::new();
    let mut leading = Vec::new();
    let mut current: Option<Section> = None;

    for (index, paragraph) in paragraphs.iter().enumerate() {
        match paragraph.heading_level() {
            Some(2) => {
                if let Some(mut section) = current.take() {
                    section.end = index - 1;
                    sections.push(section);
                }
                current = Some(Section {
                    heading: paragraph.heading_text().unwrap_or_default(),
                    level: 2,
                    heading_index: index,
                    end: index,
                    members: Vec::new(),
                });
            }
            level => {
                let is_subheading = level == Some(3);
                match current.as_mut() {
                    Some(section) => section.members.push(SectionMember {
                        index,
                        is_subheading,
                    }),
                    None => leading.push(index),
                }
            }
        }
    }

    if let Some(mut section) = current {
        section.end = paragraphs.len() - 1;
        sections.push(section);
    }

    (sections, leading)
}
