//! # Document Model
//!
//! A document is a list of paragraphs separated by blank lines. Each paragraph
//! keeps its raw lines exactly as stored on disk; every raw line is classified
//! once, at parse time, as visible text, blank filler or a decoded annotation.
//!
//! Sections are a read-only projection over the paragraphs and are rebuilt
//! after every structural change.

use std::collections::{HashMap, VecDeque};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::annotation::{self, Annotation};
use crate::id_generator::IDGenerator;

/// Separator between paragraphs in the source text
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Positional address of a sentence-line: paragraph index plus the index of
/// the line among that paragraph's visible lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineAddress {
    pub paragraph: usize,
    pub line: usize,
}

impl LineAddress {
    pub fn new(paragraph: usize, line: usize) -> Self {
        Self { paragraph, line }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LineKind {
    /// Visible prose (a sentence-line) or heading text
    Visible,
    /// Whitespace-only line inside a paragraph
    Blank,
    /// Hidden annotation comment
    Annotation(Annotation),
}

/// One raw line of a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawLine {
    /// Line text exactly as it appears in the file
    pub text: String,
    pub kind: LineKind,
}

impl RawLine {
    /// Classify a line of source text
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if text.trim().is_empty() {
            LineKind::Blank
        } else if let Some(annotation) = annotation::decode(&text) {
            LineKind::Annotation(annotation)
        } else {
            LineKind::Visible
        };

        Self { text, kind }
    }

    /// Build an encoded annotation line
    pub fn annotation(annotation: Annotation, indent: &str) -> Self {
        Self {
            text: annotation::encode(&annotation, indent),
            kind: LineKind::Annotation(annotation),
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.kind, LineKind::Visible)
    }

    pub fn as_annotation(&self) -> Option<&Annotation> {
        match &self.kind {
            LineKind::Annotation(annotation) => Some(annotation),
            _ => None,
        }
    }

    /// Visible line starting with `#`
    pub fn is_heading_line(&self) -> bool {
        self.is_visible() && self.text.trim_start().starts_with('#')
    }

    pub fn indent(&self) -> &str {
        annotation::indentation(&self.text)
    }
}

/// A maximal run of text between blank-line separators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Opaque identifier, stable across moves within one session
    pub id: String,
    lines: Vec<RawLine>,
}

impl Paragraph {
    /// Build a paragraph from its raw on-disk text
    pub fn from_raw(id: String, raw: &str) -> Self {
        Self {
            id,
            lines: raw.split('\n').map(RawLine::classify).collect(),
        }
    }

    pub fn from_lines(id: String, lines: Vec<RawLine>) -> Self {
        Self { id, lines }
    }

    /// Raw text, annotations included
    pub fn raw_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn lines(&self) -> &[RawLine] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut Vec<RawLine> {
        &mut self.lines
    }

    /// Visible lines with annotations stripped
    pub fn clean_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.is_visible())
            .map(|line| line.text.as_str())
            .collect()
    }

    pub fn sentence_count(&self) -> usize {
        self.lines.iter().filter(|line| line.is_visible()).count()
    }

    /// Trimmed raw text starts with `#`
    pub fn is_heading(&self) -> bool {
        self.lines
            .iter()
            .find(|line| !matches!(line.kind, LineKind::Blank))
            .map(|line| line.text.trim_start().starts_with('#'))
            .unwrap_or(false)
    }

    /// Number of leading `#` characters, if this is a heading paragraph
    pub fn heading_level(&self) -> Option<usize> {
        if !self.is_heading() {
            return None;
        }
        let raw = self.raw_text();
        Some(raw.trim_start().chars().take_while(|c| *c == '#').count())
    }

    /// Heading text without its `#` markers
    pub fn heading_text(&self) -> Option<String> {
        if !self.is_heading() {
            return None;
        }
        self.lines
            .iter()
            .find(|line| line.is_visible())
            .map(|line| line.text.trim().trim_start_matches('#').trim().to_string())
    }

    /// Raw index of the `visible`-th visible line
    pub fn raw_index_of(&self, visible: usize) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_visible())
            .nth(visible)
            .map(|(index, _)| index)
    }

    /// Raw range covering a visible line and every line attached to it, up
    /// to (not including) the next visible line.
    pub fn block_range(&self, visible: usize) -> Option<Range<usize>> {
        let start = self.raw_index_of(visible)?;
        let end = self.lines[start + 1..]
            .iter()
            .position(|line| line.is_visible())
            .map(|offset| start + 1 + offset)
            .unwrap_or(self.lines.len());
        Some(start..end)
    }

    /// Visible line text at a visible index
    pub fn sentence(&self, visible: usize) -> Option<&RawLine> {
        self.raw_index_of(visible).map(|index| &self.lines[index])
    }

    /// Annotations attached to a visible line, in file order
    pub fn line_annotations(&self, visible: usize) -> Vec<&Annotation> {
        match self.block_range(visible) {
            Some(range) => self.lines[range]
                .iter()
                .filter_map(|line| line.as_annotation())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Any alternative, original or selected marker anywhere in the paragraph
    pub fn has_line_annotations(&self) -> bool {
        self.lines
            .iter()
            .filter_map(|line| line.as_annotation())
            .any(|annotation| annotation.is_line_scoped())
    }

    pub fn is_complete(&self) -> bool {
        self.lines
            .iter()
            .any(|line| line.as_annotation() == Some(&Annotation::ParagraphComplete))
    }
}

/// Membership of a paragraph inside a [`Section`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMember {
    pub index: usize,
    /// `###` heading nested inside the section
    pub is_subheading: bool,
}

/// Consecutive paragraphs under a level-2 heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    pub level: usize,
    /// Paragraph index of the `##` heading
    pub heading_index: usize,
    /// Index of the last paragraph belonging to the section
    pub end: usize,
    pub members: Vec<SectionMember>,
}

/// Parsed document: paragraphs plus derived section outline
#[derive(Debug, Clone)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,

    /// Sections derived from `##` headings
    pub sections: Vec<Section>,

    /// Paragraphs before the first section
    pub leading: Vec<usize>,

    ids: IDGenerator,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>, ids: IDGenerator) -> Self {
        let mut doc = Self {
            paragraphs,
            sections: Vec::new(),
            leading: Vec::new(),
            ids,
        };
        doc.rebuild_outline();
        doc
    }

    /// Re-derive sections after the paragraph list changed
    pub fn rebuild_outline(&mut self) {
        let (sections, leading) = crate::parser::build_sections(&self.paragraphs);
        self.sections = sections;
        self.leading = leading;
    }

    /// Create a paragraph with a fresh id (not inserted)
    pub fn new_paragraph(&mut self, lines: Vec<RawLine>) -> Paragraph {
        Paragraph::from_lines(self.ids.new_id(), lines)
    }

    /// Replace every paragraph from raw texts. A paragraph whose text matches
    /// a current one keeps that paragraph's id; the rest get fresh ids.
    pub fn replace_paragraphs<S: AsRef<str>>(&mut self, raws: &[S]) {
        let mut reusable: HashMap<String, VecDeque<String>> = HashMap::new();
        for paragraph in self.paragraphs.drain(..) {
            reusable
                .entry(paragraph.raw_text())
                .or_default()
                .push_back(paragraph.id);
        }

        self.paragraphs = raws
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                let id = reusable
                    .get_mut(raw)
                    .and_then(VecDeque::pop_front)
                    .unwrap_or_else(|| self.ids.new_id());
                Paragraph::from_raw(id, raw)
            })
            .collect();
        self.rebuild_outline();
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    /// Current position of the paragraph carrying `id`
    pub fn paragraph_by_id(&self, id: &str) -> Option<(usize, &Paragraph)> {
        self.paragraphs
            .iter()
            .enumerate()
            .find(|(_, paragraph)| paragraph.id == id)
    }

    /// Visible sentence-line text at an address
    pub fn sentence(&self, address: LineAddress) -> Option<&str> {
        self.paragraphs
            .get(address.paragraph)?
            .sentence(address.line)
            .map(|line| line.text.as_str())
    }

    /// Raw paragraph texts in order
    pub fn raw_paragraphs(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::raw_text).collect()
    }

    /// Clean view: visible lines per paragraph
    pub fn clean_view(&self) -> Vec<Vec<&str>> {
        self.paragraphs.iter().map(Paragraph::clean_lines).collect()
    }
}

impl PartialEq for Document {
    /// Structural equality ignores paragraph ids
    fn eq(&self, other: &Self) -> bool {
        self.raw_paragraphs() == other.raw_paragraphs()
    }
}
