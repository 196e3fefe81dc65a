//! Read-only status predicates the view layer renders from

use serde::Serialize;
use telescope_parser::ast::Document;
use telescope_parser::{Annotation, LineAddress};

/// Alternatives attached to one sentence-line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineAlternatives {
    /// Alternative phrasings in file order
    pub alternatives: Vec<String>,

    /// Index of the visible alternative; `None` means the original is shown
    pub selected_index: Option<usize>,

    /// Original text, present once an alternative has ever been selected
    pub original_text: Option<String>,
}

pub fn line_alternatives(doc: &Document, at: LineAddress) -> Option<LineAlternatives> {
    let paragraph = doc.paragraph(at.paragraph)?;
    paragraph.sentence(at.line)?;

    let mut result = LineAlternatives::default();
    for annotation in paragraph.line_annotations(at.line) {
        match annotation {
            Annotation::Alternative(text) => result.alternatives.push(text.clone()),
            Annotation::Selected(index) => result.selected_index = Some(*index),
            Annotation::Original(text) => {
                result.original_text.get_or_insert_with(|| text.clone());
            }
            Annotation::ParagraphComplete => {}
        }
    }

    Some(result)
}

pub fn line_has_alternatives(doc: &Document, at: LineAddress) -> bool {
    line_alternatives(doc, at)
        .map(|alts| !alts.alternatives.is_empty())
        .unwrap_or(false)
}

/// Any alternative, original or selected marker in the paragraph
pub fn paragraph_has_annotations(doc: &Document, index: usize) -> bool {
    doc.paragraph(index)
        .map(|paragraph| paragraph.has_line_annotations())
        .unwrap_or(false)
}

pub fn paragraph_is_complete(doc: &Document, index: usize) -> bool {
    doc.paragraph(index)
        .map(|paragraph| paragraph.is_complete())
        .unwrap_or(false)
}

/// Prose paragraphs can be dragged; headings cannot
pub fn is_draggable_paragraph(doc: &Document, index: usize) -> bool {
    doc.paragraph(index)
        .map(|paragraph| !paragraph.is_heading())
        .unwrap_or(false)
}
