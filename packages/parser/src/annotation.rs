//! # Annotation Codec
//!
//! Hidden directives are stored inside the markdown file as comment lines:
//!
//! ```text
//! The visible sentence.
//! %% A different phrasing. %%
//! %% ORIGINAL: The visible sentence. %%
//! %% SELECTED:0 %%
//! ```
//!
//! Any comment that does not carry a reserved prefix is an alternative
//! phrasing for the visible line above it. Decoding never fails: a comment
//! with a broken payload (e.g. `SELECTED:abc`) round-trips as an alternative.

use serde::Serialize;

/// Comment delimiter wrapping every annotation line
pub const DELIMITER: &str = "%%";

const ORIGINAL_PREFIX: &str = "ORIGINAL:";
const SELECTED_PREFIX: &str = "SELECTED:";
const COMPLETE_MARKER: &str = "PARAGRAPH_COMPLETE";

/// Discriminant of an [`Annotation`], used when encoding from parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnnotationKind {
    Alternative,
    Original,
    Selected,
    ParagraphComplete,
}

/// A decoded annotation line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Annotation {
    /// Alternative phrasing for the preceding sentence-line
    Alternative(String),

    /// True original text, present while an alternative is swapped in
    Original(String),

    /// Index (among the line's alternatives) of the visible choice
    Selected(usize),

    /// Paragraph-scoped completion flag
    ParagraphComplete,
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::Alternative(_) => AnnotationKind::Alternative,
            Annotation::Original(_) => AnnotationKind::Original,
            Annotation::Selected(_) => AnnotationKind::Selected,
            Annotation::ParagraphComplete => AnnotationKind::ParagraphComplete,
        }
    }

    /// Build an annotation from a kind and a free-text payload.
    ///
    /// Payloads that don't fit the kind (a non-numeric `Selected`) fall back
    /// to an alternative carrying the raw payload, mirroring [`decode`].
    pub fn from_parts(kind: AnnotationKind, payload: &str) -> Self {
        match kind {
            AnnotationKind::Alternative => Annotation::Alternative(payload.trim().to_string()),
            AnnotationKind::Original => Annotation::Original(payload.trim().to_string()),
            AnnotationKind::Selected => match payload.trim().parse() {
                Ok(index) => Annotation::Selected(index),
                Err(_) => Annotation::Alternative(payload.trim().to_string()),
            },
            AnnotationKind::ParagraphComplete => Annotation::ParagraphComplete,
        }
    }

    /// True for the per-line markers (alternative, original, selected)
    pub fn is_line_scoped(&self) -> bool {
        !matches!(self, Annotation::ParagraphComplete)
    }
}

/// Check whether a raw line is an annotation comment
pub fn is_annotation_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= DELIMITER.len() * 2
        && trimmed.starts_with(DELIMITER)
        && trimmed.ends_with(DELIMITER)
}

/// Decode an annotation line. Returns `None` if the line isn't a comment.
pub fn decode(line: &str) -> Option<Annotation> {
    if !is_annotation_line(line) {
        return None;
    }

    let trimmed = line.trim();
    let inner = trimmed[DELIMITER.len()..trimmed.len() - DELIMITER.len()].trim();

    let annotation = if inner == COMPLETE_MARKER {
        Annotation::ParagraphComplete
    } else if let Some(rest) = inner.strip_prefix(ORIGINAL_PREFIX) {
        Annotation::Original(rest.trim().to_string())
    } else if let Some(rest) = inner.strip_prefix(SELECTED_PREFIX) {
        match rest.trim().parse::<usize>() {
            Ok(index) => Annotation::Selected(index),
            Err(_) => Annotation::Alternative(inner.to_string()),
        }
    } else {
        Annotation::Alternative(inner.to_string())
    };

    Some(annotation)
}

/// Encode an annotation as a single line with the given indentation
pub fn encode(annotation: &Annotation, indent: &str) -> String {
    let body = match annotation {
        Annotation::Alternative(text) => text.clone(),
        Annotation::Original(text) => format!("{} {}", ORIGINAL_PREFIX, text),
        Annotation::Selected(index) => format!("{}{}", SELECTED_PREFIX, index),
        Annotation::ParagraphComplete => COMPLETE_MARKER.to_string(),
    };

    format!("{}{} {} {}", indent, DELIMITER, body, DELIMITER)
}

/// Leading whitespace of a line
pub fn indentation(line: &str) -> &str {
    let content_start = line.len() - line.trim_start().len();
    &line[..content_start]
}
