//! Document statistics. Headings (paragraphs or lines starting with `#`) are
//! structural and never counted as prose.

use serde::Serialize;

use crate::annotation::Annotation;
use crate::ast::Document;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub paragraphs: usize,
    pub sentences: usize,
    pub words: usize,
    pub completed_paragraphs: usize,
    /// Sentence-lines carrying at least one alternative
    pub open_alternatives: usize,
}

impl DocumentStats {
    pub fn collect(doc: &Document) -> Self {
        let mut stats = Self::default();

        for paragraph in doc.paragraphs.iter().filter(|p| !p.is_heading()) {
            stats.paragraphs += 1;
            if paragraph.is_complete() {
                stats.completed_paragraphs += 1;
            }

            let prose = paragraph
                .lines()
                .iter()
                .filter(|line| line.is_visible() && !line.is_heading_line());

            for line in prose {
                stats.sentences += 1;
                stats.words += line.text.split_whitespace().count();
            }

            for visible in 0..paragraph.sentence_count() {
                let has_alternative = paragraph
                    .line_annotations(visible)
                    .iter()
                    .any(|a| matches!(a, Annotation::Alternative(_)));
                if has_alternative {
                    stats.open_alternatives += 1;
                }
            }
        }

        stats
    }

    /// Share of prose paragraphs marked complete, in `0.0..=1.0`
    pub fn completion_ratio(&self) -> f64 {
        if self.paragraphs == 0 {
            return 0.0;
        }
        self.completed_paragraphs as f64 / self.paragraphs as f64
    }
}
