//! # Document Mutations
//!
//! Edit intents a UI layer sends to the engine. Every mutation addresses
//! paragraphs and sentence-lines by position in the current snapshot.
//!
//! ## Semantics
//!
//! - All addressing is validated before anything is touched: a stale address
//!   yields an error and leaves the document exactly as it was.
//! - Structural moves carry each sentence-line together with its hidden
//!   annotation block.
//! - Headings are structure, not prose: they are never the source of a move
//!   and never take alternatives or completion flags.
//! - Completion is refused (not an error) while a paragraph has open
//!   alternatives.

use serde::{Deserialize, Serialize};
use telescope_parser::ast::Document;
use telescope_parser::LineAddress;
use thiserror::Error;

use crate::surgery::{self, Completion};

/// Where a dragged block lands relative to its drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
}

/// Which phrasing of a sentence-line should be visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltChoice {
    /// Restore the original text
    Original,
    /// Swap in the alternative at this index
    Alternative(usize),
}

/// Structural edit operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Move a paragraph before or after another paragraph
    MoveParagraph {
        from: usize,
        target: usize,
        position: DropPosition,
    },

    /// Move a sentence-line (with its annotations) within or across paragraphs
    MoveSentence {
        from: LineAddress,
        to: LineAddress,
        position: DropPosition,
    },

    /// Append an alternative phrasing to a sentence-line
    AddAlternative { at: LineAddress, text: String },

    /// Make an alternative (or the original) the visible text
    SelectAlternative { at: LineAddress, choice: AltChoice },

    /// Remove the Nth alternative of a sentence-line
    DeleteAlternative { at: LineAddress, index: usize },

    /// Keep the visible text and drop every alternative
    CommitSentence { at: LineAddress },

    /// Flip the paragraph completion flag
    ToggleComplete { paragraph: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Paragraph not found: {0}")]
    ParagraphNotFound(usize),

    #[error("Sentence-line not found: paragraph {paragraph}, line {line}")]
    LineNotFound { paragraph: usize, line: usize },

    #[error("Paragraph {0} is a heading and cannot be moved or edited")]
    Heading(usize),

    #[error("Alternative {index} not found for paragraph {paragraph}, line {line}")]
    AlternativeNotFound {
        paragraph: usize,
        line: usize,
        index: usize,
    },

    #[error("Alternative text is empty")]
    EmptyAlternative,

    #[error("Alternative text `{0}` reads as a reserved marker")]
    ReservedAlternative(String),
}

impl MutationError {
    pub(crate) fn line(address: LineAddress) -> Self {
        Self::LineNotFound {
            paragraph: address.paragraph,
            line: address.line,
        }
    }
}

/// What applying a mutation did to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationEffect {
    Changed,
    Unchanged,
    /// Completion refused because the paragraph has open alternatives. Stale
    /// completion markers may still have been removed.
    Refused,
}

impl Mutation {
    /// Apply to a parsed document. On error the document is untouched.
    pub fn apply(&self, doc: &mut Document) -> Result<MutationEffect, MutationError> {
        let before = doc.raw_paragraphs();

        let refused = match self {
            Mutation::MoveParagraph {
                from,
                target,
                position,
            } => surgery::move_paragraph(doc, *from, *target, *position).map(|_| false),

            Mutation::MoveSentence { from, to, position } => {
                surgery::move_sentence(doc, *from, *to, *position).map(|_| false)
            }

            Mutation::AddAlternative { at, text } => {
                surgery::add_alternative(doc, *at, text).map(|_| false)
            }

            Mutation::SelectAlternative { at, choice } => {
                surgery::select_alternative(doc, *at, *choice).map(|_| false)
            }

            Mutation::DeleteAlternative { at, index } => {
                surgery::delete_alternative(doc, *at, *index).map(|_| false)
            }

            Mutation::CommitSentence { at } => surgery::commit_sentence(doc, *at).map(|_| false),

            Mutation::ToggleComplete { paragraph } => {
                surgery::toggle_complete(doc, *paragraph)
                    .map(|completion| completion == Completion::Refused)
            }
        }?;

        doc.rebuild_outline();

        if refused {
            Ok(MutationEffect::Refused)
        } else if doc.raw_paragraphs() == before {
            Ok(MutationEffect::Unchanged)
        } else {
            Ok(MutationEffect::Changed)
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        let mut scratch = doc.clone();
        self.apply(&mut scratch).map(|_| ())
    }

    /// Short name for logs and undo descriptions
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::MoveParagraph { .. } => "move paragraph",
            Mutation::MoveSentence { .. } => "move sentence",
            Mutation::AddAlternative { .. } => "add alternative",
            Mutation::SelectAlternative { .. } => "select alternative",
            Mutation::DeleteAlternative { .. } => "delete alternative",
            Mutation::CommitSentence { .. } => "commit sentence",
            Mutation::ToggleComplete { .. } => "toggle completion",
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    pub effect: MutationEffect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use telescope_parser::parse;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveSentence {
            from: LineAddress::new(0, 1),
            to: LineAddress::new(2, 0),
            position: DropPosition::After,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_choice_json_shape() {
        let json = serde_json::to_string(&AltChoice::Alternative(2)).unwrap();
        assert_eq!(json, r#"{"alternative":2}"#);
        let original: AltChoice = serde_json::from_str(r#""original""#).unwrap();
        assert_eq!(original, AltChoice::Original);
    }

    #[test]
    fn test_stale_address_leaves_document_untouched() {
        let mut doc = parse("One.\n\nTwo.");
        let before = doc.raw_paragraphs();

        let mutation = Mutation::CommitSentence {
            at: LineAddress::new(0, 5),
        };
        assert_eq!(
            mutation.apply(&mut doc),
            Err(MutationError::LineNotFound {
                paragraph: 0,
                line: 5
            })
        );
        assert_eq!(doc.raw_paragraphs(), before);
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let doc = parse("One.\n\nTwo.");
        let mutation = Mutation::MoveParagraph {
            from: 0,
            target: 1,
            position: DropPosition::After,
        };
        assert!(mutation.validate(&doc).is_ok());
        assert_eq!(doc.raw_paragraphs(), vec!["One.", "Two."]);

        let stale = Mutation::ToggleComplete { paragraph: 9 };
        assert_eq!(stale.validate(&doc), Err(MutationError::ParagraphNotFound(9)));
    }

    #[test]
    fn test_no_op_reports_unchanged() {
        let mut doc = parse("One.\n\nTwo.");
        let mutation = Mutation::MoveParagraph {
            from: 0,
            target: 1,
            position: DropPosition::Before,
        };
        assert_eq!(mutation.apply(&mut doc), Ok(MutationEffect::Unchanged));
    }
}
