//! # Telescope Parser
//!
//! Markdown document model for telescopic editing: paragraphs, sentence-lines
//! and the hidden `%% ... %%` annotations that carry alternatives, selections
//! and completion flags inside the file itself.

pub mod annotation;
pub mod ast;
pub mod id_generator;
pub mod parser;
pub mod serializer;
pub mod stats;

#[cfg(test)]
mod tests_roundtrip;

pub use annotation::{Annotation, AnnotationKind};
pub use ast::{Document, LineAddress, LineKind, Paragraph, RawLine, Section, SectionMember};
pub use parser::{parse, parse_with_path};
pub use serializer::{normalize_spacing, serialize};
pub use stats::DocumentStats;
