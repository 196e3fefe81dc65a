//! # Text Surgery
//!
//! In-place edits on the raw paragraph lines. Each function validates every
//! address it needs before the first write, so an `Err` always means the
//! document was not touched.
//!
//! A sentence-line owns the block of raw lines starting at the line itself
//! and running up to the next visible line. Paragraph completion markers are
//! never part of a block: they stay with their paragraph.

use telescope_parser::ast::{Document, LineKind, Paragraph, RawLine};
use telescope_parser::{annotation, Annotation, LineAddress};
use tracing::debug;

use crate::mutations::{AltChoice, DropPosition, MutationError};

/// Outcome of a completion toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Marked,
    Cleared,
    Refused,
}

pub fn move_paragraph(
    doc: &mut Document,
    from: usize,
    target: usize,
    position: DropPosition,
) -> Result<(), MutationError> {
    let source = paragraph_at(doc, from)?;
    if source.is_heading() {
        return Err(MutationError::Heading(from));
    }
    paragraph_at(doc, target)?;

    if from == target {
        return Ok(());
    }

    // Relative to a heading this lands on the heading's own slot (before) or
    // right after it (after), the same arithmetic as for prose targets.
    let adjusted = if from < target { target - 1 } else { target };
    let insert_at = match position {
        DropPosition::Before => adjusted,
        DropPosition::After => adjusted + 1,
    };

    let moved = doc.paragraphs.remove(from);
    debug!(from, insert_at, id = %moved.id, "moving paragraph");
    doc.paragraphs.insert(insert_at, moved);
    Ok(())
}

pub fn move_sentence(
    doc: &mut Document,
    from: LineAddress,
    to: LineAddress,
    position: DropPosition,
) -> Result<(), MutationError> {
    editable_line(doc, from)?;
    let target = paragraph_at(doc, to.paragraph)?;

    if target.is_heading() {
        target.sentence(to.line).ok_or(MutationError::line(to))?;
        return move_sentence_beside_heading(doc, from, to.paragraph, position);
    }

    if from.paragraph == to.paragraph {
        target.block_range(to.line).ok_or(MutationError::line(to))?;
        if from.line == to.line {
            return Ok(());
        }

        let shared = &mut doc.paragraphs[from.paragraph];
        let block = take_block(shared, from.line).ok_or(MutationError::line(from))?;
        let target_line = if to.line > from.line { to.line - 1 } else { to.line };
        let at = insertion_index(shared, target_line, position).ok_or(MutationError::line(to))?;
        shared.lines_mut().splice(at..at, block);
        return Ok(());
    }

    let at = insertion_index(target, to.line, position).ok_or(MutationError::line(to))?;
    let block = take_block(&mut doc.paragraphs[from.paragraph], from.line)
        .ok_or(MutationError::line(from))?;

    debug!(?from, ?to, lines = block.len(), "moving sentence across paragraphs");
    doc.paragraphs[to.paragraph].lines_mut().splice(at..at, block);
    remove_if_empty(doc, from.paragraph);
    Ok(())
}

/// Dropping on a heading opens a new paragraph directly above or below it.
/// Heading paragraphs never take in prose lines.
fn move_sentence_beside_heading(
    doc: &mut Document,
    from: LineAddress,
    heading: usize,
    position: DropPosition,
) -> Result<(), MutationError> {
    let block = take_block(&mut doc.paragraphs[from.paragraph], from.line)
        .ok_or(MutationError::line(from))?;

    let insert_at = match position {
        DropPosition::Before => heading,
        DropPosition::After => heading + 1,
    };
    let created = doc.new_paragraph(block);
    debug!(?from, heading, ?position, id = %created.id, "opening paragraph beside heading");
    doc.paragraphs.insert(insert_at, created);

    let source = if from.paragraph >= insert_at {
        from.paragraph + 1
    } else {
        from.paragraph
    };
    remove_if_empty(doc, source);
    Ok(())
}

pub fn add_alternative(doc: &mut Document, at: LineAddress, text: &str) -> Result<(), MutationError> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(MutationError::EmptyAlternative);
    }
    let alternative = Annotation::Alternative(text.clone());
    if annotation::decode(&annotation::encode(&alternative, "")) != Some(alternative) {
        return Err(MutationError::ReservedAlternative(text));
    }

    let paragraph = editable_line_mut(doc, at)?;
    let range = paragraph.block_range(at.line).ok_or(MutationError::line(at))?;
    let indent = paragraph.lines()[range.start].indent().to_string();

    paragraph
        .lines_mut()
        .insert(range.end, RawLine::annotation(Annotation::Alternative(text), &indent));
    Ok(())
}

pub fn select_alternative(
    doc: &mut Document,
    at: LineAddress,
    choice: AltChoice,
) -> Result<(), MutationError> {
    let paragraph = editable_line_mut(doc, at)?;
    let range = paragraph.block_range(at.line).ok_or(MutationError::line(at))?;
    let anchor = range.start;
    let indent = paragraph.lines()[anchor].indent().to_string();

    let original = paragraph.lines()[range.clone()]
        .iter()
        .find_map(|line| match line.as_annotation() {
            Some(Annotation::Original(text)) => Some(text.clone()),
            _ => None,
        });

    match choice {
        AltChoice::Alternative(index) => {
            let chosen = paragraph
                .line_annotations(at.line)
                .into_iter()
                .filter_map(|annotation| match annotation {
                    Annotation::Alternative(text) => Some(text.clone()),
                    _ => None,
                })
                .nth(index)
                .filter(|text| !text.trim().is_empty())
                .ok_or(MutationError::AlternativeNotFound {
                    paragraph: at.paragraph,
                    line: at.line,
                    index,
                })?;

            let lines = paragraph.lines_mut();
            let mut end = range.end;

            if original.is_none() {
                let current = lines[anchor].text.trim().to_string();
                lines.insert(anchor + 1, RawLine::annotation(Annotation::Original(current), &indent));
                end += 1;
            }

            lines[anchor] = visible_line(&indent, &chosen);

            let selected = (anchor..end)
                .find(|&i| matches!(lines[i].as_annotation(), Some(Annotation::Selected(_))));
            let marker = RawLine::annotation(Annotation::Selected(index), &indent);
            match selected {
                Some(i) => lines[i] = marker,
                None => lines.insert(end, marker),
            }
        }

        AltChoice::Original => {
            let lines = paragraph.lines_mut();
            if let Some(text) = original {
                lines[anchor] = visible_line(&indent, &text);
            }
            remove_in_block(lines, anchor, range.end, |annotation| {
                matches!(annotation, Annotation::Selected(_))
            });
        }
    }

    Ok(())
}

pub fn delete_alternative(
    doc: &mut Document,
    at: LineAddress,
    index: usize,
) -> Result<(), MutationError> {
    let paragraph = editable_line_mut(doc, at)?;
    let range = paragraph.block_range(at.line).ok_or(MutationError::line(at))?;

    let position = range
        .clone()
        .filter(|&i| matches!(paragraph.lines()[i].as_annotation(), Some(Annotation::Alternative(_))))
        .nth(index)
        .ok_or(MutationError::AlternativeNotFound {
            paragraph: at.paragraph,
            line: at.line,
            index,
        })?;

    // Selected/original markers are left alone even if they now point at
    // the removed alternative.
    paragraph.lines_mut().remove(position);
    Ok(())
}

pub fn commit_sentence(doc: &mut Document, at: LineAddress) -> Result<(), MutationError> {
    let paragraph = editable_line_mut(doc, at)?;
    let range = paragraph.block_range(at.line).ok_or(MutationError::line(at))?;

    remove_in_block(paragraph.lines_mut(), range.start, range.end, Annotation::is_line_scoped);
    Ok(())
}

pub fn toggle_complete(doc: &mut Document, index: usize) -> Result<Completion, MutationError> {
    let paragraph = paragraph_at_mut(doc, index)?;
    if paragraph.is_heading() {
        return Err(MutationError::Heading(index));
    }

    let is_marker = |line: &RawLine| line.as_annotation() == Some(&Annotation::ParagraphComplete);

    if paragraph.has_line_annotations() {
        paragraph.lines_mut().retain(|line| !is_marker(line));
        return Ok(Completion::Refused);
    }

    if paragraph.is_complete() {
        paragraph.lines_mut().retain(|line| !is_marker(line));
        return Ok(Completion::Cleared);
    }

    let indent = paragraph
        .lines()
        .iter()
        .find(|line| line.is_visible())
        .map(|line| line.indent().to_string())
        .unwrap_or_default();
    paragraph
        .lines_mut()
        .insert(0, RawLine::annotation(Annotation::ParagraphComplete, &indent));
    Ok(Completion::Marked)
}

fn paragraph_at(doc: &Document, index: usize) -> Result<&Paragraph, MutationError> {
    doc.paragraphs
        .get(index)
        .ok_or(MutationError::ParagraphNotFound(index))
}

fn paragraph_at_mut(doc: &mut Document, index: usize) -> Result<&mut Paragraph, MutationError> {
    doc.paragraphs
        .get_mut(index)
        .ok_or(MutationError::ParagraphNotFound(index))
}

/// A sentence-line that exists and is prose
fn editable_line(doc: &Document, at: LineAddress) -> Result<&Paragraph, MutationError> {
    let paragraph = paragraph_at(doc, at.paragraph)?;
    let line = paragraph.sentence(at.line).ok_or(MutationError::line(at))?;
    if paragraph.is_heading() || line.is_heading_line() {
        return Err(MutationError::Heading(at.paragraph));
    }
    Ok(paragraph)
}

fn editable_line_mut(doc: &mut Document, at: LineAddress) -> Result<&mut Paragraph, MutationError> {
    editable_line(doc, at)?;
    paragraph_at_mut(doc, at.paragraph)
}

/// Raw index where a block dropped on `visible` should be inserted. An empty
/// paragraph accepts a drop on line 0 at its end.
fn insertion_index(paragraph: &Paragraph, visible: usize, position: DropPosition) -> Option<usize> {
    if paragraph.sentence_count() == 0 && visible == 0 {
        return Some(paragraph.lines().len());
    }

    let range = paragraph.block_range(visible)?;
    Some(match position {
        DropPosition::Before => range.start,
        DropPosition::After => range.end,
    })
}

/// Cut a sentence-line block out of its paragraph. Completion markers inside
/// the block stay behind.
fn take_block(paragraph: &mut Paragraph, visible: usize) -> Option<Vec<RawLine>> {
    let range = paragraph.block_range(visible)?;
    let start = range.start;

    let (markers, block): (Vec<RawLine>, Vec<RawLine>) = paragraph
        .lines_mut()
        .drain(range)
        .partition(|line| line.as_annotation() == Some(&Annotation::ParagraphComplete));

    paragraph.lines_mut().splice(start..start, markers);
    Some(block)
}

/// Drop a paragraph once its last visible line has moved out
fn remove_if_empty(doc: &mut Document, index: usize) {
    if doc.paragraphs[index].sentence_count() == 0 {
        let removed = doc.paragraphs.remove(index);
        debug!(index, id = %removed.id, "removed emptied paragraph");
    }
}

/// Remove annotation lines in `start..end` matching `predicate`
fn remove_in_block(
    lines: &mut Vec<RawLine>,
    start: usize,
    end: usize,
    predicate: impl Fn(&Annotation) -> bool,
) {
    let mut index = 0;
    lines.retain(|line| {
        let in_block = index >= start && index < end;
        index += 1;
        !(in_block && matches!(&line.kind, LineKind::Annotation(annotation) if predicate(annotation)))
    });
}

fn visible_line(indent: &str, text: &str) -> RawLine {
    RawLine {
        text: format!("{}{}", indent, text),
        kind: LineKind::Visible,
    }
}
