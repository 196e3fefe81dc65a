//! Integration tests for the editing session
//!
//! Drives [`EditSession`] the way a host would: mutations arrive as JSON from
//! the view, writes go through the store, and the store echoes change
//! notifications back.

use std::path::Path;

use telescope_editor::{
    line_alternatives, AltChoice, EditSession, EditorError, LoadOutcome, MemoryStore, Mutation,
    MutationEffect, MutationError,
};
use telescope_parser::LineAddress;

const PATH: &str = "draft.md";

fn open(text: &str) -> (EditSession<MemoryStore>, MemoryStore) {
    let store = MemoryStore::with_file(PATH, text);
    let session = EditSession::open("test", store.clone(), PATH).unwrap();
    (session, store)
}

fn file(store: &MemoryStore) -> String {
    store.contents(Path::new(PATH)).unwrap()
}

#[test]
fn test_alternative_lifecycle() {
    let (mut session, store) = open("First line.\nSecond line.");
    let at = LineAddress::new(0, 1);

    session
        .apply_and_persist(&Mutation::AddAlternative {
            at,
            text: "Second line, revised.".to_string(),
        })
        .unwrap();
    assert_eq!(session.handle_load(&file(&store)), LoadOutcome::Suppressed);

    session
        .apply_and_persist(&Mutation::SelectAlternative {
            at,
            choice: AltChoice::Alternative(0),
        })
        .unwrap();

    let text = file(&store);
    assert!(text.contains("Second line, revised."));
    assert!(text.contains("%% ORIGINAL: Second line. %%"));
    assert!(text.contains("%% SELECTED:0 %%"));
    assert_eq!(
        session.model().clean_view(),
        vec![vec!["First line.", "Second line, revised."]]
    );

    session
        .apply_and_persist(&Mutation::SelectAlternative {
            at,
            choice: AltChoice::Original,
        })
        .unwrap();
    assert_eq!(session.model().sentence(at), Some("Second line."));
    let alts = line_alternatives(session.model(), at).unwrap();
    assert_eq!(alts.alternatives, vec!["Second line, revised."]);
    assert_eq!(alts.selected_index, None);

    session
        .apply_and_persist(&Mutation::CommitSentence { at })
        .unwrap();
    assert_eq!(file(&store), "First line.\nSecond line.");
}

#[test]
fn test_mutations_from_json() {
    let (mut session, store) = open("A.\n\nB.\n\nC.");

    let payloads = [
        r#"{"type":"moveParagraph","from":2,"target":0,"position":"before"}"#,
        r#"{"type":"toggleComplete","paragraph":1}"#,
    ];
    for payload in payloads {
        let mutation: Mutation = serde_json::from_str(payload).unwrap();
        session.apply_and_persist(&mutation).unwrap();
    }

    assert_eq!(file(&store), "C.\n\n%% PARAGRAPH_COMPLETE %%\nA.\n\nB.");
    assert_eq!(session.history().undo_levels(), 2);
}

#[test]
fn test_sections_follow_edits() {
    let (mut session, _) = open("Intro.\n\n## One\n\nA.\n\n### Sub\n\nB.\n\n## Two\n\nC.");
    assert_eq!(session.model().leading, vec![0]);
    assert_eq!(session.model().sections.len(), 2);

    session
        .apply_and_persist(&Mutation::MoveParagraph {
            from: 0,
            target: 6,
            position: telescope_editor::DropPosition::After,
        })
        .unwrap();

    let model = session.model();
    assert!(model.leading.is_empty());
    assert_eq!(model.sections[1].members.len(), 2);
    assert_eq!(model.sentence(LineAddress::new(6, 0)), Some("Intro."));
}

#[test]
fn test_rejected_mutation_writes_nothing() {
    let (mut session, store) = open("## Title\n\nBody.");

    let err = session
        .apply_and_persist(&Mutation::ToggleComplete { paragraph: 0 })
        .unwrap_err();
    assert!(matches!(err, EditorError::Mutation(MutationError::Heading(0))));
    assert_eq!(file(&store), "## Title\n\nBody.");
    assert!(!session.self_write_pending());
    assert_eq!(session.document().version, 0);
}

#[test]
fn test_refused_completion_cleans_marker_on_disk() {
    let (mut session, store) = open("%% PARAGRAPH_COMPLETE %%\nA.\n%% alt %%");

    let result = session
        .apply_and_persist(&Mutation::ToggleComplete { paragraph: 0 })
        .unwrap();
    assert_eq!(result.effect, MutationEffect::Refused);
    assert_eq!(file(&store), "A.\n%% alt %%");
}

#[test]
fn test_external_edit_replaces_model() {
    let (mut session, store) = open("A.");
    session
        .apply_and_persist(&Mutation::ToggleComplete { paragraph: 0 })
        .unwrap();
    assert_eq!(session.reload().unwrap(), LoadOutcome::Suppressed);

    store.insert(PATH, "Rewritten elsewhere.\n\nSecond.");
    assert_eq!(session.reload().unwrap(), LoadOutcome::Reloaded);
    assert_eq!(session.model().paragraphs.len(), 2);
    assert!(!session.history().can_undo());
}

#[test]
fn test_undo_restores_file_text() {
    let (mut session, store) = open("A.\nB.");
    session
        .apply_and_persist(&Mutation::MoveSentence {
            from: LineAddress::new(0, 0),
            to: LineAddress::new(0, 1),
            position: telescope_editor::DropPosition::After,
        })
        .unwrap();
    assert_eq!(file(&store), "B.\nA.");

    assert!(session.undo().unwrap());
    assert_eq!(file(&store), "A.\nB.");
    assert_eq!(session.handle_load(&file(&store)), LoadOutcome::Suppressed);
}

#[test]
fn test_history_depth_is_bounded() {
    let store = MemoryStore::with_file(PATH, "A.");
    let mut session = EditSession::open("test", store, PATH)
        .unwrap()
        .with_history_depth(1);

    session
        .apply_and_persist(&Mutation::ToggleComplete { paragraph: 0 })
        .unwrap();
    session
        .apply_and_persist(&Mutation::ToggleComplete { paragraph: 0 })
        .unwrap();

    assert_eq!(session.history().undo_levels(), 1);
}
