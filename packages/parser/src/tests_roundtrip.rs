/// Round-trip tests: parse → serialize keeps content, and a second pass is a
/// fixed point.
use crate::*;

const SAMPLES: &[&str] = &[
    "First line.\nSecond line.\n\nThird paragraph.",
    "# Title\n\n## Intro\n\nBody text.\n%% Body copy. %%",
    "# Title\nRight under the title.\n## Part\nText.\n### Sub\nMore.",
    "%% PARAGRAPH_COMPLETE %%\nDone.\n\nLine.\n%% ORIGINAL: Line. %%\n%% Alt. %%\n%% SELECTED:0 %%",
    "  Indented line.\n  %% indented alternative %%\n\n\n\n\nAfter a gap.\n\n",
    "Lone %% marker in prose %% stays visible.",
];

fn annotation_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| annotation::is_annotation_line(line))
        .map(|line| line.trim().to_string())
        .collect()
}

fn visible_lines(text: &str) -> Vec<String> {
    parse(text)
        .paragraphs
        .iter()
        .flat_map(|p| p.clean_lines().into_iter().map(|l| l.trim().to_string()))
        .collect()
}

#[test]
fn test_roundtrip_preserves_visible_content() {
    for source in SAMPLES {
        let serialized = serialize(&parse(source));
        assert_eq!(visible_lines(source), visible_lines(&serialized), "source: {:?}", source);
    }
}

#[test]
fn test_roundtrip_preserves_annotations_verbatim() {
    for source in SAMPLES {
        let serialized = serialize(&parse(source));
        assert_eq!(annotation_lines(source), annotation_lines(&serialized), "source: {:?}", source);
    }
}

#[test]
fn test_second_pass_is_fixed_point() {
    for source in SAMPLES {
        let once = serialize(&parse(source));
        let twice = serialize(&parse(&once));
        assert_eq!(once, twice, "source: {:?}", source);
    }
}

#[test]
fn test_heading_inside_paragraph_is_split_out() {
    let once = serialize(&parse("# Title\nRight under the title."));
    assert_eq!(once, "# Title\n\nRight under the title.");

    let doc = parse(&once);
    assert_eq!(doc.paragraphs.len(), 2);
    assert!(doc.paragraphs[0].is_heading());
}
