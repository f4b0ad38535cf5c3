use story_data::{BlockKind, Lector};
use story_script::{parse, to_dsl, to_transcript};

fn lectors() -> Vec<Lector> {
    vec![
        Lector::new("narrator", "Narrator", "voice-narrator"),
        Lector::new("captain", "Captain", "voice-captain"),
    ]
}

#[test]
fn mixed_shorthand_dsl_golden() {
    let blocks = parse(include_str!("fixtures/harbor_night.txt"), &lectors());
    assert_eq!(blocks.len(), 14);
    let actual = to_dsl(&blocks);
    let expected = include_str!("fixtures/harbor_night.dsl");
    assert_eq!(actual.trim(), expected.trim());
}

#[test]
fn canonical_dsl_is_a_fixed_point() {
    let expected = include_str!("fixtures/harbor_night.dsl");
    let blocks = parse(expected, &lectors());
    assert_eq!(to_dsl(&blocks).trim(), expected.trim());
}

#[test]
fn transcript_reparses_to_same_codes_and_lectors() {
    let blocks = parse(include_str!("fixtures/harbor_night.txt"), &lectors());
    let transcript = to_transcript(&blocks, &lectors());
    assert!(transcript.contains("Captain (Z1): Ahoy, [Name]! Ready to sail?"));
    assert!(transcript.contains("Background: Harbor Waves: 00:00:03"));
    assert!(transcript.contains("Captain: Hold on tight."));

    let reparsed = parse(&transcript, &lectors());
    assert_eq!(reparsed.len(), blocks.len());
    for (before, after) in blocks.iter().zip(&reparsed) {
        assert_eq!(before.kind_name(), after.kind_name());
        if let (BlockKind::Line(a), BlockKind::Line(b)) = (&before.kind, &after.kind) {
            assert_eq!(a.code(), b.code());
            assert_eq!(a.lector_id, b.lector_id);
        }
    }
}
