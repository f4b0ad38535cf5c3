//! Line-oriented parser for Story Script text.
//!
//! Accepts both the canonical DSL the serializer writes and the looser editor
//! shorthand authors type by hand. Every physical line is classified on its own;
//! the only state shared between lines is the lector list. Nothing here fails:
//! a line no recognizer claims becomes an untagged narration line.

use log::{debug, trace};

use story_data::{Block, BlockKind, Id, LineBlock, Lector, default_lector, lector_by_name};

mod canonical;
mod helpers;
mod shorthand;

use helpers::strip_prefix_ignore_case;

/// Per-parse lookups shared by the line recognizers.
pub(super) struct LineContext<'a> {
    pub(super) lectors: &'a [Lector],
}

impl LineContext<'_> {
    fn default_lector(&self) -> Option<Id> {
        default_lector(self.lectors).map(|l| l.id.clone())
    }

    fn lector_named(&self, name: &str) -> Option<Id> {
        lector_by_name(self.lectors, name).map(|l| l.id.clone())
    }
}

/// Parse raw script text into timeline blocks.
///
/// Blank lines and bare `End` markers are dropped; every other line yields exactly
/// one block. Lines in canonical `SampleLine`/`DynamicSampleLine` form come back
/// with empty content (see [`crate::scenario::hydrate`]).
///
/// ```
/// use story_data::{BlockKind, Lector};
///
/// let lectors = vec![Lector::new("narrator", "Narrator", "voice-1")];
/// let blocks = story_script::parse("Chapter: The Dive\nS1: The water was calm.", &lectors);
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[0].kind, BlockKind::Chapter { .. }));
/// assert_eq!(blocks[1].as_line().and_then(|l| l.code()), Some("S1"));
/// ```
pub fn parse(raw_text: &str, lectors: &[Lector]) -> Vec<Block> {
    let ctx = LineContext { lectors };
    let blocks: Vec<Block> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.eq_ignore_ascii_case("end"))
        .map(|line| Block::new(classify_line(line, &ctx)))
        .collect();
    debug!(
        "parsed {} blocks ({} lines, {} coded)",
        blocks.len(),
        blocks.iter().filter(|b| b.as_line().is_some()).count(),
        blocks.iter().filter_map(Block::as_line).filter(|l| l.code().is_some()).count()
    );
    blocks
}

/// Classify one trimmed, non-blank line. First matching recognizer wins.
fn classify_line(line: &str, ctx: &LineContext<'_>) -> BlockKind {
    if let Some(title) = strip_prefix_ignore_case(line, "episode:") {
        return BlockKind::Episode {
            title: title.trim().to_string(),
        };
    }
    if let Some(title) = strip_prefix_ignore_case(line, "chapter:") {
        return BlockKind::Chapter {
            title: title.trim().to_string(),
        };
    }
    let recognized = canonical::background_sample(line)
        .or_else(|| shorthand::background(line))
        .or_else(|| canonical::pause_line(line))
        .or_else(|| shorthand::pause(line))
        .or_else(|| canonical::sample_line(line, ctx))
        .or_else(|| shorthand::compact(line, ctx))
        .or_else(|| shorthand::role_with_code(line, ctx))
        .or_else(|| shorthand::role_without_code(line, ctx));
    recognized.unwrap_or_else(|| {
        trace!("untagged line: {line}");
        BlockKind::Line(LineBlock::new(line).with_lector(ctx.default_lector()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_data::{BackgroundCue, PauseCue};

    fn lectors() -> Vec<Lector> {
        vec![Lector::new("narrator", "Narrator", "voice-1"), Lector::new("reef", "Reef Spirit", "voice-2")]
    }

    fn kinds(blocks: &[Block]) -> Vec<&'static str> {
        blocks.iter().map(Block::kind_name).collect()
    }

    #[test]
    fn blank_lines_and_end_markers_are_dropped() {
        let blocks = parse("\n\n  End\nEND\n   \nS1: hi\n", &lectors());
        assert_eq!(kinds(&blocks), vec!["line"]);
    }

    #[test]
    fn recognizes_each_statement_kind() {
        let src = "\
episode: Ocean Rescue
CHAPTER: The Dive
BackgroundSampleLine: Code=Waves, FadeIn=00:00:03, FadeOut=00:00:02
Background: Gulls: 00:00:04
PauseLine: 00:00:05
Pauza: 3
SampleLine: Code=S1
DynamicSampleLine: Code=Z1[Slug]
S2: The water was calm.
Reef Spirit (Z2): Hello, [Name].
Reef Spirit: Welcome back.
Just some narration.";
        let blocks = parse(src, &lectors());
        assert_eq!(
            kinds(&blocks),
            vec![
                "episode", "chapter", "background", "background", "pause", "pause", "line", "line", "line", "line",
                "line", "line"
            ]
        );
        assert_eq!(
            blocks[0].kind,
            BlockKind::Episode {
                title: "Ocean Rescue".into()
            }
        );
        assert_eq!(
            blocks[2].kind,
            BlockKind::Background(BackgroundCue {
                name: "Waves".into(),
                fade_in: "00:00:03".into(),
                fade_out: "00:00:02".into(),
            })
        );
        assert_eq!(blocks[5].kind, BlockKind::Pause(PauseCue { duration_seconds: 3 }));

        let lines: Vec<&LineBlock> = blocks.iter().filter_map(Block::as_line).collect();
        assert_eq!(lines[0].code(), Some("S1"));
        assert!(lines[0].content.is_empty());
        assert_eq!(lines[1].code(), Some("Z1"));
        assert!(lines[1].is_partner_specific);
        assert_eq!(lines[2].content, "The water was calm.");
        assert_eq!(lines[2].lector_id.as_deref(), Some("narrator"));
        assert_eq!(lines[3].lector_id.as_deref(), Some("reef"));
        assert_eq!(lines[4].code(), None);
        assert_eq!(lines[4].lector_id.as_deref(), Some("reef"));
        assert_eq!(lines[5].content, "Just some narration.");
        assert_eq!(lines[5].code(), None);
    }

    #[test]
    fn malformed_lines_degrade_to_narration() {
        let blocks = parse("SampleLine: Code=\nZ: missing digits\n(S1): no role", &[]);
        assert_eq!(blocks.len(), 3);
        for block in &blocks {
            let line = block.as_line().expect("line");
            assert!(line.code().is_none());
            assert!(line.lector_id.is_none());
        }
        assert_eq!(blocks[1].as_line().map(|l| l.content.as_str()), Some("Z: missing digits"));
    }

    #[test]
    fn ids_are_unique() {
        let blocks = parse("S1: a\nS1: a\nS1: a", &lectors());
        assert_ne!(blocks[0].id, blocks[1].id);
        assert_ne!(blocks[1].id, blocks[2].id);
    }
}
