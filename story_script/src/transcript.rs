//! Editor-friendly transcript view of a block list.
//!
//! One readable line per block, separated by blank lines. This is what the
//! free-text editor is re-populated with; it re-parses to the same codes and
//! lectors but is not meant to rebuild the DSL byte for byte.

use story_data::{Block, BlockKind, Gender, Lector, effective_lector};

use crate::resolve::resolve_text;

/// Name used when neither the line nor the story names a lector.
pub const FALLBACK_LECTOR_NAME: &str = "Narrator";

pub fn to_transcript(blocks: &[Block], lectors: &[Lector]) -> String {
    blocks
        .iter()
        .map(|block| transcript_line(block, lectors))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn transcript_line(block: &Block, lectors: &[Lector]) -> String {
    match &block.kind {
        BlockKind::Episode { title } => format!("Episode: {title}"),
        BlockKind::Chapter { title } => format!("Chapter: {title}"),
        BlockKind::Background(cue) => format!("Background: {}: {}", cue.name, cue.fade_in),
        BlockKind::Pause(cue) => format!("Pause: {}", cue.duration_seconds),
        BlockKind::Line(line) => {
            let name = effective_lector(lectors, line.lector_id.as_deref())
                .map_or(FALLBACK_LECTOR_NAME, |l| l.name.as_str());
            let text = resolve_text(line, Gender::Boy, None);
            match line.code() {
                Some(code) => format!("{name} ({code}): {text}"),
                None => format!("{name}: {text}"),
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_data::{BackgroundCue, GenderPair, LineBlock};

    #[test]
    fn renders_each_kind() {
        let lectors = vec![Lector::new("n", "Narrator", "v1"), Lector::new("m", "Mermaid", "v2")];
        let mut dynamic = LineBlock::new("Hi [Name]").with_code("Z1").with_lector(Some("m".into()));
        dynamic.gender_variants = Some(GenderPair::new("Hi brave [Name]".into(), "Hi bold [Name]".into()));
        let blocks = vec![
            Block::episode("Ocean Rescue"),
            Block::chapter("The Dive"),
            Block::background(BackgroundCue::new("Waves")),
            Block::pause(4),
            Block::line(dynamic),
            Block::line(LineBlock::new("The end.")),
        ];
        let expected = "\
Episode: Ocean Rescue

Chapter: The Dive

Background: Waves: 00:00:01

Pause: 4

Mermaid (Z1): Hi brave [Name]

Narrator: The end.";
        assert_eq!(to_transcript(&blocks, &lectors), expected);
    }

    #[test]
    fn no_lectors_uses_fallback_name() {
        let blocks = vec![Block::line(LineBlock::new("Hello").with_code("S1"))];
        assert_eq!(to_transcript(&blocks, &[]), "Narrator (S1): Hello");
    }
}
