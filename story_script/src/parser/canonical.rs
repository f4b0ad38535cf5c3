//! Recognizers for the canonical DSL statements the serializer emits.

use story_data::{BackgroundCue, BlockKind, DEFAULT_PAUSE_SECONDS, LineBlock, PauseCue};

use super::LineContext;
use super::helpers::{SAMPLE_LINE, background_code, background_fade_in, background_fade_out};
use crate::stamp::parse_stamp;

/// `BackgroundSampleLine: Code=<name>, FadeIn=<stamp>, FadeOut=<stamp>`
pub(super) fn background_sample(line: &str) -> Option<BlockKind> {
    if !line.contains("BackgroundSampleLine") {
        return None;
    }
    let mut cue = BackgroundCue::new(background_code(line).unwrap_or_default());
    if let Some(fade_in) = background_fade_in(line) {
        cue.fade_in = fade_in;
    }
    if let Some(fade_out) = background_fade_out(line) {
        cue.fade_out = fade_out;
    }
    Some(BlockKind::Background(cue))
}

/// `PauseLine: 00:00:05`
pub(super) fn pause_line(line: &str) -> Option<BlockKind> {
    if !line.contains("PauseLine") {
        return None;
    }
    let duration_seconds = parse_stamp(line).unwrap_or(DEFAULT_PAUSE_SECONDS);
    Some(BlockKind::Pause(PauseCue { duration_seconds }))
}

/// `SampleLine: Code=S1` or `DynamicSampleLine: Code=Z1[Slug]`.
///
/// The DSL carries structure only, so the block comes back with empty content.
/// Text is restored from the scenario map by `scenario::hydrate`.
pub(super) fn sample_line(line: &str, ctx: &LineContext<'_>) -> Option<BlockKind> {
    let caps = SAMPLE_LINE.captures(line)?;
    let code = caps.get(2)?.as_str();
    let mut block = LineBlock::new(String::new())
        .with_code(code)
        .with_lector(ctx.default_lector());
    block.is_partner_specific = caps.get(3).is_some();
    Some(BlockKind::Line(block))
}
