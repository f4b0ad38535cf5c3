//! Recognizers for the looser editor shorthand. Input only; never emitted by `to_dsl`.

use story_data::{BackgroundCue, BlockKind, DEFAULT_PAUSE_SECONDS, LineBlock, PauseCue, lector_by_name};

use super::LineContext;
use super::helpers::{COMPACT_LINE, ROLE_CODE_LINE, ROLE_LINE, strip_prefix_ignore_case};

/// `Background: Name: param`. The param lands in the fade-in slot as written.
pub(super) fn background(line: &str) -> Option<BlockKind> {
    strip_prefix_ignore_case(line, "background")?;
    let mut parts = line.splitn(3, ':').skip(1);
    let mut cue = BackgroundCue::new(parts.next().unwrap_or_default().trim());
    if let Some(param) = parts.next().map(str::trim).filter(|p| !p.is_empty()) {
        cue.fade_in = param.to_string();
    }
    Some(BlockKind::Background(cue))
}

/// `pause: 3` or `pauza: 3`
pub(super) fn pause(line: &str) -> Option<BlockKind> {
    let rest = strip_prefix_ignore_case(line, "pause:").or_else(|| strip_prefix_ignore_case(line, "pauza:"))?;
    let duration_seconds = rest.trim().parse().unwrap_or(DEFAULT_PAUSE_SECONDS);
    Some(BlockKind::Pause(PauseCue { duration_seconds }))
}

/// `S1: text`
pub(super) fn compact(line: &str, ctx: &LineContext<'_>) -> Option<BlockKind> {
    let caps = COMPACT_LINE.captures(line)?;
    let block = LineBlock::new(caps[2].trim())
        .with_code(&caps[1])
        .with_lector(ctx.default_lector());
    Some(BlockKind::Line(block))
}

/// `Narrator (S1): text`. Unknown roles fall back to the default lector.
///
/// A `[..]` suffix on the code marks the line partner-specific, as in the DSL.
pub(super) fn role_with_code(line: &str, ctx: &LineContext<'_>) -> Option<BlockKind> {
    let caps = ROLE_CODE_LINE.captures(line)?;
    let lector = ctx.lector_named(&caps[1]).or_else(|| ctx.default_lector());
    let mut block = LineBlock::new(caps[4].trim())
        .with_code(&caps[2])
        .with_lector(lector);
    block.is_partner_specific = caps.get(3).is_some();
    Some(BlockKind::Line(block))
}

/// `Narrator: text`, the code-less form the transcript writes. Only known lectors match.
pub(super) fn role_without_code(line: &str, ctx: &LineContext<'_>) -> Option<BlockKind> {
    let caps = ROLE_LINE.captures(line)?;
    let lector = lector_by_name(ctx.lectors, &caps[1])?;
    let block = LineBlock::new(caps[2].trim()).with_lector(Some(lector.id.clone()));
    Some(BlockKind::Line(block))
}
