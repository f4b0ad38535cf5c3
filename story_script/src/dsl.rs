//! Canonical DSL serializer.
//!
//! Container nesting is re-derived from block order: a chapter sits inside the
//! most recent episode, a background inside the most recent chapter. Closing a
//! container closes everything nested in it first, so every opened container
//! gets exactly one `End`.

use log::debug;

use story_data::{BackgroundCue, Block, BlockKind, CodeKind, LineBlock};

use crate::stamp::format_stamp;

const INDENT: &str = "    ";

/// Literal suffix appended to partner-specific codes.
pub const PARTNER_SUFFIX: &str = "[Slug]";

/// Serialize blocks to canonical DSL text.
///
/// Untagged lines carry no structure and are left out. Re-parsing the output
/// yields the same codes, but `SampleLine`/`DynamicSampleLine` statements come
/// back with empty content; the text lives in the scenario map.
pub fn to_dsl(blocks: &[Block]) -> String {
    let mut writer = DslWriter::default();
    for block in blocks {
        writer.block(block);
    }
    writer.finish()
}

/// The code as written in the DSL, with the partner suffix when applicable.
pub fn dsl_code(line: &LineBlock) -> Option<String> {
    let code = line.code()?;
    Some(if line.is_partner_specific {
        format!("{code}{PARTNER_SUFFIX}")
    } else {
        code.to_string()
    })
}

/// Strip a trailing `[...]` partner suffix from a code.
pub fn base_code(code: &str) -> &str {
    match code.find('[') {
        Some(idx) => code[..idx].trim_end(),
        None => code,
    }
}

#[derive(Default)]
struct DslWriter {
    out: String,
    episode: bool,
    chapter: bool,
    background: bool,
    ends: usize,
}

impl DslWriter {
    fn block(&mut self, block: &Block) {
        match &block.kind {
            BlockKind::Episode { .. } => {
                self.close_episode();
                self.emit(0, "Episode:");
                self.episode = true;
            },
            BlockKind::Chapter { title } => {
                self.close_chapter();
                self.emit(self.chapter_depth(), &format!("Chapter: {title}"));
                self.chapter = true;
            },
            BlockKind::Background(cue) => {
                self.close_background();
                self.emit(self.background_depth(), &background_statement(cue));
                self.background = true;
            },
            BlockKind::Pause(cue) => {
                let stmt = format!("PauseLine: {}", format_stamp(cue.duration_seconds));
                self.emit(self.line_depth(), &stmt);
            },
            BlockKind::Line(line) => {
                if let Some(stmt) = line_statement(line) {
                    self.emit(self.line_depth(), &stmt);
                }
            },
        }
    }

    fn chapter_depth(&self) -> usize {
        usize::from(self.episode)
    }

    fn background_depth(&self) -> usize {
        self.chapter_depth() + usize::from(self.chapter)
    }

    fn line_depth(&self) -> usize {
        self.background_depth() + usize::from(self.background)
    }

    fn close_background(&mut self) {
        if self.background {
            self.background = false;
            self.end(self.background_depth());
        }
    }

    fn close_chapter(&mut self) {
        self.close_background();
        if self.chapter {
            self.chapter = false;
            self.end(self.chapter_depth());
        }
    }

    fn close_episode(&mut self) {
        self.close_chapter();
        if self.episode {
            self.episode = false;
            self.end(0);
        }
    }

    fn end(&mut self, depth: usize) {
        self.ends += 1;
        self.emit(depth, "End");
    }

    fn emit(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        self.close_episode();
        debug!("dsl: {} bytes, {} End markers", self.out.len(), self.ends);
        self.out
    }
}

fn background_statement(cue: &BackgroundCue) -> String {
    format!(
        "BackgroundSampleLine: Code={}, FadeIn={}, FadeOut={}",
        cue.name, cue.fade_in, cue.fade_out
    )
}

fn line_statement(line: &LineBlock) -> Option<String> {
    let code = dsl_code(line)?;
    let keyword = match line.code_kind() {
        Some(CodeKind::Dynamic) => "DynamicSampleLine",
        _ => "SampleLine",
    };
    Some(format!("{keyword}: Code={code}"))
}
