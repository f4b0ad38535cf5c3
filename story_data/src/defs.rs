use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifier used for lector references.
pub type Id = String;

/// Default fade-in stamp for background cues.
pub const DEFAULT_FADE_IN: &str = "00:00:01";
/// Default fade-out stamp for background cues.
pub const DEFAULT_FADE_OUT: &str = "00:00:02";
/// Default pause length in seconds.
pub const DEFAULT_PAUSE_SECONDS: u32 = 2;

/// Opaque block identifier. Assigned once and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    /// Allocate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recipient gender used to pick a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Boy,
    Girl,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Boy, Gender::Girl];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Boy => "boy",
            Gender::Girl => "girl",
        }
    }
}

/// A `{boy, girl}` pair. Both slots always exist, so a partial variant cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenderPair<T> {
    pub boy: T,
    pub girl: T,
}

impl<T> GenderPair<T> {
    pub fn new(boy: T, girl: T) -> Self {
        Self { boy, girl }
    }

    pub fn get(&self, gender: Gender) -> &T {
        match gender {
            Gender::Boy => &self.boy,
            Gender::Girl => &self.girl,
        }
    }

    pub fn set(&mut self, gender: Gender, value: T) {
        match gender {
            Gender::Boy => self.boy = value,
            Gender::Girl => self.girl = value,
        }
    }
}

impl<T: Clone> GenderPair<T> {
    /// Same value in both slots.
    pub fn uniform(value: T) -> Self {
        Self {
            boy: value.clone(),
            girl: value,
        }
    }
}

impl<T: PartialEq> GenderPair<T> {
    pub fn is_uniform(&self) -> bool {
        self.boy == self.girl
    }
}

/// Voice-actor role definition. Owned by the story record and referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lector {
    pub id: Id,
    pub name: String,
    #[serde(rename = "externalVoiceId", alias = "elevenId", alias = "external_voice_id", default)]
    pub external_voice_id: String,
}

impl Lector {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, external_voice_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            external_voice_id: external_voice_id.into(),
        }
    }
}

/// The lector used when a line does not name one: the first in the list.
pub fn default_lector(lectors: &[Lector]) -> Option<&Lector> {
    lectors.first()
}

/// Look up a lector by id.
pub fn find_lector<'a>(lectors: &'a [Lector], id: &str) -> Option<&'a Lector> {
    lectors.iter().find(|l| l.id == id)
}

/// Case-insensitive lookup by display name.
pub fn lector_by_name<'a>(lectors: &'a [Lector], name: &str) -> Option<&'a Lector> {
    let name = name.trim();
    lectors.iter().find(|l| l.name.eq_ignore_ascii_case(name))
}

/// Resolve a line's lector, falling back to the default lector.
pub fn effective_lector<'a>(lectors: &'a [Lector], lector_id: Option<&str>) -> Option<&'a Lector> {
    lector_id
        .and_then(|id| find_lector(lectors, id))
        .or_else(|| default_lector(lectors))
}

/// One timeline unit. Order in the surrounding `Vec` is the timeline order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// Kind-specific payload of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    Episode { title: String },
    Chapter { title: String },
    Background(BackgroundCue),
    Pause(PauseCue),
    Line(LineBlock),
}

impl Block {
    /// Wrap a payload with a freshly allocated id.
    pub fn new(kind: BlockKind) -> Self {
        Self { id: BlockId::new(), kind }
    }

    pub fn episode(title: impl Into<String>) -> Self {
        Self::new(BlockKind::Episode { title: title.into() })
    }

    pub fn chapter(title: impl Into<String>) -> Self {
        Self::new(BlockKind::Chapter { title: title.into() })
    }

    pub fn background(cue: BackgroundCue) -> Self {
        Self::new(BlockKind::Background(cue))
    }

    pub fn pause(duration_seconds: u32) -> Self {
        Self::new(BlockKind::Pause(PauseCue { duration_seconds }))
    }

    pub fn line(line: LineBlock) -> Self {
        Self::new(BlockKind::Line(line))
    }

    /// Short lowercase kind name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            BlockKind::Episode { .. } => "episode",
            BlockKind::Chapter { .. } => "chapter",
            BlockKind::Background(_) => "background",
            BlockKind::Pause(_) => "pause",
            BlockKind::Line(_) => "line",
        }
    }

    pub fn as_line(&self) -> Option<&LineBlock> {
        match &self.kind {
            BlockKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut LineBlock> {
        match &mut self.kind {
            BlockKind::Line(line) => Some(line),
            _ => None,
        }
    }
}

/// Background audio cue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundCue {
    pub name: String,
    #[serde(default = "default_fade_in")]
    pub fade_in: String,
    #[serde(default = "default_fade_out")]
    pub fade_out: String,
}

impl BackgroundCue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fade_in: default_fade_in(),
            fade_out: default_fade_out(),
        }
    }
}

impl Default for BackgroundCue {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Silence inserted into the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseCue {
    pub duration_seconds: u32,
}

impl Default for PauseCue {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_PAUSE_SECONDS,
        }
    }
}

/// Whether a line code marks a fixed or a parameterized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// `S<n>`: fixed text, carried by the DSL only.
    Static,
    /// `Z<n>`: personalized text, exported to the scenario map and SQL.
    Dynamic,
}

impl CodeKind {
    /// Classify a code by its leading letter. The numeric tail is not checked here.
    pub fn of(code: &str) -> Option<CodeKind> {
        match code.chars().next() {
            Some('Z') => Some(CodeKind::Dynamic),
            Some('S') => Some(CodeKind::Static),
            _ => None,
        }
    }
}

/// Returns true for codes shaped like `S<digits>` or `Z<digits>`.
pub fn is_well_formed_code(code: &str) -> bool {
    let mut chars = code.chars();
    matches!(chars.next(), Some('S' | 'Z')) && {
        let tail = chars.as_str();
        !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit())
    }
}

/// A dialogue or narration line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBlock {
    /// Fallback text when no variant is set.
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lector_id: Option<Id>,
    #[serde(default)]
    pub is_partner_specific: bool,
    #[serde(default)]
    pub is_gender_universal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_variants: Option<GenderPair<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub partner_overrides: BTreeMap<String, GenderPair<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_by_gender: Option<GenderPair<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub image_overrides_by_partner: BTreeMap<String, GenderPair<String>>,
}

impl LineBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.code = if code.is_empty() { None } else { Some(code) };
        self
    }

    pub fn with_lector(mut self, lector_id: Option<Id>) -> Self {
        self.lector_id = lector_id;
        self
    }

    /// The code, treating an empty string the same as no code.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }

    pub fn code_kind(&self) -> Option<CodeKind> {
        self.code().and_then(CodeKind::of)
    }

    pub fn is_dynamic(&self) -> bool {
        self.code_kind() == Some(CodeKind::Dynamic)
    }
}

/// One entry of the scenario JSON map, keyed by line code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEntry {
    /// Same concept as `LineBlock::is_gender_universal`.
    #[serde(default)]
    pub is_universal: bool,
    #[serde(default)]
    pub is_partner_specific: bool,
    #[serde(default)]
    pub boy: String,
    #[serde(default)]
    pub girl: String,
    /// Lector display name.
    #[serde(default)]
    pub lector: String,
    #[serde(default)]
    pub lector_id: String,
    #[serde(default)]
    pub eleven_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<GenderPair<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub partner_overrides: BTreeMap<String, GenderPair<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub partner_images: BTreeMap<String, GenderPair<String>>,
}

/// Scenario JSON map. Ordered so repeated exports are byte-identical.
pub type Scenario = BTreeMap<String, ScenarioEntry>;

fn default_fade_in() -> String {
    DEFAULT_FADE_IN.to_string()
}

fn default_fade_out() -> String {
    DEFAULT_FADE_OUT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_shapes() {
        assert!(is_well_formed_code("S1"));
        assert!(is_well_formed_code("Z42"));
        assert!(!is_well_formed_code("Z"));
        assert!(!is_well_formed_code("X1"));
        assert!(!is_well_formed_code("S1a"));
        assert_eq!(CodeKind::of("Z7"), Some(CodeKind::Dynamic));
        assert_eq!(CodeKind::of("S7"), Some(CodeKind::Static));
        assert_eq!(CodeKind::of(""), None);
    }

    #[test]
    fn new_blocks_get_fresh_ids() {
        let kind = BlockKind::Pause(PauseCue { duration_seconds: 3 });
        let a = Block::new(kind.clone());
        let b = Block::new(kind.clone());
        assert_ne!(a.id, b.id);
        assert_eq!(a.kind, kind);
        assert_eq!(a.kind_name(), "pause");
    }

    #[test]
    fn empty_code_counts_as_untagged() {
        let line = LineBlock::new("hi").with_code("");
        assert!(line.code().is_none());
        assert!(!line.is_dynamic());
    }

    #[test]
    fn effective_lector_falls_back_to_first() {
        let lectors = vec![Lector::new("n", "Narrator", "v1"), Lector::new("m", "Mermaid", "v2")];
        assert_eq!(effective_lector(&lectors, Some("m")).map(|l| l.name.as_str()), Some("Mermaid"));
        assert_eq!(effective_lector(&lectors, Some("ghost")).map(|l| l.name.as_str()), Some("Narrator"));
        assert_eq!(effective_lector(&lectors, None).map(|l| l.name.as_str()), Some("Narrator"));
        assert!(effective_lector(&[], None).is_none());
        assert_eq!(lector_by_name(&lectors, " mermaid ").map(|l| l.id.as_str()), Some("m"));
    }

    #[test]
    fn block_serializes_with_type_tag() {
        let block = Block::line(LineBlock::new("Hello").with_code("S1"));
        let json = serde_json::to_value(&block).expect("serialize");
        assert_eq!(json["type"], "line");
        assert_eq!(json["code"], "S1");
        assert_eq!(json["isPartnerSpecific"], false);
        let back: Block = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, block);
    }

    #[test]
    fn lector_accepts_eleven_id_alias() {
        let lector: Lector =
            serde_json::from_str(r#"{"id":"n","name":"Narrator","elevenId":"voice-1"}"#).expect("parse");
        assert_eq!(lector.external_voice_id, "voice-1");
    }
}
