//! Story manifest: the TOML file naming a story's metadata and lectors.
//!
//! ```toml
//! [story]
//! title = "Ocean Rescue"
//! code = "ocean-rescue"
//! type = "audio"
//! age_group = "3-6"
//!
//! [[lectors]]
//! id = "narrator"
//! name = "Narrator"
//! externalVoiceId = "voice-1"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use story_data::Lector;

/// Errors raised while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("unable to read manifest '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("manifest defines no lectors")]
    NoLectors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryManifest {
    pub story: StoryInfo,
    #[serde(default)]
    pub voice_settings: VoiceSettings,
    #[serde(default)]
    pub lectors: Vec<Lector>,
}

/// Story-level metadata written into the story-type registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryInfo {
    pub title: String,
    pub code: String,
    #[serde(rename = "type", default = "default_story_type")]
    pub story_type: String,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub description: String,
}

impl StoryInfo {
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            story_type: default_story_type(),
            age_group: String::new(),
            description: String::new(),
        }
    }
}

/// Speech synthesis settings stored alongside each voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(default = "default_stability")]
    pub stability: f64,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_speaker_boost: Option<bool>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            style: None,
            use_speaker_boost: None,
        }
    }
}

impl StoryManifest {
    /// Read and decode a manifest file.
    ///
    /// # Errors
    /// Returns `ManifestError` when the file cannot be read, is not valid TOML,
    /// or lists no lectors.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Decode a manifest from TOML text.
    ///
    /// # Errors
    /// Returns `ManifestError` on invalid TOML or an empty lector list.
    pub fn from_toml_str(text: &str) -> Result<Self, ManifestError> {
        let manifest: StoryManifest = toml::from_str(text)?;
        if manifest.lectors.is_empty() {
            return Err(ManifestError::NoLectors);
        }
        Ok(manifest)
    }
}

fn default_story_type() -> String {
    "audio".to_string()
}

fn default_stability() -> f64 {
    0.5
}

fn default_similarity_boost() -> f64 {
    0.75
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"
[story]
title = "O'Brien's Quest"
code = "obrien"
age_group = "6-9"

[voice_settings]
stability = 0.3

[[lectors]]
id = "narrator"
name = "Narrator"
externalVoiceId = "voice-1"

[[lectors]]
id = "pirate"
name = "Pirate"
elevenId = "voice-2"
"#;

    #[test]
    fn decodes_with_defaults() {
        let manifest = StoryManifest::from_toml_str(MANIFEST).expect("manifest");
        assert_eq!(manifest.story.title, "O'Brien's Quest");
        assert_eq!(manifest.story.story_type, "audio");
        assert_eq!(manifest.story.description, "");
        assert!((manifest.voice_settings.stability - 0.3).abs() < f64::EPSILON);
        assert!((manifest.voice_settings.similarity_boost - 0.75).abs() < f64::EPSILON);
        assert_eq!(manifest.lectors.len(), 2);
        assert_eq!(manifest.lectors[1].external_voice_id, "voice-2");
    }

    #[test]
    fn rejects_empty_lectors() {
        let err = StoryManifest::from_toml_str("[story]\ntitle = \"t\"\ncode = \"c\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::NoLectors));
    }

    #[test]
    fn load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(MANIFEST.as_bytes()).expect("write");
        let manifest = StoryManifest::load(file.path()).expect("load");
        assert_eq!(manifest.story.code, "obrien");

        let missing = file.path().with_extension("missing");
        let err = StoryManifest::load(&missing).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
