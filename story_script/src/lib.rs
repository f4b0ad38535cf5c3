//! story_script: compiler for Story Script timelines.
//!
//! Translates between authored script text and the block model in `story_data`:
//! - `parse` turns canonical DSL or editor shorthand into blocks, never failing;
//! - `to_dsl` writes the canonical nested DSL back out;
//! - `to_transcript` writes the editor view (`Narrator (S1): text`);
//! - `export` projects blocks into the scenario JSON map and SQL insert scripts.
//!
//! Every function here is a pure transformation of its inputs; repeated calls on
//! the same blocks produce byte-identical output.

pub mod dsl;
pub mod export;
pub mod manifest;
mod parser;
pub mod placeholders;
pub mod resolve;
pub mod scenario;
pub mod stamp;
pub mod timeline;
pub mod transcript;

pub use dsl::{base_code, dsl_code, to_dsl};
pub use export::ExportError;
pub use export::scenario::{ScenarioOptions, build_scenario, export_scenario_json, scenario_from_json, scenario_to_json};
pub use export::sql::{SqlBundle, generate_sql, sql_literal};
pub use manifest::{ManifestError, StoryInfo, StoryManifest, VoiceSettings};
pub use parser::parse;
pub use placeholders::{PlaceholderError, check_placeholders, count_placeholders};
pub use resolve::{resolve_image, resolve_text, write_image, write_text};
pub use scenario::{hydrate, parse_story};
pub use transcript::to_transcript;
