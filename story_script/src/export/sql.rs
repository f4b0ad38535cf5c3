//! SQL insert scripts for manual ingestion.
//!
//! Four independent scripts, one per table. Target ids do not exist until the
//! earlier inserts commit, so references go through sub-selects on natural keys
//! (voice external id, story title) instead of numeric ids. Every interpolated
//! value is quoted with [`sql_literal`].

use log::debug;

use story_data::{Block, Gender, Lector, LineBlock, effective_lector};

use super::ExportError;
use crate::dsl::base_code;
use crate::manifest::{StoryInfo, VoiceSettings};
use crate::resolve::resolve_text;

/// Placeholder script for stories without dynamic lines.
pub const NO_DYNAMIC_LINES: &str = "-- no dynamic lines";

/// The four generated scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlBundle {
    pub voices: String,
    pub story_type: String,
    pub schema: String,
    pub dynamic_lines: String,
}

impl SqlBundle {
    /// `(file name, script)` pairs in execution order.
    pub fn files(&self) -> [(&'static str, &str); 4] {
        [
            ("voices.sql", self.voices.as_str()),
            ("story_type.sql", self.story_type.as_str()),
            ("schema.sql", self.schema.as_str()),
            ("dynamic_lines.sql", self.dynamic_lines.as_str()),
        ]
    }
}

/// Quote a value as a SQL string literal, doubling single quotes.
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Discriminator stored in the dynamic-line table for each gender.
pub fn gender_discriminator(gender: Gender) -> &'static str {
    match gender {
        Gender::Boy => "He",
        Gender::Girl => "She",
    }
}

fn header(table: &str, story: &StoryInfo) -> String {
    format!("-- {table} for story {}\n", sql_literal(&story.title))
}

fn voice_ref(lector: Option<&Lector>) -> String {
    match lector {
        Some(l) => format!(
            "(SELECT id FROM voices WHERE eleven_id = {} LIMIT 1)",
            sql_literal(&l.external_voice_id)
        ),
        None => "NULL".to_string(),
    }
}

fn story_type_ref(story: &StoryInfo) -> String {
    format!(
        "(SELECT id FROM story_types WHERE title = {} LIMIT 1)",
        sql_literal(&story.title)
    )
}

fn schema_ref(story: &StoryInfo) -> String {
    format!(
        "(SELECT s.id FROM story_schemas s JOIN story_types t ON t.id = s.story_type_id WHERE t.title = {} LIMIT 1)",
        sql_literal(&story.title)
    )
}

/// Voice registry: one row per lector with the shared synthesis settings.
///
/// # Errors
/// Returns `ExportError::Json` if the settings cannot be encoded.
pub fn voices_sql(story: &StoryInfo, lectors: &[Lector], settings: &VoiceSettings) -> Result<String, ExportError> {
    let settings_json = serde_json::to_string(settings)?;
    let mut out = header("voices", story);
    if lectors.is_empty() {
        out.push_str("-- no lectors defined\n");
        return Ok(out);
    }
    for lector in lectors {
        out.push_str(&format!(
            "INSERT INTO voices (eleven_id, name, settings) VALUES ({}, {}, {});\n",
            sql_literal(&lector.external_voice_id),
            sql_literal(&lector.name),
            sql_literal(&settings_json)
        ));
    }
    Ok(out)
}

/// Story-type registry row. The story's voice is the default (first) lector.
pub fn story_type_sql(story: &StoryInfo, lectors: &[Lector]) -> String {
    let mut out = header("story_types", story);
    out.push_str(&format!(
        "INSERT INTO story_types (title, code, voice_id, type, age_group, description) VALUES ({}, {}, {}, {}, {}, {});\n",
        sql_literal(&story.title),
        sql_literal(&story.code),
        voice_ref(effective_lector(lectors, None)),
        sql_literal(&story.story_type),
        sql_literal(&story.age_group),
        sql_literal(&story.description)
    ));
    out
}

/// Schema registry row holding the DSL text.
pub fn schema_sql(story: &StoryInfo, dsl: &str) -> String {
    let mut out = header("story_schemas", story);
    out.push_str(&format!(
        "INSERT INTO story_schemas (story_type_id, schema) VALUES ({}, {});\n",
        story_type_ref(story),
        sql_literal(dsl)
    ));
    out
}

/// Dynamic-line registry: two rows per `Z` line, `'He'` then `'She'`.
pub fn dynamic_lines_sql(story: &StoryInfo, blocks: &[Block], lectors: &[Lector]) -> String {
    let dynamic: Vec<&LineBlock> = blocks
        .iter()
        .filter_map(Block::as_line)
        .filter(|l| l.is_dynamic())
        .collect();
    let mut out = header("dynamic_lines", story);
    if dynamic.is_empty() {
        out.push_str(NO_DYNAMIC_LINES);
        out.push('\n');
        return out;
    }
    let schema = schema_ref(story);
    for line in &dynamic {
        let code = line.code().map(base_code).unwrap_or_default();
        let voice = voice_ref(effective_lector(lectors, line.lector_id.as_deref()));
        for gender in Gender::ALL {
            out.push_str(&format!(
                "INSERT INTO dynamic_lines (code, text, schema_id, voice_id, gender) VALUES ({}, {}, {}, {}, {});\n",
                sql_literal(code),
                sql_literal(resolve_text(line, gender, None)),
                schema,
                voice,
                sql_literal(gender_discriminator(gender))
            ));
        }
    }
    debug!("sql: {} dynamic lines, {} rows", dynamic.len(), dynamic.len() * 2);
    out
}

/// Generate all four scripts for a story.
///
/// # Errors
/// Returns `ExportError::Json` if the voice settings cannot be encoded.
pub fn generate_sql(
    story: &StoryInfo,
    settings: &VoiceSettings,
    blocks: &[Block],
    lectors: &[Lector],
    dsl: &str,
) -> Result<SqlBundle, ExportError> {
    Ok(SqlBundle {
        voices: voices_sql(story, lectors, settings)?,
        story_type: story_type_sql(story, lectors),
        schema: schema_sql(story, dsl),
        dynamic_lines: dynamic_lines_sql(story, blocks, lectors),
    })
}
