//! Scenario JSON: the per-code variant map stored next to the DSL.

use log::{debug, warn};

use story_data::{Block, CodeKind, GenderPair, Lector, LineBlock, Scenario, ScenarioEntry, effective_lector};

use super::ExportError;
use crate::dsl::base_code;
use crate::resolve::resolved_pair;

/// Controls which lines are exported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioOptions {
    /// Also export static (`S`) lines. Off by default: static text lives in the DSL pipeline only.
    pub include_static: bool,
}

/// Build the scenario map for the dynamic lines of a block list.
///
/// Keys are codes without any partner suffix. If a code repeats, the first line wins.
pub fn build_scenario(blocks: &[Block], lectors: &[Lector], options: ScenarioOptions) -> Scenario {
    let mut scenario = Scenario::new();
    for line in blocks.iter().filter_map(Block::as_line) {
        let Some(code) = line.code() else { continue };
        let exported = match line.code_kind() {
            Some(CodeKind::Dynamic) => true,
            Some(CodeKind::Static) => options.include_static,
            None => false,
        };
        if !exported {
            continue;
        }
        let key = base_code(code).to_string();
        if scenario.contains_key(&key) {
            warn!("scenario: duplicate code {key}; keeping the first line");
            continue;
        }
        scenario.insert(key, scenario_entry(line, lectors));
    }
    debug!("scenario: {} entries", scenario.len());
    scenario
}

fn scenario_entry(line: &LineBlock, lectors: &[Lector]) -> ScenarioEntry {
    let GenderPair { boy, girl } = resolved_pair(line);
    let lector = effective_lector(lectors, line.lector_id.as_deref());
    ScenarioEntry {
        is_universal: line.is_gender_universal,
        is_partner_specific: line.is_partner_specific,
        boy,
        girl,
        lector: lector.map(|l| l.name.clone()).unwrap_or_default(),
        lector_id: lector
            .map(|l| l.id.clone())
            .or_else(|| line.lector_id.clone())
            .unwrap_or_default(),
        eleven_id: lector.map(|l| l.external_voice_id.clone()).unwrap_or_default(),
        images: line.image_by_gender.clone(),
        partner_overrides: line.partner_overrides.clone(),
        partner_images: line.image_overrides_by_partner.clone(),
    }
}

/// Pretty-print a scenario map.
///
/// # Errors
/// Returns `ExportError::Json` if encoding fails.
pub fn scenario_to_json(scenario: &Scenario) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(scenario)?)
}

/// Decode a stored scenario map.
///
/// # Errors
/// Returns `ExportError::Json` when the text is not a valid scenario map.
pub fn scenario_from_json(text: &str) -> Result<Scenario, ExportError> {
    Ok(serde_json::from_str(text)?)
}

/// Build and encode in one step.
///
/// # Errors
/// Returns `ExportError::Json` if encoding fails.
pub fn export_scenario_json(
    blocks: &[Block],
    lectors: &[Lector],
    options: ScenarioOptions,
) -> Result<String, ExportError> {
    scenario_to_json(&build_scenario(blocks, lectors, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lectors() -> Vec<Lector> {
        vec![Lector::new("narrator", "Narrator", "voice-1"), Lector::new("fox", "Fox", "voice-2")]
    }

    #[test]
    fn only_dynamic_lines_by_default() {
        let blocks = vec![
            Block::line(LineBlock::new("static").with_code("S1")),
            Block::line(LineBlock::new("dynamic [Name]").with_code("Z1")),
            Block::line(LineBlock::new("narration")),
        ];
        let scenario = build_scenario(&blocks, &lectors(), ScenarioOptions::default());
        assert_eq!(scenario.keys().collect::<Vec<_>>(), vec!["Z1"]);
        let entry = &scenario["Z1"];
        assert_eq!(entry.boy, "dynamic [Name]");
        assert_eq!(entry.girl, "dynamic [Name]");
        assert_eq!(entry.lector, "Narrator");
        assert_eq!(entry.eleven_id, "voice-1");

        let with_static = build_scenario(&blocks, &lectors(), ScenarioOptions { include_static: true });
        assert_eq!(with_static.keys().collect::<Vec<_>>(), vec!["S1", "Z1"]);
    }

    #[test]
    fn entry_carries_flags_images_and_overrides() {
        let mut line = LineBlock::new("x")
            .with_code("Z3")
            .with_lector(Some("fox".into()));
        line.is_partner_specific = true;
        line.gender_variants = Some(GenderPair::new("he runs".into(), "she runs".into()));
        line.image_by_gender = Some(GenderPair::new("b.png".into(), "g.png".into()));
        line.partner_overrides
            .insert("acme".into(), GenderPair::uniform("acme runs".to_string()));
        let scenario = build_scenario(&[Block::line(line)], &lectors(), ScenarioOptions::default());
        let json: serde_json::Value =
            serde_json::from_str(&scenario_to_json(&scenario).expect("json")).expect("valid json");
        let entry = &json["Z3"];
        assert_eq!(entry["isUniversal"], false);
        assert_eq!(entry["isPartnerSpecific"], true);
        assert_eq!(entry["boy"], "he runs");
        assert_eq!(entry["girl"], "she runs");
        assert_eq!(entry["lector"], "Fox");
        assert_eq!(entry["lectorId"], "fox");
        assert_eq!(entry["elevenId"], "voice-2");
        assert_eq!(entry["images"]["girl"], "g.png");
        assert_eq!(entry["partnerOverrides"]["acme"]["boy"], "acme runs");
        assert!(entry.get("partnerImages").is_none());
    }

    #[test]
    fn duplicate_codes_keep_first() {
        let blocks = vec![
            Block::line(LineBlock::new("first").with_code("Z1")),
            Block::line(LineBlock::new("second").with_code("Z1")),
        ];
        let scenario = build_scenario(&blocks, &lectors(), ScenarioOptions::default());
        assert_eq!(scenario.len(), 1);
        assert_eq!(scenario["Z1"].boy, "first");
    }

    #[test]
    fn json_round_trips_through_decoder() {
        let blocks = vec![Block::line(LineBlock::new("hello [Name]").with_code("Z1"))];
        let json = export_scenario_json(&blocks, &lectors(), ScenarioOptions::default()).expect("json");
        let decoded = scenario_from_json(&json).expect("decode");
        assert_eq!(decoded, build_scenario(&blocks, &lectors(), ScenarioOptions::default()));
    }
}
