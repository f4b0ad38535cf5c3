//! Scenario hydration: the second half of loading a saved story.
//!
//! The DSL stores structure and the scenario JSON stores text, so a load is
//! `parse` followed by `hydrate`. [`parse_story`] runs both.

use log::debug;

use story_data::{Block, GenderPair, Lector, LineBlock, Scenario, ScenarioEntry};

use crate::dsl::base_code;
use crate::parser::parse;

/// Fill coded lines from a scenario map. Lines whose code is not in the map are kept as they are.
pub fn hydrate(blocks: &[Block], scenario: &Scenario) -> Vec<Block> {
    let mut filled = 0usize;
    let out: Vec<Block> = blocks
        .iter()
        .map(|block| {
            let mut block = block.clone();
            if let Some(line) = block.as_line_mut()
                && let Some(entry) = line.code().and_then(|code| scenario.get(base_code(code)))
            {
                apply_entry(line, entry);
                filled += 1;
            }
            block
        })
        .collect();
    debug!("hydrate: {filled} lines filled from {} scenario entries", scenario.len());
    out
}

fn apply_entry(line: &mut LineBlock, entry: &ScenarioEntry) {
    line.content = entry.boy.clone();
    line.gender_variants = Some(GenderPair::new(entry.boy.clone(), entry.girl.clone()));
    line.is_gender_universal = entry.is_universal;
    line.is_partner_specific |= entry.is_partner_specific;
    if !entry.lector_id.is_empty() {
        line.lector_id = Some(entry.lector_id.clone());
    }
    line.image_by_gender = entry.images.clone();
    line.partner_overrides = entry.partner_overrides.clone();
    line.image_overrides_by_partner = entry.partner_images.clone();
}

/// Parse script text and, when a scenario map is given, hydrate the result.
pub fn parse_story(raw_text: &str, lectors: &[Lector], scenario: Option<&Scenario>) -> Vec<Block> {
    let blocks = parse(raw_text, lectors);
    match scenario {
        Some(scenario) => hydrate(&blocks, scenario),
        None => blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::to_dsl;
    use crate::export::scenario::{ScenarioOptions, build_scenario};
    use crate::resolve::resolve_text;
    use story_data::Gender;

    #[test]
    fn dsl_plus_scenario_restores_dynamic_text() {
        let lectors = vec![Lector::new("n", "Narrator", "v1"), Lector::new("f", "Fox", "v2")];
        let mut z = LineBlock::new("Run, [Name]!").with_code("Z1").with_lector(Some("f".into()));
        z.is_partner_specific = true;
        z.gender_variants = Some(GenderPair::new("Run, boy [Name]!".into(), "Run, girl [Name]!".into()));
        z.partner_overrides
            .insert("acme".into(), GenderPair::uniform("Acme run!".to_string()));
        let original = vec![Block::chapter("Chase"), Block::line(z)];

        let dsl = to_dsl(&original);
        let scenario = build_scenario(&original, &lectors, ScenarioOptions::default());
        let loaded = parse_story(&dsl, &lectors, Some(&scenario));

        let line = loaded[1].as_line().expect("line");
        assert_eq!(line.code(), Some("Z1"));
        assert!(line.is_partner_specific);
        assert_eq!(line.lector_id.as_deref(), Some("f"));
        assert_eq!(resolve_text(line, Gender::Girl, None), "Run, girl [Name]!");
        assert_eq!(resolve_text(line, Gender::Boy, Some("acme")), "Acme run!");
    }

    #[test]
    fn lines_missing_from_map_are_untouched() {
        let blocks = parse("SampleLine: Code=S1", &[]);
        let hydrated = hydrate(&blocks, &Scenario::new());
        assert_eq!(hydrated, blocks);
    }
}
