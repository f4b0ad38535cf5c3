//! Variant resolution for dialogue lines.
//!
//! Lookup precedence: partner override, then the global gender pair, then the
//! line's fallback content. The write helpers keep gender-universal lines uniform.

use log::warn;

use story_data::{Gender, GenderPair, LineBlock};

/// Resolve the text shown or exported for `gender`, optionally for one partner.
///
/// Gender-universal lines always read the boy slot, so both genders agree even
/// if the stored pair drifted. `story_data::validate_blocks` reports such drift.
pub fn resolve_text<'a>(line: &'a LineBlock, gender: Gender, partner: Option<&str>) -> &'a str {
    let gender = effective_gender(line, gender);
    if let Some(pair) = partner.and_then(|slug| line.partner_overrides.get(slug)) {
        return pair.get(gender);
    }
    if let Some(pair) = &line.gender_variants {
        return pair.get(gender);
    }
    &line.content
}

/// Image analogue of [`resolve_text`]. Lines without any image resolve to `None`.
pub fn resolve_image<'a>(line: &'a LineBlock, gender: Gender, partner: Option<&str>) -> Option<&'a str> {
    let gender = effective_gender(line, gender);
    if let Some(pair) = partner.and_then(|slug| line.image_overrides_by_partner.get(slug)) {
        return Some(pair.get(gender).as_str());
    }
    line.image_by_gender.as_ref().map(|pair| pair.get(gender).as_str())
}

/// Both resolved texts for the generic (non-partner) audience.
pub fn resolved_pair(line: &LineBlock) -> GenderPair<String> {
    GenderPair::new(
        resolve_text(line, Gender::Boy, None).to_string(),
        resolve_text(line, Gender::Girl, None).to_string(),
    )
}

fn effective_gender(line: &LineBlock, gender: Gender) -> Gender {
    if line.is_gender_universal { Gender::Boy } else { gender }
}

/// Write text for one gender, globally or for one partner.
///
/// On a gender-universal line both slots are written. A partner override starts
/// from the line's current global text so the untouched gender keeps its value.
pub fn write_text(line: &mut LineBlock, gender: Gender, partner: Option<&str>, text: &str) {
    let seed = resolved_pair(line);
    let universal = line.is_gender_universal;
    let pair = match partner {
        Some(slug) => {
            if !line.is_partner_specific {
                warn!(
                    "partner override '{slug}' written to line {} which is not partner-specific",
                    line.code().unwrap_or("(untagged)")
                );
            }
            line.partner_overrides.entry(slug.to_string()).or_insert(seed)
        },
        None => line.gender_variants.get_or_insert(seed),
    };
    write_slot(pair, gender, universal, text);
    if partner.is_none() && (universal || gender == Gender::Boy) {
        line.content = text.to_string();
    }
}

/// Write an image URL for one gender, globally or for one partner.
pub fn write_image(line: &mut LineBlock, gender: Gender, partner: Option<&str>, url: &str) {
    let seed = line.image_by_gender.clone().unwrap_or_default();
    let universal = line.is_gender_universal;
    let pair = match partner {
        Some(slug) => line.image_overrides_by_partner.entry(slug.to_string()).or_insert(seed),
        None => line.image_by_gender.get_or_insert(seed),
    };
    write_slot(pair, gender, universal, url);
}

fn write_slot(pair: &mut GenderPair<String>, gender: Gender, universal: bool, value: &str) {
    if universal {
        *pair = GenderPair::uniform(value.to_string());
    } else {
        pair.set(gender, value.to_string());
    }
}

/// Toggle the gender-universal flag. Turning it on copies every boy slot over the girl slot.
pub fn set_gender_universal(line: &mut LineBlock, universal: bool) {
    line.is_gender_universal = universal;
    if !universal {
        return;
    }
    let pairs = line
        .gender_variants
        .iter_mut()
        .chain(line.image_by_gender.iter_mut())
        .chain(line.partner_overrides.values_mut())
        .chain(line.image_overrides_by_partner.values_mut());
    for pair in pairs {
        pair.girl = pair.boy.clone();
    }
}
