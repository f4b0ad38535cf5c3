use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Structural problem found in a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Two blocks share an id.
    DuplicateBlock { kind: &'static str, id: BlockId },
    /// Two lectors share an id.
    DuplicateLector { id: Id },
    /// Two lines share a code.
    DuplicateCode { code: String },
    /// Code is not `S<n>` or `Z<n>`.
    MalformedCode { code: String },
    UnknownLector { lector_id: Id, line: String },
    /// Partner overrides stored on a line that is not partner-specific.
    StrayPartnerOverrides { line: String },
    /// Gender-universal line whose boy and girl texts differ.
    UnevenUniversalLine { line: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateBlock { kind, id } => write!(f, "{kind} block {id} appears twice"),
            ValidationError::DuplicateLector { id } => write!(f, "lector '{id}' is defined twice"),
            ValidationError::DuplicateCode { code } => write!(f, "code {code} is used by more than one line"),
            ValidationError::MalformedCode { code } => write!(f, "line code '{code}' is not S<n> or Z<n>"),
            ValidationError::UnknownLector { lector_id, line } => {
                write!(f, "line {line} is read by unknown lector '{lector_id}'")
            },
            ValidationError::StrayPartnerOverrides { line } => {
                write!(f, "line {line} has partner overrides but is not partner-specific")
            },
            ValidationError::UnevenUniversalLine { line } => {
                write!(f, "line {line} is gender-universal but its variants differ")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check structural invariants of a block list against its lectors.
///
/// Nothing here is fatal to the compiler; callers decide whether findings block a save.
///
/// ```
/// use story_data::{Block, Lector, LineBlock, validate_blocks};
///
/// let lectors = vec![Lector::new("narrator", "Narrator", "voice-1")];
/// let blocks = vec![
///     Block::episode("Ocean Rescue"),
///     Block::line(LineBlock::new("The water was calm.").with_code("S1")),
/// ];
/// assert!(validate_blocks(&blocks, &lectors).is_empty());
/// ```
pub fn validate_blocks(blocks: &[Block], lectors: &[Lector]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for block in blocks {
        if !ids.insert(block.id) {
            errors.push(ValidationError::DuplicateBlock {
                kind: block.kind_name(),
                id: block.id,
            });
        }
    }

    let mut lector_ids = HashSet::new();
    for lector in lectors {
        if !lector_ids.insert(lector.id.as_str()) {
            errors.push(ValidationError::DuplicateLector { id: lector.id.clone() });
        }
    }

    let mut codes = HashSet::new();
    for line in blocks.iter().filter_map(Block::as_line) {
        check_line(line, &lector_ids, &mut codes, &mut errors);
    }

    errors
}

fn check_line<'a>(
    line: &'a LineBlock,
    lector_ids: &HashSet<&str>,
    codes: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let label = line.code().unwrap_or("untagged line");

    if let Some(code) = line.code() {
        if !is_well_formed_code(code) {
            errors.push(ValidationError::MalformedCode { code: code.to_string() });
        }
        if !codes.insert(code) {
            errors.push(ValidationError::DuplicateCode { code: code.to_string() });
        }
    }

    if let Some(id) = line.lector_id.as_deref()
        && !lector_ids.contains(id)
    {
        errors.push(ValidationError::UnknownLector {
            lector_id: id.to_string(),
            line: label.to_string(),
        });
    }

    if !line.is_partner_specific
        && (!line.partner_overrides.is_empty() || !line.image_overrides_by_partner.is_empty())
    {
        errors.push(ValidationError::StrayPartnerOverrides { line: label.to_string() });
    }

    if line.is_gender_universal {
        let uneven = line.gender_variants.as_ref().is_some_and(|v| !v.is_uniform())
            || line.partner_overrides.values().any(|v| !v.is_uniform());
        if uneven {
            errors.push(ValidationError::UnevenUniversalLine { line: label.to_string() });
        }
    }
}
