//! Guard for externally rewritten variants.
//!
//! A gender rewrite must keep every bracketed placeholder such as `[Name]`.
//! The check compares counts only; it does not try to match names.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\[[^\[\]]+\]").expect("placeholder regex");
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error("placeholder count changed: expected {expected}, found {found}")]
    CountMismatch { expected: usize, found: usize },
}

/// Number of `[...]` placeholders in `text`.
pub fn count_placeholders(text: &str) -> usize {
    PLACEHOLDER.find_iter(text).count()
}

/// Reject `rewritten` if it does not carry as many placeholders as `original`.
///
/// # Errors
/// Returns `PlaceholderError::CountMismatch` when the counts differ.
pub fn check_placeholders(original: &str, rewritten: &str) -> Result<(), PlaceholderError> {
    let expected = count_placeholders(original);
    let found = count_placeholders(rewritten);
    if expected == found {
        Ok(())
    } else {
        Err(PlaceholderError::CountMismatch { expected, found })
    }
}
