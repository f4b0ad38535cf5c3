//! Projections of a block list into the artifacts production ingests:
//! the scenario JSON map and the SQL insert scripts.

use thiserror::Error;

pub mod scenario;
pub mod sql;

/// Errors that can occur while encoding export artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
