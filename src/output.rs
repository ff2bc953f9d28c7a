//! JSON serialization of comparison failures.

use crate::error::DiffError;
use serde::{Deserialize, Serialize};

/// A machine-readable rendition of a structural mismatch, with both grids as
/// plain text rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchReport {
    pub code: String,
    pub detail: String,
    pub expected: Vec<Vec<String>>,
    pub actual: Vec<Vec<String>>,
}

impl MismatchReport {
    /// Extract a report from a [`DiffError::StructuralMismatch`]; other
    /// error kinds have no grid payload.
    pub fn from_error(err: &DiffError) -> Option<MismatchReport> {
        match err {
            DiffError::StructuralMismatch {
                detail,
                expected,
                actual,
            } => Some(MismatchReport {
                code: err.code().to_string(),
                detail: detail.clone(),
                expected: expected.to_text_rows(),
                actual: actual.to_text_rows(),
            }),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
