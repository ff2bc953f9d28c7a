//! Error types produced by the diff engine.
//!
//! Every error message carries a stable bracketed code (see
//! [`crate::error_codes`]) and mismatch errors always embed both the expected
//! and the best-effort actual grid so a failure is debuggable without
//! re-running the comparison.

use crate::error_codes;
use crate::grid::Grid;
use crate::node::AccessError;
use thiserror::Error;

/// Classification of a [`DiffError`], used by the synchronizer to decide
/// whether an attempt may be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LocatorNotFound,
    StructuralMismatch,
    InvalidTemplate,
    TransientDocument,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiffError {
    #[error("[GRIDCHECK_LOCATE_001] no element matches locator '{locator}'. Suggestion: check the locator, or enable allow_not_found if an absent region is acceptable.")]
    LocatorNotFound { locator: String },

    #[error("[GRIDCHECK_COMPARE_001] expected and actual grids differ: {detail}\nexpected:\n{expected}\nactual:\n{actual}")]
    StructuralMismatch {
        detail: String,
        expected: Box<Grid>,
        actual: Box<Grid>,
    },

    /// A malformed or uncompilable template token. Always a caller authoring
    /// error, never document flakiness, so it is never retried.
    #[error("[GRIDCHECK_TEMPLATE_001] invalid template in cell at row {row}, column {col} ({cell:?}): {detail}")]
    InvalidTemplate {
        row: usize,
        col: usize,
        cell: String,
        detail: String,
    },

    #[error("[GRIDCHECK_DOCUMENT_001] document not settled: {message}")]
    TransientDocument { message: String },
}

impl DiffError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiffError::LocatorNotFound { .. } => ErrorKind::LocatorNotFound,
            DiffError::StructuralMismatch { .. } => ErrorKind::StructuralMismatch,
            DiffError::InvalidTemplate { .. } => ErrorKind::InvalidTemplate,
            DiffError::TransientDocument { .. } => ErrorKind::TransientDocument,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DiffError::LocatorNotFound { .. } => error_codes::LOCATOR_NOT_FOUND,
            DiffError::StructuralMismatch { .. } => error_codes::STRUCTURAL_MISMATCH,
            DiffError::InvalidTemplate { .. } => error_codes::INVALID_TEMPLATE,
            DiffError::TransientDocument { .. } => error_codes::TRANSIENT_DOCUMENT,
        }
    }

    pub(crate) fn mismatch(detail: impl Into<String>, expected: Grid, actual: Grid) -> DiffError {
        DiffError::StructuralMismatch {
            detail: detail.into(),
            expected: Box::new(expected),
            actual: Box::new(actual),
        }
    }
}

impl From<AccessError> for DiffError {
    fn from(err: AccessError) -> DiffError {
        match err {
            AccessError::NotFound { locator } => DiffError::LocatorNotFound { locator },
            AccessError::Transient { message } => DiffError::TransientDocument { message },
        }
    }
}
