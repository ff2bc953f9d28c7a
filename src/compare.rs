//! Grid comparison policy and the default structural comparator.
//!
//! The engine delegates the actual grid-vs-grid equality check to a
//! [`Comparator`] so callers can plug their own table type's diffing in. Two
//! degenerate cases never reach the comparator: when both grids are blank the
//! comparison succeeds outright, and when exactly one is blank it fails with
//! a structural error, since blank-vs-blank literal equality is not something
//! every comparator handles gracefully.

use crate::error::DiffError;
use crate::grid::Grid;
use crate::template::{self, TemplateConfig};

/// Leniency flags passed through to the comparator unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Ignore actual rows beyond the expected row count.
    pub allow_surplus_rows: bool,
    /// Ignore actual columns beyond each expected row's width.
    pub allow_surplus_columns: bool,
}

/// Structural equality plus diff reporting between two grids.
pub trait Comparator {
    fn compare(
        &self,
        expected: &Grid,
        actual: &Grid,
        options: &CompareOptions,
    ) -> Result<(), DiffError>;
}

/// Positional cell-by-cell comparison; the mismatch message names the first
/// differing row.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralComparator;

impl Comparator for StructuralComparator {
    fn compare(
        &self,
        expected: &Grid,
        actual: &Grid,
        options: &CompareOptions,
    ) -> Result<(), DiffError> {
        let expected_rows = expected.rows.len();
        let actual_rows = actual.rows.len();
        if actual_rows < expected_rows
            || (!options.allow_surplus_rows && actual_rows > expected_rows)
        {
            return Err(DiffError::mismatch(
                format!("expected {expected_rows} rows, found {actual_rows}"),
                expected.clone(),
                actual.clone(),
            ));
        }
        for (i, expected_row) in expected.rows.iter().enumerate() {
            let actual_row = &actual.rows[i];
            let widths_match = if options.allow_surplus_columns {
                actual_row.len() >= expected_row.len()
            } else {
                actual_row.len() == expected_row.len()
            };
            if !widths_match {
                return Err(DiffError::mismatch(
                    format!(
                        "first difference at row {i}: expected {} columns, found {}",
                        expected_row.len(),
                        actual_row.len()
                    ),
                    expected.clone(),
                    actual.clone(),
                ));
            }
            for (j, expected_cell) in expected_row.iter().enumerate() {
                if actual_row[j].text != expected_cell.text {
                    return Err(DiffError::mismatch(
                        format!(
                            "first difference at row {i}, column {j}: expected {:?}, found {:?}",
                            expected_cell.text, actual_row[j].text
                        ),
                        expected.clone(),
                        actual.clone(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// One full comparison pass: blank-policy short circuit, template rewrite of
/// the expected side, then delegation to the comparator.
pub(crate) fn run(
    expected: &Grid,
    actual: &Grid,
    templates: &TemplateConfig,
    comparator: &dyn Comparator,
    options: &CompareOptions,
) -> Result<(), DiffError> {
    let expected_blank = expected.is_blank();
    let actual_blank = actual.is_blank();
    if expected_blank || actual_blank {
        if expected_blank && actual_blank {
            return Ok(());
        }
        let detail = if expected_blank {
            "expected an empty region but found content"
        } else {
            "expected content but the region is empty"
        };
        return Err(DiffError::mismatch(
            detail,
            expected.clone(),
            actual.clone(),
        ));
    }
    let expected = template::apply(expected, actual, templates)?;
    comparator.compare(&expected, actual, options)
}
