//! Filling form controls from a two-column grid.
//!
//! The write side of the document is deliberately thin: the engine only
//! decides which operation to dispatch per control kind, and the caller's
//! [`FormHost`] owns how a field is located and mutated.

use crate::error::DiffError;
use crate::grid::Grid;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Select,
    File,
}

/// Caller-supplied access to the document's form controls, addressed by
/// label. An unknown label should surface as
/// [`DiffError::LocatorNotFound`].
pub trait FormHost {
    fn field_kind(&self, label: &str) -> Result<ControlKind, DiffError>;
    fn fill_in(&mut self, label: &str, value: &str) -> Result<(), DiffError>;
    fn select(&mut self, label: &str, option: &str) -> Result<(), DiffError>;
    fn attach_file(&mut self, label: &str, path: &Path) -> Result<(), DiffError>;
}

/// Walk a two-column (label, value) grid and fill each control according to
/// its kind. File values are resolved relative to `fixture_dir`.
pub fn fill_form(
    host: &mut dyn FormHost,
    table: &Grid,
    fixture_dir: &Path,
) -> Result<(), DiffError> {
    for (label, value) in table.rows_hash() {
        match host.field_kind(&label)? {
            ControlKind::Select => host.select(&label, &value)?,
            ControlKind::File => host.attach_file(&label, &fixture_dir.join(&value))?,
            ControlKind::Text => host.fill_in(&label, &value)?,
        }
    }
    Ok(())
}
