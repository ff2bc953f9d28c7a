//! Header-keyed row views for field-level transformations.
//!
//! A [`HashRow`] is an ephemeral view of one body row with each cell
//! addressable by its derived header key. Views are produced with
//! [`to_hash_rows`], handed to a caller function that may inspect and mutate
//! across rows, and flattened back with [`from_hash_rows`]; no state hides in
//! between.

use crate::grid::{Cell, Grid, Row};
use crate::keys::derive_keys;

/// One body row keyed by the header. Entries preserve the header's column
/// order; keys added by a caller land after the original columns.
#[derive(Debug, Clone)]
pub struct HashRow {
    entries: Vec<(String, Cell)>,
}

impl HashRow {
    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, cell)| cell)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).map(|cell| cell.text.as_str())
    }

    /// Replace the cell under `key`, or append a new entry when the key is
    /// not present.
    pub fn set(&mut self, key: &str, cell: impl Into<Cell>) {
        let cell = cell.into();
        match self
            .entries
            .iter_mut()
            .find(|(entry_key, _)| entry_key == key)
        {
            Some((_, existing)) => *existing = cell,
            None => self.entries.push((key.to_string(), cell)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.entries
            .iter()
            .map(|(key, cell)| (key.as_str(), cell))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn into_cells(self) -> Row {
        self.entries.into_iter().map(|(_, cell)| cell).collect()
    }
}

/// Split a grid into its header row and one [`HashRow`] per body row.
pub fn to_hash_rows(grid: &Grid) -> (Row, Vec<HashRow>) {
    let Some((header, body)) = grid.rows.split_first() else {
        return (Row::new(), Vec::new());
    };
    let keys = derive_keys(header);
    let hash_rows = body
        .iter()
        .map(|row| HashRow {
            entries: keys
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let cell = row.get(i).cloned().unwrap_or_else(Cell::empty);
                    (key.clone(), cell)
                })
                .collect(),
        })
        .collect();
    (header.clone(), hash_rows)
}

/// Reassemble a grid from the header and the (possibly mutated) row views.
pub fn from_hash_rows(header: Row, rows: Vec<HashRow>) -> Grid {
    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(header);
    out.extend(rows.into_iter().map(HashRow::into_cells));
    Grid { rows: out }
}
