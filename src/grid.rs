//! Grid, row, and cell data structures.
//!
//! This module defines the core intermediate representation shared by the
//! whole engine:
//! - [`Cell`]: a text value with an optional handle back to the live node it
//!   was extracted from
//! - [`Row`]: an ordered sequence of cells with no identity beyond position
//! - [`Grid`]: ordered rows; the first row is conventionally the header
//!
//! Grids are rebuilt from scratch on every extraction cycle. Equality,
//! hashing, and serialization consider cell text only; the live handle exists
//! purely so context-sensitive transformations can inspect the source node.

use crate::node::NodeRef;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single cell of extracted or expected text.
#[derive(Clone)]
pub struct Cell {
    /// The resolved text content.
    pub text: String,
    /// Handle to the live node this cell was extracted from. `None` for
    /// cells synthesized by padding or transformations.
    pub source: Option<NodeRef>,
}

impl Cell {
    /// A cell produced by a transformation or padding, with no live source.
    pub fn synthesized(text: impl Into<String>) -> Cell {
        Cell {
            text: text.into(),
            source: None,
        }
    }

    /// A cell extracted from a live node.
    pub fn live(text: impl Into<String>, source: NodeRef) -> Cell {
        Cell {
            text: text.into(),
            source: Some(source),
        }
    }

    pub fn empty() -> Cell {
        Cell::synthesized("")
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.is_some() {
            write!(f, "Cell({:?}, live)", self.text)
        } else {
            write!(f, "Cell({:?})", self.text)
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(Cell::synthesized(text))
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Cell {
        Cell::synthesized(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Cell {
        Cell::synthesized(text)
    }
}

/// An ordered sequence of cells.
pub type Row = Vec<Cell>;

/// An ordered sequence of rows of text cells.
///
/// # Invariants
///
/// After [`Grid::normalize`], every row has identical length equal to the
/// maximum row length observed at that point. A grid with zero rows is valid
/// and represents "nothing found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Grid {
    pub rows: Vec<Row>,
}

impl Grid {
    pub fn new() -> Grid {
        Grid { rows: Vec::new() }
    }

    /// Build a grid of synthesized cells from nested text values.
    pub fn from_rows<R, C>(rows: R) -> Grid
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Grid {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|text| Cell::synthesized(text)).collect())
                .collect(),
        }
    }

    pub fn to_text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.clone()).collect())
            .collect()
    }

    /// The maximum row length, 0 for an empty grid.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the grid has no rows or every cell's text is empty.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(Cell::is_empty))
    }

    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Right-pad every row with empty cells up to the maximum row length.
    /// Idempotent; an empty grid stays empty.
    pub fn normalize(mut self) -> Grid {
        let width = self.width();
        for row in &mut self.rows {
            while row.len() < width {
                row.push(Cell::empty());
            }
        }
        self
    }

    /// View a two-column grid as ordered (label, value) pairs. Missing cells
    /// read as empty strings; surplus cells are ignored.
    pub fn rows_hash(&self) -> Vec<(String, String)> {
        self.rows
            .iter()
            .map(|row| {
                let label = row.first().map(|c| c.text.clone()).unwrap_or_default();
                let value = row.get(1).map(|c| c.text.clone()).unwrap_or_default();
                (label, value)
            })
            .collect()
    }

    /// Zip the literal header texts with every body row, one pair list per
    /// row. Keys keep the header's spelling; see [`crate::normalize_key`] for
    /// the folded form used elsewhere.
    pub fn hashes(&self) -> Vec<Vec<(String, String)>> {
        let Some((header, body)) = self.rows.split_first() else {
            return Vec::new();
        };
        body.iter()
            .map(|row| {
                header
                    .iter()
                    .enumerate()
                    .map(|(i, key)| {
                        let value = row.get(i).map(|c| c.text.clone()).unwrap_or_default();
                        (key.text.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

/// An expected-table value: any grid-like type that can yield a [`Grid`]
/// for comparison. Callers with their own table representation implement
/// this once and pass it straight to a differ.
pub trait ExpectedTable {
    fn as_grid(&self) -> Grid;
}

impl ExpectedTable for Grid {
    fn as_grid(&self) -> Grid {
        self.clone()
    }
}

impl ExpectedTable for Vec<Vec<String>> {
    fn as_grid(&self) -> Grid {
        Grid::from_rows(self.iter().map(|row| row.iter().cloned()))
    }
}

impl fmt::Display for Grid {
    /// Pipe-table rendering with padded columns, used by mismatch reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "(empty)");
        }
        let width = self.width();
        let mut col_widths = vec![0usize; width];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(cell.text.chars().count());
            }
        }
        for (r, row) in self.rows.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "|")?;
            for (i, target) in col_widths.iter().enumerate() {
                let text = row.get(i).map(|c| c.text.as_str()).unwrap_or("");
                let pad = target - text.chars().count();
                write!(f, " {}{} |", text, " ".repeat(pad))?;
            }
        }
        Ok(())
    }
}
