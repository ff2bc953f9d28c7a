//! The transformation pipeline applied between extraction and comparison.
//!
//! Two stages run in order: header assembly (replace or rewrite the first
//! row), then the general grid transformations in registration order. A
//! transformation may change row lengths freely; the grid is renormalized
//! after every stage, and widths are corrected by padding only, never by
//! splitting cells into new columns.

use crate::grid::{Cell, Grid, Row};

pub type HeaderTransform = Box<dyn Fn(Row) -> Row>;
pub type GridTransform = Box<dyn Fn(Grid) -> Grid>;

/// How the header row is produced before the header transformations run.
pub enum HeaderRule {
    /// Use the grid's first row (an empty row for an empty grid).
    Keep,
    /// Replace the header with a freshly computed row; all extracted rows
    /// stay in the body.
    Replace(Box<dyn Fn() -> Vec<String>>),
}

/// Assemble the header per `rule`, run the header transformations over it,
/// prepend it back, and renormalize the whole grid.
pub(crate) fn assemble_header(
    grid: Grid,
    rule: &HeaderRule,
    transforms: &[HeaderTransform],
) -> Grid {
    let mut rows = grid.rows;
    let mut header: Row = match rule {
        HeaderRule::Replace(supplier) => {
            supplier().into_iter().map(Cell::synthesized).collect()
        }
        HeaderRule::Keep => {
            if rows.is_empty() {
                Row::new()
            } else {
                rows.remove(0)
            }
        }
    };
    for transform in transforms {
        header = transform(header);
    }
    rows.insert(0, header);
    Grid { rows }.normalize()
}

/// Apply the registered grid transformations in order, renormalizing after
/// each one.
pub(crate) fn apply_pipeline(mut grid: Grid, transforms: &[GridTransform]) -> Grid {
    for transform in transforms {
        grid = transform(grid).normalize();
    }
    grid
}
