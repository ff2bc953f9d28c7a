use crate::finder::FinderSet;
use crate::grid::{Cell, Grid};
use crate::node::NodeRef;
use tracing::trace;

/// Pull a raw grid out of a located region.
///
/// Applies the row finder to the root, the cell finder to each row node, and
/// the text finder to each cell node, preserving finder order exactly. Every
/// cell keeps a handle to its source node for context-sensitive
/// transformations. The result is not yet normalized.
pub fn extract(root: &NodeRef, finders: &FinderSet) -> Grid {
    let rows: Vec<Vec<Cell>> = (finders.rows)(root)
        .into_iter()
        .map(|row| {
            (finders.cells)(&row)
                .into_iter()
                .map(|cell| {
                    let text = (finders.text)(&cell);
                    Cell::live(text, cell)
                })
                .collect()
        })
        .collect();
    trace!(rows = rows.len(), "extracted raw grid");
    Grid { rows }
}
