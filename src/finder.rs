//! Finder configuration: how to locate rows, cells, and text in a region.
//!
//! A [`FinderSet`] is bound once when an adapter or differ is constructed and
//! stays immutable for the duration of a comparison. The engine imposes no
//! ordering of its own; rows and cells come out exactly as the finders return
//! them.

use crate::node::NodeRef;

pub type RowsFinder = Box<dyn Fn(&NodeRef) -> Vec<NodeRef>>;
pub type CellsFinder = Box<dyn Fn(&NodeRef) -> Vec<NodeRef>>;
pub type TextFinder = Box<dyn Fn(&NodeRef) -> String>;

pub struct FinderSet {
    pub rows: RowsFinder,
    pub cells: CellsFinder,
    pub text: TextFinder,
}

impl FinderSet {
    pub fn new(rows: RowsFinder, cells: CellsFinder, text: TextFinder) -> FinderSet {
        FinderSet { rows, cells, text }
    }

    /// Selector-driven finders: rows and cells located by descendant
    /// selectors, text read directly off the cell node.
    pub fn from_selectors(row_selector: &str, cell_selector: &str) -> FinderSet {
        let row_selector = row_selector.to_string();
        let cell_selector = cell_selector.to_string();
        FinderSet {
            rows: Box::new(move |root| root.children(&row_selector)),
            cells: Box::new(move |row| row.children(&cell_selector)),
            text: Box::new(|cell| cell.text()),
        }
    }

    /// Selector-driven rows where each row node is itself the only cell,
    /// as in flat lists.
    pub fn single_cell_rows(row_selector: &str) -> FinderSet {
        let row_selector = row_selector.to_string();
        FinderSet {
            rows: Box::new(move |root| root.children(&row_selector)),
            cells: Box::new(|row| vec![row.clone()]),
            text: Box::new(|cell| cell.text()),
        }
    }

    pub fn with_rows(mut self, rows: RowsFinder) -> FinderSet {
        self.rows = rows;
        self
    }

    pub fn with_cells(mut self, cells: CellsFinder) -> FinderSet {
        self.cells = cells;
        self
    }

    pub fn with_text(mut self, text: TextFinder) -> FinderSet {
        self.text = text;
        self
    }

    /// A text finder that falls back to the `alt` attribute of the first
    /// `img` descendant when the cell's own text is blank.
    pub fn text_or_image_alt() -> TextFinder {
        Box::new(|cell| {
            let text = cell.text();
            if text.trim().is_empty() {
                if let Some(image) = cell.children("img").into_iter().next() {
                    return image.attribute("alt").unwrap_or_default();
                }
            }
            text
        })
    }
}
