//! The differ: configuration surface and orchestration of one comparison.
//!
//! A [`Differ`] binds a locator, a [`FinderSet`], and the transformation
//! pipeline, then drives the full synchronized cycle: locate the root,
//! extract a raw grid, normalize, assemble the header, run the
//! transformations, expand templates on the expected side, and hand both
//! grids to the comparator. Shape presets cover the common document forms;
//! every default can be overridden.

use crate::compare::{self, CompareOptions, Comparator, StructuralComparator};
use crate::error::{DiffError, ErrorKind};
use crate::extract::extract;
use crate::finder::{CellsFinder, FinderSet, RowsFinder, TextFinder};
use crate::grid::{Cell, ExpectedTable, Grid, Row};
use crate::hash_row::{from_hash_rows, to_hash_rows, HashRow};
use crate::keys::HeaderKey;
use crate::node::{AccessError, Document, NodeRef};
use crate::sync::{SyncConfig, Synchronizer};
use crate::template::{ColumnSelector, TemplateConfig};
use crate::transform::{
    apply_pipeline, assemble_header, GridTransform, HeaderRule, HeaderTransform,
};

pub struct Differ {
    locator: String,
    finders: FinderSet,
    header_rule: HeaderRule,
    header_transforms: Vec<HeaderTransform>,
    transforms: Vec<GridTransform>,
    templates: TemplateConfig,
    allow_not_found: bool,
    transient: Vec<ErrorKind>,
    sync: SyncConfig,
    options: CompareOptions,
    comparator: Box<dyn Comparator>,
}

impl Differ {
    pub fn new(locator: impl Into<String>, finders: FinderSet) -> Differ {
        Differ {
            locator: locator.into(),
            finders,
            header_rule: HeaderRule::Keep,
            header_transforms: Vec::new(),
            transforms: Vec::new(),
            templates: TemplateConfig::default(),
            allow_not_found: false,
            transient: Synchronizer::default_transient().to_vec(),
            sync: SyncConfig::default(),
            options: CompareOptions::default(),
            comparator: Box::new(StructuralComparator),
        }
    }

    /// Tables: header rows out of `thead`, body rows out of `tbody`, falling
    /// back to bare `tr` children for tables without either.
    pub fn table() -> Differ {
        let finders = FinderSet::new(
            Box::new(|root: &NodeRef| {
                let mut rows = root.children("thead tr");
                rows.extend(root.children("tbody tr"));
                if rows.is_empty() {
                    root.children("tr")
                } else {
                    rows
                }
            }),
            Box::new(|row: &NodeRef| row.children("th,td")),
            FinderSet::text_or_image_alt(),
        );
        Differ::new("table", finders)
    }

    /// Unordered lists: each `li` is a one-cell row.
    pub fn unordered_list() -> Differ {
        let finders = FinderSet::single_cell_rows("li").with_text(FinderSet::text_or_image_alt());
        Differ::new("ul", finders)
    }

    /// Definition lists: `dfn` groups as rows, their `dt`/`dd` children as
    /// cells in document order.
    pub fn definition_list() -> Differ {
        let finders =
            FinderSet::from_selectors("dfn", "dt,dd").with_text(FinderSet::text_or_image_alt());
        Differ::new("dl", finders)
    }

    // ── Configuration ───────────────────────────────────────────────────

    pub fn locator(mut self, locator: impl Into<String>) -> Differ {
        self.locator = locator.into();
        self
    }

    pub fn rows(mut self, finder: RowsFinder) -> Differ {
        self.finders.rows = finder;
        self
    }

    pub fn cells(mut self, finder: CellsFinder) -> Differ {
        self.finders.cells = finder;
        self
    }

    pub fn text(mut self, finder: TextFinder) -> Differ {
        self.finders.text = finder;
        self
    }

    /// Replace the entire header with a freshly computed row; the extracted
    /// first row stays in the body.
    pub fn replace_header(mut self, supplier: impl Fn() -> Vec<String> + 'static) -> Differ {
        self.header_rule = HeaderRule::Replace(Box::new(supplier));
        self
    }

    /// Rewrite the whole header row.
    pub fn map_header(mut self, f: impl Fn(Row) -> Row + 'static) -> Differ {
        self.header_transforms.push(Box::new(f));
        self
    }

    /// Rewrite one header cell addressed by name or position. An unknown
    /// name or out-of-range index leaves the row untouched.
    pub fn header_cell(
        mut self,
        key: impl Into<HeaderKey>,
        f: impl Fn(&Cell) -> String + 'static,
    ) -> Differ {
        let key = key.into();
        self.header_transforms.push(Box::new(move |mut row: Row| {
            if let Some(index) = key.resolve(&row) {
                row[index] = Cell::synthesized(f(&row[index]));
            }
            row
        }));
        self
    }

    /// Register a whole-grid transformation; the grid is renormalized after
    /// it runs.
    pub fn transformation(mut self, f: impl Fn(Grid) -> Grid + 'static) -> Differ {
        self.transforms.push(Box::new(f));
        self
    }

    /// Register a transformation over header-keyed row views. The function
    /// is called once with every body row so it can inspect and mutate
    /// across rows.
    pub fn hash_transformation(self, f: impl Fn(&mut Vec<HashRow>) + 'static) -> Differ {
        self.transformation(move |grid| {
            let (header, mut rows) = to_hash_rows(&grid);
            f(&mut rows);
            from_hash_rows(header, rows)
        })
    }

    /// Map a single named field through a value function. A missing key
    /// reads as an empty cell and the result is appended to the row.
    pub fn field(self, key: impl Into<String>, f: impl Fn(&Cell) -> String + 'static) -> Differ {
        let key = key.into();
        self.hash_transformation(move |rows| {
            for row in rows.iter_mut() {
                let current = row.get(&key).cloned().unwrap_or_else(Cell::empty);
                row.set(&key, Cell::synthesized(f(&current)));
            }
        })
    }

    /// Replace the named fields with the `alt` text of the first `img`
    /// descendant of each cell's source node, where one exists.
    pub fn image<I, S>(mut self, keys: I) -> Differ
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            self = self.field(key, image_alt);
        }
        self
    }

    /// Enable template expansion in every column.
    pub fn templates(mut self) -> Differ {
        self.templates = TemplateConfig::all_columns();
        self
    }

    /// Enable template expansion in the given columns only (names resolved
    /// against the actual header, indices 1-based).
    pub fn templates_in<I, S>(mut self, columns: I) -> Differ
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnSelector>,
    {
        self.templates = TemplateConfig::columns(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Treat a missing root as an empty region instead of an error.
    pub fn allow_not_found(mut self) -> Differ {
        self.allow_not_found = true;
        self
    }

    /// Replace the set of error kinds the synchronizer may retry past.
    /// Template errors are never retried regardless of this set.
    pub fn transient_kinds(mut self, kinds: impl IntoIterator<Item = ErrorKind>) -> Differ {
        self.transient = kinds.into_iter().collect();
        self
    }

    /// Also retry while the root locator finds nothing.
    pub fn retry_not_found(mut self) -> Differ {
        if !self.transient.contains(&ErrorKind::LocatorNotFound) {
            self.transient.push(ErrorKind::LocatorNotFound);
        }
        self
    }

    pub fn sync_config(mut self, config: SyncConfig) -> Differ {
        self.sync = config;
        self
    }

    pub fn compare_options(mut self, options: CompareOptions) -> Differ {
        self.options = options;
        self
    }

    pub fn comparator(mut self, comparator: impl Comparator + 'static) -> Differ {
        self.comparator = Box::new(comparator);
        self
    }

    // ── Execution ───────────────────────────────────────────────────────

    /// One locate/extract/transform pass against the current document state.
    pub fn to_grid(&self, document: &dyn Document) -> Result<Grid, DiffError> {
        let root = match document.find(&self.locator) {
            Ok(node) => Some(node),
            Err(AccessError::NotFound { .. }) if self.allow_not_found => None,
            Err(err) => return Err(err.into()),
        };
        let raw = match root {
            Some(root) => extract(&root, &self.finders),
            None => Grid::new(),
        };
        let grid = raw.normalize();
        let grid = assemble_header(grid, &self.header_rule, &self.header_transforms);
        Ok(apply_pipeline(grid, &self.transforms))
    }

    /// Compare the live region against `expected`, retrying the whole cycle
    /// while failures stay within the transient set and the deadline has not
    /// passed. Every attempt re-reads the document from scratch.
    pub fn diff(
        &self,
        document: &dyn Document,
        expected: &dyn ExpectedTable,
    ) -> Result<(), DiffError> {
        let expected = expected.as_grid().normalize();
        let synchronizer = Synchronizer::new(self.sync, self.transient.iter().copied());
        synchronizer.run(|| {
            let actual = self.to_grid(document)?;
            compare::run(
                &expected,
                &actual,
                &self.templates,
                self.comparator.as_ref(),
                &self.options,
            )
        })
    }
}

fn image_alt(cell: &Cell) -> String {
    let image = cell
        .source
        .as_ref()
        .and_then(|node| node.children("img").into_iter().next());
    match image {
        Some(image) => image.attribute("alt").unwrap_or_default(),
        None => cell.text.clone(),
    }
}
