//! Grid Check: verify a region of a live document against an expected table.
//!
//! This crate provides functionality for:
//! - Extracting a normalized grid of text cells from a live, hierarchical
//!   document via pluggable row/cell/text finders
//! - Rewriting the extracted grid through a configurable pipeline of header
//!   and field transformations before comparison
//! - Embedding partial regular-expression templates (`#{/.../}`) inside
//!   expected cells for nondeterministic content
//! - Retrying the whole locate/extract/compare cycle while the document is
//!   still settling
//!
//! # Quick Start
//!
//! ```ignore
//! use gridcheck::{Differ, Grid};
//!
//! let expected = Grid::from_rows(vec![
//!     vec!["Name", "Size"],
//!     vec!["report.txt", r"#{/\d+ KB/}"],
//! ]);
//!
//! Differ::table()
//!     .templates()
//!     .diff(&session, &expected)?;
//! ```
//!
//! The document itself is supplied by the caller through the [`Document`] and
//! [`DocumentNode`] traits; the crate performs no traversal or rendering of
//! its own.

mod builder;
mod compare;
mod diff;
mod error;
pub mod error_codes;
mod extract;
mod finder;
mod form;
mod grid;
mod hash_row;
mod keys;
mod node;
mod output;
mod sync;
mod template;
mod transform;

pub use builder::{Attributes, RecordBuilder};
pub use compare::{CompareOptions, Comparator, StructuralComparator};
pub use diff::Differ;
pub use error::{DiffError, ErrorKind};
pub use extract::extract;
pub use finder::{CellsFinder, FinderSet, RowsFinder, TextFinder};
pub use form::{fill_form, ControlKind, FormHost};
pub use grid::{Cell, ExpectedTable, Grid, Row};
pub use hash_row::{from_hash_rows, to_hash_rows, HashRow};
pub use keys::{normalize_key, HeaderKey};
pub use node::{AccessError, Document, DocumentNode, NodeRef};
pub use output::MismatchReport;
pub use sync::{SyncConfig, Synchronizer};
pub use template::{ColumnSelector, ColumnWhitelist, TemplateConfig, TemplateFlags, TemplateToken};
pub use transform::{GridTransform, HeaderRule, HeaderTransform};
