//! Interfaces to the live document being verified.
//!
//! The engine never traverses or renders a document itself; callers supply an
//! implementation of [`Document`] (locate a region) and [`DocumentNode`]
//! (read a located node). A document is allowed to still be settling:
//! lookups may fail transiently and two reads through the same handle may
//! observe different content.

use std::rc::Rc;
use thiserror::Error;

/// A handle to a position in a live tree.
pub trait DocumentNode {
    /// The rendered text content of this node.
    fn text(&self) -> String;

    /// The descendants of this node matching `selector`, in document order.
    /// Selector syntax is owned by the implementation; the engine only passes
    /// through the strings it was configured with.
    fn children(&self, selector: &str) -> Vec<NodeRef>;

    /// An attribute value, if present.
    fn attribute(&self, name: &str) -> Option<String>;
}

pub type NodeRef = Rc<dyn DocumentNode>;

/// Resolves locators against the live document.
pub trait Document {
    fn find(&self, locator: &str) -> Result<NodeRef, AccessError>;
}

/// Failures surfaced by a [`Document`] lookup.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    #[error("no element matches locator '{locator}'")]
    NotFound { locator: String },

    /// The document is believed to still be rendering; the lookup may
    /// succeed on a later attempt.
    #[error("document not settled: {message}")]
    Transient { message: String },
}
