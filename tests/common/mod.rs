//! In-memory document tree used by the integration tests.
//!
//! Selector support is the small subset the finder presets need: comma
//! alternatives of whitespace-separated descendant tag paths, e.g. `th,td`
//! or `thead tr`.

#![allow(dead_code)]

use gridcheck::{AccessError, Document, DocumentNode, NodeRef};
use std::cell::{Cell as StdCell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

pub struct FakeNode {
    tag: String,
    text: String,
    attrs: Vec<(String, String)>,
    children: Vec<Rc<FakeNode>>,
}

impl FakeNode {
    pub fn elem(tag: &str) -> FakeNode {
        FakeNode {
            tag: tag.to_string(),
            text: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(mut self, text: &str) -> FakeNode {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> FakeNode {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, child: FakeNode) -> FakeNode {
        self.children.push(Rc::new(child));
        self
    }

    pub fn into_ref(self) -> Rc<FakeNode> {
        Rc::new(self)
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        if !self.text.is_empty() {
            out.push(self.text.clone());
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// `path` is a descendant chain; the candidate's tag stack (root-exclusive,
/// candidate-inclusive) must end with the path's last tag and contain the
/// earlier tags in order above it.
fn path_matches(path: &[String], stack: &[String]) -> bool {
    let (Some((target, ancestors_wanted)), Some((tag, ancestors))) =
        (path.split_last(), stack.split_last())
    else {
        return false;
    };
    if tag != target {
        return false;
    }
    let mut remaining = ancestors.iter();
    ancestors_wanted
        .iter()
        .all(|wanted| remaining.any(|tag| tag == wanted))
}

fn visit(
    node: &FakeNode,
    stack: &mut Vec<String>,
    alternatives: &[Vec<String>],
    out: &mut Vec<NodeRef>,
) {
    for child in &node.children {
        stack.push(child.tag.clone());
        if alternatives.iter().any(|path| path_matches(path, stack)) {
            out.push(child.clone() as NodeRef);
        }
        visit(child, stack, alternatives, out);
        stack.pop();
    }
}

impl DocumentNode for FakeNode {
    fn text(&self) -> String {
        if !self.text.is_empty() {
            return self.text.clone();
        }
        let mut parts = Vec::new();
        for child in &self.children {
            child.collect_text(&mut parts);
        }
        parts.join(" ")
    }

    fn children(&self, selector: &str) -> Vec<NodeRef> {
        let alternatives: Vec<Vec<String>> = selector
            .split(',')
            .map(|alt| alt.split_whitespace().map(str::to_string).collect())
            .collect();
        let mut out = Vec::new();
        visit(self, &mut Vec::new(), &alternatives, &mut out);
        out
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.clone())
    }
}

enum FindOutcome {
    Fail(AccessError),
    Root(Rc<FakeNode>),
}

/// A document whose first N lookups can be scripted, after which mounted
/// roots are served. Lookups are counted so tests can assert how many
/// attempts a synchronizer made.
#[derive(Default)]
pub struct FakeDocument {
    roots: HashMap<String, Rc<FakeNode>>,
    script: RefCell<VecDeque<FindOutcome>>,
    finds: StdCell<usize>,
}

impl FakeDocument {
    pub fn new() -> FakeDocument {
        FakeDocument::default()
    }

    pub fn mount(mut self, locator: &str, node: Rc<FakeNode>) -> FakeDocument {
        self.roots.insert(locator.to_string(), node);
        self
    }

    /// Serve `times` transient failures before the steady state.
    pub fn enqueue_transient(&self, message: &str, times: usize) {
        let mut script = self.script.borrow_mut();
        for _ in 0..times {
            script.push_back(FindOutcome::Fail(AccessError::Transient {
                message: message.to_string(),
            }));
        }
    }

    /// Serve `times` not-found failures before the steady state.
    pub fn enqueue_not_found(&self, locator: &str, times: usize) {
        let mut script = self.script.borrow_mut();
        for _ in 0..times {
            script.push_back(FindOutcome::Fail(AccessError::NotFound {
                locator: locator.to_string(),
            }));
        }
    }

    /// Serve this root once before the steady state, regardless of locator.
    pub fn enqueue_root(&self, node: Rc<FakeNode>) {
        self.script.borrow_mut().push_back(FindOutcome::Root(node));
    }

    pub fn find_count(&self) -> usize {
        self.finds.get()
    }
}

impl Document for FakeDocument {
    fn find(&self, locator: &str) -> Result<NodeRef, AccessError> {
        self.finds.set(self.finds.get() + 1);
        if let Some(outcome) = self.script.borrow_mut().pop_front() {
            return match outcome {
                FindOutcome::Fail(err) => Err(err),
                FindOutcome::Root(node) => Ok(node as NodeRef),
            };
        }
        self.roots
            .get(locator)
            .cloned()
            .map(|node| node as NodeRef)
            .ok_or_else(|| AccessError::NotFound {
                locator: locator.to_string(),
            })
    }
}

/// A `table` node with a `thead` header row and one `tbody` row per entry.
pub fn table_node(header: &[&str], body: &[&[&str]]) -> Rc<FakeNode> {
    let mut header_row = FakeNode::elem("tr");
    for text in header {
        header_row = header_row.child(FakeNode::elem("th").text(text));
    }
    let mut tbody = FakeNode::elem("tbody");
    for row in body {
        let mut tr = FakeNode::elem("tr");
        for text in *row {
            tr = tr.child(FakeNode::elem("td").text(text));
        }
        tbody = tbody.child(tr);
    }
    FakeNode::elem("table")
        .child(FakeNode::elem("thead").child(header_row))
        .child(tbody)
        .into_ref()
}

/// A `ul` node with one `li` per entry.
pub fn list_node(items: &[&str]) -> Rc<FakeNode> {
    let mut list = FakeNode::elem("ul");
    for text in items {
        list = list.child(FakeNode::elem("li").text(text));
    }
    list.into_ref()
}
