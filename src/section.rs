//! Section and node representation for parsed skill outlines.
//!
//! A section corresponds to one top-level `#` heading. Its synthetic root holds the heading's
//! top-level list items, and every list item becomes a node whose children are the items
//! indented beneath it. Whether a node is a leaf or a branch is never stored: it follows from
//! the presence of children.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One top-level heading together with the outline beneath it.
pub struct Section {
    /// Heading text without the `#` marker.
    pub title: String,
    /// Synthetic container whose children are the heading's top-level items. Never rendered.
    pub root: Node,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One outline entry: a navigable leaf or a collapsible branch.
pub struct Node {
    /// Display text with any trailing bracketed tag stripped.
    pub label: String,
    /// Content of the trailing bracketed tag, if the line carried one.
    pub token: Option<String>,
    /// Items nested beneath this one, in document order.
    pub children: Vec<Node>,
}

impl Section {
    #[must_use]
    /// Starts an empty section for a heading.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            root: Node::new("__root__", None),
        }
    }
}

impl Node {
    #[must_use]
    /// Creates a childless node.
    pub fn new(label: impl Into<String>, token: Option<String>) -> Self {
        Self {
            label: label.into(),
            token,
            children: Vec::new(),
        }
    }

    #[must_use]
    /// A node is a leaf exactly when it has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    /// Key handed to the listing page: the token, or the label when there is none,
    /// trimmed and lowercased.
    pub fn filter_key(&self) -> String {
        self.token
            .as_deref()
            .unwrap_or(&self.label)
            .trim()
            .to_lowercase()
    }

    /// Visits this node and all of its descendants in document order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
