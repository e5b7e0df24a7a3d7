//! The live view built from a parsed forest.
//!
//! Parsed sections are immutable, so all interaction state (collapse, search match, hidden)
//! lives here instead. Nodes are stored in a flat arena in document pre-order, which means a
//! parent always has a smaller id than its descendants. Each section keeps a mount point listing
//! its top-level node ids.

use crate::render::NodeRenderer;
use crate::section::{Node, Section};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Stable handle for a rendered node: its position in the view arena.
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
/// Ordered proficiency tiers that branch labels may name.
pub enum Tier {
    /// First tier.
    Beginner,
    /// Second tier.
    Intermediate,
    /// Third tier.
    Advanced,
    /// Fourth tier.
    Expert,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 4] = [
        Tier::Beginner,
        Tier::Intermediate,
        Tier::Advanced,
        Tier::Expert,
    ];

    #[must_use]
    /// Display name of the tier.
    pub fn name(self) -> &'static str {
        match self {
            Tier::Beginner => "Beginner",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
            Tier::Expert => "Expert",
        }
    }

    #[must_use]
    /// Exact, case-insensitive match of a label against the tier names.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(label))
    }
}

#[derive(Clone, Debug)]
/// One node of the live view together with its interaction flags.
pub struct ViewNode {
    /// Handle of this node.
    pub id: NodeId,
    /// Enclosing node, `None` for a section's top-level items.
    pub parent: Option<NodeId>,
    /// Nested nodes in document order.
    pub children: Vec<NodeId>,
    /// Number of ancestor nodes (0 for top-level items).
    pub depth: usize,
    /// Display text.
    pub label: String,
    /// Normalised key handed to the listing page on activation.
    pub filter_key: String,
    /// Proficiency badge shown instead of the label, branches only.
    pub tier: Option<Tier>,
    /// Children are hidden from view. Always false for leaves.
    pub collapsed: bool,
    /// The label contains the current search query.
    pub matched: bool,
    /// Neither this node nor any descendant matches the current search query.
    pub hidden: bool,
}

impl ViewNode {
    #[must_use]
    /// Leaves are navigable; branches are collapsible.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    /// Expanded indicator for branches; `None` for leaves, which have no collapse state.
    pub fn expanded(&self) -> Option<bool> {
        if self.is_leaf() {
            None
        } else {
            Some(!self.collapsed)
        }
    }
}

#[derive(Clone, Debug)]
/// Mount point for one section: its title and top-level nodes.
pub struct SectionMount {
    /// Heading text.
    pub title: String,
    /// Top-level nodes in document order.
    pub roots: Vec<NodeId>,
}

#[derive(Clone, Debug, Default)]
/// Interactive view over a parsed forest.
pub struct TreeView {
    nodes: Vec<ViewNode>,
    sections: Vec<SectionMount>,
}

impl TreeView {
    #[must_use]
    /// Builds the view for a forest. Every branch starts collapsed.
    pub fn render(forest: &[Section]) -> Self {
        let mut view = Self::default();
        for section in forest {
            let roots = section
                .root
                .children
                .iter()
                .map(|child| view.mount(child, None, 0))
                .collect();
            view.sections.push(SectionMount {
                title: section.title.clone(),
                roots,
            });
        }
        view
    }

    fn mount(&mut self, node: &Node, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        let branch = !node.is_leaf();
        self.nodes.push(ViewNode {
            id,
            parent,
            children: Vec::new(),
            depth,
            label: node.label.clone(),
            filter_key: node.filter_key(),
            tier: if branch {
                Tier::from_label(&node.label)
            } else {
                None
            },
            collapsed: branch,
            matched: false,
            hidden: false,
        });
        let children = node
            .children
            .iter()
            .map(|child| self.mount(child, Some(id), depth + 1))
            .collect();
        self.nodes[id.0].children = children;
        id
    }

    #[must_use]
    /// Section mount points in document order.
    pub fn sections(&self) -> &[SectionMount] {
        &self.sections
    }

    #[must_use]
    /// All nodes in document pre-order.
    pub fn nodes(&self) -> &[ViewNode] {
        &self.nodes
    }

    #[must_use]
    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Option<&ViewNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [ViewNode] {
        &mut self.nodes
    }

    #[must_use]
    /// True when the forest had no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[cfg(test)]
    /// Finds the first node with the given label, searching in document order.
    pub(crate) fn find(&self, label: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.label == label).map(|n| n.id)
    }

    /// Strict ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).and_then(|n| n.parent), |p| {
            self.node(*p).and_then(|n| n.parent)
        })
    }

    /// Flips a branch between collapsed and expanded. Returns false for leaves and unknown ids.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) if !node.is_leaf() => {
                node.collapsed = !node.collapsed;
                true
            }
            _ => false,
        }
    }

    /// Sets the collapse state of a branch. Leaves are left alone.
    pub fn set_collapsed(&mut self, id: NodeId, collapsed: bool) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            if !node.is_leaf() {
                node.collapsed = collapsed;
            }
        }
    }

    #[must_use]
    /// Whether a node is currently shown: not hidden and no ancestor collapsed or hidden.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        !node.hidden
            && self
                .ancestors(id)
                .filter_map(|a| self.node(a))
                .all(|a| !a.collapsed && !a.hidden)
    }

    #[must_use]
    /// Visible nodes of one section in display order.
    pub fn visible_rows_in(&self, section: usize) -> Vec<NodeId> {
        let mut rows = Vec::new();
        if let Some(mount) = self.sections.get(section) {
            for &root in &mount.roots {
                self.collect_visible(root, &mut rows);
            }
        }
        rows
    }

    #[must_use]
    /// Visible nodes of every section in display order.
    pub fn visible_rows(&self) -> Vec<NodeId> {
        (0..self.sections.len())
            .flat_map(|i| self.visible_rows_in(i))
            .collect()
    }

    fn collect_visible(&self, id: NodeId, rows: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.hidden {
            return;
        }
        rows.push(id);
        if !node.collapsed {
            for &child in &node.children {
                self.collect_visible(child, rows);
            }
        }
    }

    /// Feeds every section and visible node to a renderer in display order.
    pub fn walk(&self, renderer: &mut impl NodeRenderer) {
        for (index, section) in self.sections.iter().enumerate() {
            renderer.render_section(section);
            for id in self.visible_rows_in(index) {
                if let Some(node) = self.node(id) {
                    if node.is_leaf() {
                        renderer.render_leaf(node);
                    } else {
                        renderer.render_branch(node);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/view.rs"]
mod tests;
