//! Search overlay for the tree view.
//!
//! Filtering recomputes the `matched` and `hidden` flags of every node from scratch, so running
//! the same query twice gives the same result. Collapse state is only touched to open the
//! ancestors of matches.

use crate::view::{NodeId, TreeView};

impl TreeView {
    /// Marks nodes whose label contains `query`, hides nodes with no match at or below them,
    /// and expands every ancestor of a match. An empty query clears all marks and leaves
    /// collapse state as it was.
    pub fn apply_filter(&mut self, query: &str) {
        let query = query.trim().to_lowercase();
        self.clear_filter();
        if query.is_empty() {
            return;
        }

        let nodes = self.nodes_mut();
        let mut has_match = vec![false; nodes.len()];
        for node in nodes.iter_mut() {
            node.matched = node.label.to_lowercase().contains(&query);
        }
        // Children always follow their parent in the arena, so a reverse sweep sees every
        // descendant before its ancestor.
        for i in (0..nodes.len()).rev() {
            let found = nodes[i].matched || nodes[i].children.iter().any(|c| has_match[c.0]);
            has_match[i] = found;
            nodes[i].hidden = !found;
        }

        let matches: Vec<NodeId> = self
            .nodes()
            .iter()
            .filter(|n| n.matched)
            .map(|n| n.id)
            .collect();
        for id in &matches {
            let ancestors: Vec<NodeId> = self.ancestors(*id).collect();
            for ancestor in ancestors {
                self.set_collapsed(ancestor, false);
            }
        }
        tracing::debug!(query = %query, matches = matches.len(), "applied filter");
    }

    /// Clears every `matched` and `hidden` flag.
    pub fn clear_filter(&mut self) {
        for node in self.nodes_mut() {
            node.matched = false;
            node.hidden = false;
        }
    }

    /// Expands every branch.
    pub fn expand_all(&mut self) {
        for node in self.nodes_mut() {
            if !node.is_leaf() {
                node.collapsed = false;
            }
        }
    }

    /// Collapses every node that has children.
    pub fn collapse_all(&mut self) {
        for node in self.nodes_mut() {
            if !node.is_leaf() {
                node.collapsed = true;
            }
        }
    }

    #[must_use]
    /// Number of nodes currently marked as matching.
    pub fn match_count(&self) -> usize {
        self.nodes().iter().filter(|n| n.matched).count()
    }
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
