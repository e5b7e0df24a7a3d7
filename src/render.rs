//! Widget-agnostic rendering of a `TreeView`.
//!
//! A `NodeRenderer` receives sections, leaves and branches in display order and turns them into
//! whatever its target needs. The terminal UI implements it with ratatui lines; `TextRenderer`
//! below produces a plain indented outline for `--print` and for tests.

use crate::view::{SectionMount, ViewNode};

/// Capability interface mapping view nodes to target widgets.
pub trait NodeRenderer {
    /// Called once per section before its nodes.
    fn render_section(&mut self, section: &SectionMount);
    /// Called for each visible leaf.
    fn render_leaf(&mut self, node: &ViewNode);
    /// Called for each visible branch. Its children follow only if it is expanded.
    fn render_branch(&mut self, node: &ViewNode);
}

#[must_use]
/// Text shown for a branch: its tier badge if the label names a tier, else the label.
pub fn branch_text(node: &ViewNode) -> String {
    match node.tier {
        Some(tier) => format!("[{}]", tier.name()),
        None => node.label.clone(),
    }
}

#[must_use]
/// Disclosure marker for a branch.
pub fn disclosure(node: &ViewNode) -> &'static str {
    if node.collapsed {
        "▸"
    } else {
        "▾"
    }
}

#[derive(Default)]
/// Renders a view as an indented plain-text outline.
pub struct TextRenderer {
    lines: Vec<String>,
}

impl TextRenderer {
    #[must_use]
    /// Creates an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Returns the rendered outline, one row per line.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    fn push_row(&mut self, node: &ViewNode, text: &str) {
        let indent = "  ".repeat(node.depth + 1);
        let mark = if node.matched { " *" } else { "" };
        self.lines.push(format!("{indent}{text}{mark}"));
    }
}

impl NodeRenderer for TextRenderer {
    fn render_section(&mut self, section: &SectionMount) {
        self.lines.push(format!("# {}", section.title));
    }

    fn render_leaf(&mut self, node: &ViewNode) {
        self.push_row(node, &format!("• {}", node.label));
    }

    fn render_branch(&mut self, node: &ViewNode) {
        let text = format!("{} {}", disclosure(node), branch_text(node));
        self.push_row(node, &text);
    }
}
