//! The controller bridging the tree view and user input.
//!
//! A page builds one `AppState` and routes every interaction through it as a `Command`. All
//! mutable state (collapse flags, the search query, the cursor) lives on this object, so the
//! whole interaction model can be driven and inspected without a terminal.

use crate::section::Section;
use crate::view::{NodeId, TreeView, ViewNode};
use ratatui::crossterm::event::KeyCode;

/// Receives the filter key of an activated leaf.
///
/// Navigation is one-way: the tree hands over the key and expects nothing back.
pub trait Navigator {
    /// Navigates to the listing filtered by `key` (already trimmed and lowercased).
    fn navigate(&mut self, key: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Interactions the controller understands.
pub enum Command {
    /// Pointer click or Enter/Space on a node: leaves navigate, branches toggle.
    Activate(NodeId),
    /// Flip a branch between collapsed and expanded.
    ToggleCollapse(NodeId),
    /// Re-run the search overlay with a new query.
    SetFilter(String),
    /// Drop the search query and all match marks.
    ClearFilter,
    /// Expand every branch.
    ExpandAll,
    /// Collapse every branch.
    CollapseAll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How key presses are interpreted.
pub enum Mode {
    /// Moving through the tree and activating nodes.
    Browse,
    /// Typing into the search field.
    Search,
}

/// Session state for one rendered skill tree.
pub struct AppState<N: Navigator> {
    /// Live view with per-node flags.
    pub view: TreeView,
    /// Current input mode.
    pub mode: Mode,
    /// Position of the selection within the visible rows.
    pub cursor: usize,
    /// Text typed into the search field.
    pub search_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    navigator: N,
}

impl<N: Navigator> AppState<N> {
    #[must_use]
    /// Renders the forest and starts browsing at the first row.
    pub fn new(forest: &[Section], navigator: N) -> Self {
        Self {
            view: TreeView::render(forest),
            mode: Mode::Browse,
            cursor: 0,
            search_buffer: String::new(),
            message: None,
            navigator,
        }
    }

    #[must_use]
    /// The navigation collaborator.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    #[must_use]
    /// Visible rows in display order.
    pub fn rows(&self) -> Vec<NodeId> {
        self.view.visible_rows()
    }

    #[must_use]
    /// The node under the cursor, if any row is visible.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.rows().get(self.cursor).copied()
    }

    /// Applies one command, then keeps the selection on the same node when it is still shown.
    pub fn dispatch(&mut self, command: Command) {
        let selected = self.selected_node();
        tracing::debug!(?command, "dispatch");
        match command {
            Command::Activate(id) => self.activate(id),
            Command::ToggleCollapse(id) => {
                self.view.toggle(id);
            }
            Command::SetFilter(query) => {
                self.view.apply_filter(&query);
                self.message = if query.trim().is_empty() {
                    None
                } else {
                    Some(match self.view.match_count() {
                        1 => "1 match".to_string(),
                        n => format!("{n} matches"),
                    })
                };
            }
            Command::ClearFilter => {
                self.search_buffer.clear();
                self.view.apply_filter("");
                self.message = None;
            }
            Command::ExpandAll => self.view.expand_all(),
            Command::CollapseAll => self.view.collapse_all(),
        }
        self.restore_selection(selected);
    }

    fn activate(&mut self, id: NodeId) {
        let Some(node) = self.view.node(id) else {
            return;
        };
        if node.is_leaf() {
            let key = node.filter_key.clone();
            self.navigator.navigate(&key);
            self.message = Some(format!("skill={key}"));
        } else {
            self.view.toggle(id);
        }
    }

    fn restore_selection(&mut self, previous: Option<NodeId>) {
        let rows = self.rows();
        let previous = previous.filter(|id| self.view.is_visible(*id));
        if let Some(pos) = previous.and_then(|id| rows.iter().position(|r| *r == id)) {
            self.cursor = pos;
        } else {
            self.cursor = self.cursor.min(rows.len().saturating_sub(1));
        }
    }

    /// Moves the selection down one row.
    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.rows().len() {
            self.cursor += 1;
        }
    }

    /// Moves the selection up one row.
    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Jumps to the first row.
    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    /// Jumps to the last row.
    pub fn select_last(&mut self) {
        self.cursor = self.rows().len().saturating_sub(1);
    }

    /// Activates the selected node.
    pub fn activate_selected(&mut self) {
        if let Some(id) = self.selected_node() {
            self.dispatch(Command::Activate(id));
        }
    }

    /// Collapses the selected branch, or moves to the parent when there is nothing to collapse.
    pub fn collapse_or_parent(&mut self) {
        let Some(id) = self.selected_node() else {
            return;
        };
        let expanded = self.view.node(id).and_then(ViewNode::expanded);
        if expanded == Some(true) {
            self.dispatch(Command::ToggleCollapse(id));
        } else if let Some(parent) = self.view.node(id).and_then(|n| n.parent) {
            if let Some(pos) = self.rows().iter().position(|r| *r == parent) {
                self.cursor = pos;
            }
        }
    }

    /// Expands the selected branch if it is collapsed.
    pub fn expand_selected(&mut self) {
        let Some(id) = self.selected_node() else {
            return;
        };
        if self.view.node(id).and_then(ViewNode::expanded) == Some(false) {
            self.dispatch(Command::ToggleCollapse(id));
        }
    }

    // --- Search field ---

    /// Focuses the search field.
    pub fn start_search(&mut self) {
        self.mode = Mode::Search;
    }

    /// Appends a character to the query and re-filters.
    pub fn push_search_char(&mut self, c: char) {
        self.search_buffer.push(c);
        self.dispatch(Command::SetFilter(self.search_buffer.clone()));
    }

    /// Removes the last character of the query and re-filters.
    pub fn pop_search_char(&mut self) {
        self.search_buffer.pop();
        self.dispatch(Command::SetFilter(self.search_buffer.clone()));
    }

    /// Leaves the search field, keeping the filter.
    pub fn commit_search(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Leaves the search field and clears the filter.
    pub fn cancel_search(&mut self) {
        self.mode = Mode::Browse;
        self.dispatch(Command::ClearFilter);
    }

    // --- </Search field> ---

    /// Applies a key press for the current mode. Returns true when the key asks to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.mode {
            Mode::Browse => match code {
                KeyCode::Char('q') => return true,
                KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Home => self.select_first(),
                KeyCode::End => self.select_last(),
                KeyCode::Left | KeyCode::Char('h') => self.collapse_or_parent(),
                KeyCode::Right | KeyCode::Char('l') => self.expand_selected(),
                KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
                KeyCode::Char('/') => {
                    self.message = None;
                    self.start_search();
                }
                KeyCode::Char('e') => self.dispatch(Command::ExpandAll),
                KeyCode::Char('c') => self.dispatch(Command::CollapseAll),
                KeyCode::Char('x') | KeyCode::Esc => self.dispatch(Command::ClearFilter),
                _ => {}
            },
            Mode::Search => match code {
                KeyCode::Char(c) => self.push_search_char(c),
                KeyCode::Backspace => self.pop_search_char(),
                KeyCode::Enter => self.commit_search(),
                KeyCode::Esc => self.cancel_search(),
                _ => {}
            },
        }
        false
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
