//! The UI renders the application state into something visible and navigable.
//!
//! The draw function lays out the search field, the tree with one block per section, a panel
//! showing where the last activated skill leads, and a help bar. Tree rows are produced by a
//! `NodeRenderer` so the terminal shares the traversal used by the plain-text output.

use crate::app_state::{AppState, Mode};
use crate::listing::ListingNavigator;
use crate::render::{branch_text, disclosure, NodeRenderer};
use crate::view::{NodeId, SectionMount, Tier, ViewNode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Beginner => Color::Green,
        Tier::Intermediate => Color::Cyan,
        Tier::Advanced => Color::Yellow,
        Tier::Expert => Color::Magenta,
    }
}

/// Builds styled tree rows and remembers which row holds the selection.
struct LineRenderer {
    selected: Option<NodeId>,
    lines: Vec<Line<'static>>,
    selected_line: Option<usize>,
}

impl LineRenderer {
    fn new(selected: Option<NodeId>) -> Self {
        Self {
            selected,
            lines: Vec::new(),
            selected_line: None,
        }
    }

    fn push_node(&mut self, node: &ViewNode, mut spans: Vec<Span<'static>>) {
        spans.insert(0, Span::raw("  ".repeat(node.depth + 1)));
        let mut line = Line::from(spans);
        if Some(node.id) == self.selected {
            self.selected_line = Some(self.lines.len());
            line = line.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        self.lines.push(line);
    }
}

fn label_style(node: &ViewNode) -> Style {
    if node.matched {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

impl NodeRenderer for LineRenderer {
    fn render_section(&mut self, section: &SectionMount) {
        if !self.lines.is_empty() {
            self.lines.push(Line::raw(""));
        }
        self.lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )));
    }

    fn render_leaf(&mut self, node: &ViewNode) {
        let spans = vec![
            Span::styled("• ", Style::default().fg(Color::DarkGray)),
            Span::styled(node.label.clone(), label_style(node)),
        ];
        self.push_node(node, spans);
    }

    fn render_branch(&mut self, node: &ViewNode) {
        let marker = Span::raw(format!("{} ", disclosure(node)));
        let text = match node.tier {
            Some(tier) => Span::styled(
                format!(" {} ", tier.name()),
                Style::default()
                    .fg(Color::Black)
                    .bg(tier_color(tier))
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(branch_text(node), label_style(node).add_modifier(Modifier::BOLD)),
        };
        self.push_node(node, vec![marker, text]);
    }
}

/// Renders the whole screen for the current application state.
pub fn draw(f: &mut Frame, app: &AppState<ListingNavigator>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Tree + navigation
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    draw_search(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    draw_tree(f, app, body[0]);
    draw_navigation(f, app, body[1]);
    draw_help(f, app, chunks[2]);
}

fn draw_search(f: &mut Frame, app: &AppState<ListingNavigator>, area: Rect) {
    let (text, style) = match app.mode {
        Mode::Search => (
            format!("/{}▏", app.search_buffer),
            Style::default().fg(Color::Yellow),
        ),
        Mode::Browse if app.search_buffer.is_empty() => (
            "press / to search".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Mode::Browse => (format!("/{}", app.search_buffer), Style::default()),
    };
    let widget = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(widget, area);
}

fn draw_tree(f: &mut Frame, app: &AppState<ListingNavigator>, area: Rect) {
    let mut renderer = LineRenderer::new(app.selected_node());
    app.view.walk(&mut renderer);

    let items: Vec<ListItem> = renderer.lines.into_iter().map(ListItem::new).collect();
    let title = format!("Skills ({} sections)", app.view.sections().len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    let mut state = ListState::default();
    state.select(renderer.selected_line);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_navigation(f: &mut Frame, app: &AppState<ListingNavigator>, area: Rect) {
    let lines = match app.navigator().last() {
        Some(nav) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("skill: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(nav.key.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    nav.url.to_string(),
                    Style::default().fg(Color::Cyan),
                )),
                Line::raw(""),
            ];
            if nav.projects.is_empty() {
                lines.push(Line::styled(
                    "no matching projects",
                    Style::default().fg(Color::DarkGray),
                ));
            } else {
                lines.extend(nav.projects.iter().map(|t| Line::raw(format!("• {t}"))));
            }
            lines
        }
        None => vec![Line::styled(
            "activate a skill to see its projects",
            Style::default().fg(Color::DarkGray),
        )],
    };
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Projects"));
    f.render_widget(widget, area);
}

fn draw_help(f: &mut Frame, app: &AppState<ListingNavigator>, area: Rect) {
    let help = if let Some(ref msg) = app.message {
        msg.clone()
    } else if app.mode == Mode::Search {
        "Type to filter | Enter: Keep | Esc: Clear".to_string()
    } else {
        "↑/↓: Navigate | ←/→: Fold | Enter/Space: Open | /: Search | e/c: Expand/Collapse all | x: Clear | q: Quit"
            .to_string()
    };
    let widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
