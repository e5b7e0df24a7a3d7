use super::{AppState, Command, Mode, Navigator};
use crate::outline::parse;
use ratatui::crossterm::event::KeyCode;

const LANGUAGES: &str = "# Languages\n- Python [py]\n- Web\n  - HTML [html]\n  - CSS [css]\n";

#[derive(Default)]
struct Recorder {
    keys: Vec<String>,
}

impl Navigator for Recorder {
    fn navigate(&mut self, key: &str) {
        self.keys.push(key.to_string());
    }
}

fn app(text: &str) -> AppState<Recorder> {
    AppState::new(&parse(text), Recorder::default())
}

fn selected_label(app: &AppState<Recorder>) -> String {
    let id = app.selected_node().unwrap();
    app.view.node(id).unwrap().label.clone()
}

#[test]
fn test_activating_leaf_navigates_with_token() {
    let mut app = app(LANGUAGES);
    let web = app.view.find("Web").unwrap();
    let html = app.view.find("HTML").unwrap();

    app.dispatch(Command::Activate(web));
    app.dispatch(Command::Activate(html));

    assert_eq!(app.navigator().keys, vec!["html"]);
    assert_eq!(app.message.as_deref(), Some("skill=html"));
}

#[test]
fn test_activating_leaf_without_token_uses_label() {
    let mut app = app("# Tools\n- Visual Studio Code\n");
    app.activate_selected();

    assert_eq!(app.navigator().keys, vec!["visual studio code"]);
}

#[test]
fn test_activating_branch_toggles_without_navigating() {
    let mut app = app(LANGUAGES);
    let web = app.view.find("Web").unwrap();

    app.dispatch(Command::Activate(web));
    assert_eq!(app.view.node(web).unwrap().expanded(), Some(true));
    app.dispatch(Command::Activate(web));
    assert_eq!(app.view.node(web).unwrap().expanded(), Some(false));
    assert!(app.navigator().keys.is_empty());
}

#[test]
fn test_cursor_movement_is_bounded() {
    let mut app = app(LANGUAGES);

    app.select_prev();
    assert_eq!(selected_label(&app), "Python");
    app.select_next();
    app.select_next();
    assert_eq!(selected_label(&app), "Web");

    app.dispatch(Command::ExpandAll);
    app.select_last();
    assert_eq!(selected_label(&app), "CSS");
    app.select_first();
    assert_eq!(selected_label(&app), "Python");
}

#[test]
fn test_selection_follows_node_across_filters() {
    let mut app = app(LANGUAGES);
    app.dispatch(Command::ExpandAll);
    app.select_last();
    assert_eq!(selected_label(&app), "CSS");

    app.dispatch(Command::SetFilter("css".to_string()));

    assert_eq!(selected_label(&app), "CSS");
    assert_eq!(app.rows().len(), 2);
}

#[test]
fn test_cursor_clamped_when_selection_disappears() {
    let mut app = app(LANGUAGES);
    app.dispatch(Command::ExpandAll);
    app.select_last();

    app.dispatch(Command::CollapseAll);

    assert_eq!(app.cursor, 1);
    assert_eq!(selected_label(&app), "Web");
}

#[test]
fn test_collapse_or_parent() {
    let mut app = app(LANGUAGES);
    app.dispatch(Command::ExpandAll);
    app.select_last();

    app.collapse_or_parent();
    assert_eq!(selected_label(&app), "Web");
    app.collapse_or_parent();
    assert_eq!(app.rows().len(), 2);
    assert_eq!(selected_label(&app), "Web");

    app.expand_selected();
    assert_eq!(app.rows().len(), 4);
}

#[test]
fn test_search_field_filters_incrementally() {
    let mut app = app(LANGUAGES);
    app.start_search();
    assert_eq!(app.mode, Mode::Search);

    app.push_search_char('p');
    app.push_search_char('y');
    assert_eq!(app.rows().len(), 1);
    assert_eq!(app.message.as_deref(), Some("1 match"));

    app.pop_search_char();
    app.pop_search_char();
    assert_eq!(app.rows().len(), 2);
    assert!(app.message.is_none());
}

#[test]
fn test_commit_keeps_filter_and_cancel_clears_it() {
    let mut app = app(LANGUAGES);
    app.start_search();
    app.push_search_char('h');
    app.push_search_char('t');
    app.commit_search();

    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.view.match_count(), 1);

    app.start_search();
    app.cancel_search();
    assert_eq!(app.mode, Mode::Browse);
    assert!(app.search_buffer.is_empty());
    assert_eq!(app.view.match_count(), 0);
}

#[test]
fn test_clear_filter_command() {
    let mut app = app(LANGUAGES);
    app.search_buffer = "css".to_string();
    app.dispatch(Command::SetFilter("css".to_string()));

    app.dispatch(Command::ClearFilter);

    assert!(app.search_buffer.is_empty());
    assert!(app.view.nodes().iter().all(|n| !n.matched && !n.hidden));
    // The branch opened by the match stays open.
    assert_eq!(app.rows().len(), 4);
}

#[test]
fn test_empty_tree_has_no_selection() {
    let mut app = app("");
    app.select_next();
    app.activate_selected();
    app.collapse_or_parent();

    assert!(app.selected_node().is_none());
    assert!(app.navigator().keys.is_empty());
}

#[test]
fn test_match_count_message_plural() {
    let mut app = app(LANGUAGES);
    app.dispatch(Command::SetFilter("t".to_string()));

    assert_eq!(app.message.as_deref(), Some("2 matches"));
}

#[test]
fn test_enter_and_space_activate_the_same_way() {
    for key in [KeyCode::Enter, KeyCode::Char(' ')] {
        let mut app = app(LANGUAGES);
        let web = app.view.find("Web").unwrap();
        let html = app.view.find("HTML").unwrap();

        app.select_next();
        assert_eq!(app.selected_node(), Some(web));
        assert!(!app.handle_key(key));
        assert_eq!(app.view.node(web).unwrap().expanded(), Some(true));

        app.select_next();
        assert_eq!(app.selected_node(), Some(html));
        app.handle_key(key);
        assert_eq!(app.navigator().keys, vec!["html"]);

        app.select_prev();
        app.handle_key(key);
        assert_eq!(app.view.node(web).unwrap().expanded(), Some(false));
    }
}

#[test]
fn test_keys_follow_the_input_mode() {
    let mut app = app(LANGUAGES);

    app.handle_key(KeyCode::Char('/'));
    assert_eq!(app.mode, Mode::Search);
    // In search mode letters are typed, not treated as commands.
    assert!(!app.handle_key(KeyCode::Char('q')));
    assert_eq!(app.search_buffer, "q");
    app.handle_key(KeyCode::Backspace);
    app.handle_key(KeyCode::Char('c'));
    app.handle_key(KeyCode::Char('s'));
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.view.match_count(), 1);

    app.handle_key(KeyCode::Char('x'));
    assert!(app.search_buffer.is_empty());
    app.handle_key(KeyCode::Char('e'));
    assert_eq!(app.rows().len(), 4);
    app.handle_key(KeyCode::Char('c'));
    assert_eq!(app.rows().len(), 2);

    assert!(app.handle_key(KeyCode::Char('q')));
}
