use super::{NodeId, Tier, TreeView};
use crate::outline::parse;
use crate::render::TextRenderer;

const LANGUAGES: &str = "# Languages\n- Python [py]\n- Web\n  - HTML [html]\n  - CSS [css]\n";

fn view(text: &str) -> TreeView {
    TreeView::render(&parse(text))
}

#[test]
fn test_render_mounts_sections() {
    let view = view("# A\n- one\n- two\n# B\n- three\n");

    assert_eq!(view.sections().len(), 2);
    assert_eq!(view.sections()[0].title, "A");
    assert_eq!(view.sections()[0].roots.len(), 2);
    assert_eq!(view.sections()[1].roots.len(), 1);
}

#[test]
fn test_branches_start_collapsed_and_leaves_have_no_state() {
    let view = view(LANGUAGES);
    let web = view.node(view.find("Web").unwrap()).unwrap();
    let python = view.node(view.find("Python").unwrap()).unwrap();

    assert!(web.collapsed);
    assert_eq!(web.expanded(), Some(false));
    assert!(!python.collapsed);
    assert_eq!(python.expanded(), None);
}

#[test]
fn test_filter_keys_fall_back_to_label() {
    let view = view("# X\n- Rust\n- Python [ PY ]\n- Type Script\n");

    let keys: Vec<&str> = view.nodes().iter().map(|n| n.filter_key.as_str()).collect();
    assert_eq!(keys, vec!["rust", "py", "type script"]);
}

#[test]
fn test_collapsed_children_are_not_visible() {
    let view = view(LANGUAGES);
    let rows: Vec<&str> = view
        .visible_rows()
        .into_iter()
        .map(|id| view.node(id).unwrap().label.as_str())
        .collect();

    assert_eq!(rows, vec!["Python", "Web"]);
    assert!(!view.is_visible(view.find("HTML").unwrap()));
}

#[test]
fn test_toggle_expands_and_collapses() {
    let mut view = view(LANGUAGES);
    let web = view.find("Web").unwrap();

    assert!(view.toggle(web));
    assert_eq!(view.visible_rows().len(), 4);
    assert!(view.toggle(web));
    assert_eq!(view.visible_rows().len(), 2);
}

#[test]
fn test_toggle_leaf_is_noop() {
    let mut view = view(LANGUAGES);
    let python = view.find("Python").unwrap();

    assert!(!view.toggle(python));
    assert!(!view.node(python).unwrap().collapsed);
    assert!(!view.toggle(NodeId(99)));
}

#[test]
fn test_depth_and_ancestors() {
    let view = view("# D\n- A\n  - B\n    - C\n");
    let c = view.find("C").unwrap();

    assert_eq!(view.node(c).unwrap().depth, 2);
    let ancestors: Vec<&str> = view
        .ancestors(c)
        .map(|id| view.node(id).unwrap().label.as_str())
        .collect();
    assert_eq!(ancestors, vec!["B", "A"]);
}

#[test]
fn test_tier_badges_only_on_branches() {
    let view = view("# Skills\n- ADVANCED\n  - Rust\n- expert\n- Fluent\n  - English\n");

    let advanced = view.node(view.find("ADVANCED").unwrap()).unwrap();
    assert_eq!(advanced.tier, Some(Tier::Advanced));
    // A leaf named after a tier is still a plain leaf.
    let expert = view.node(view.find("expert").unwrap()).unwrap();
    assert_eq!(expert.tier, None);
    let fluent = view.node(view.find("Fluent").unwrap()).unwrap();
    assert_eq!(fluent.tier, None);
}

#[test]
fn test_tier_from_label() {
    assert_eq!(Tier::from_label(" beginner "), Some(Tier::Beginner));
    assert_eq!(Tier::from_label("Intermediate"), Some(Tier::Intermediate));
    assert_eq!(Tier::from_label("Advanced stuff"), None);
    assert!(Tier::Beginner < Tier::Expert);
}

#[test]
fn test_text_renderer_outline() {
    let mut view = view("# Skills\n- Advanced\n  - Rust [rs]\n- Web\n  - HTML\n");
    view.toggle(view.find("Advanced").unwrap());

    let mut renderer = TextRenderer::new();
    view.walk(&mut renderer);

    assert_eq!(
        renderer.finish(),
        "# Skills\n  ▾ [Advanced]\n    • Rust\n  ▸ Web\n"
    );
}

#[test]
fn test_empty_forest_renders_nothing() {
    let view = view("");
    let mut renderer = TextRenderer::new();
    view.walk(&mut renderer);

    assert!(view.is_empty());
    assert_eq!(renderer.finish(), "");
}
