use super::{extract_inline, load_forest, load_source};
use crate::error::LoadError;
use crate::outline::IndentPolicy;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn temp_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn missing_path() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    dir.path().join("does-not-exist.md")
}

#[test]
fn test_first_readable_candidate_wins() {
    let first = temp_with("# First\n- a\n");
    let second = temp_with("# Second\n- b\n");
    let candidates = vec![
        missing_path(),
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ];

    let source = load_source(&candidates, None).unwrap();

    assert!(source.text.starts_with("# First"));
    assert_eq!(source.location, first.path().display().to_string());
}

#[test]
fn test_inline_fallback_used_after_candidates_fail() {
    let page = temp_with(
        "<html><body><script type=\"text/markdown\" id=\"skilltree-md\">\n# Inline\n- x\n</script></body></html>",
    );

    let source = load_source(&[missing_path()], Some(page.path())).unwrap();

    assert!(source.text.contains("# Inline"));
    assert!(source.location.ends_with("#skilltree-md"));
}

#[test]
fn test_missing_everything_reports_last_file() {
    let missing = missing_path();
    let page = temp_with("<html>no outline here</html>");

    let err = load_source(std::slice::from_ref(&missing), Some(page.path())).unwrap_err();

    match err {
        LoadError::SourceUnavailable { location, reason } => {
            assert_eq!(location, missing.display().to_string());
            assert!(!reason.is_empty());
        }
        LoadError::EmptyForest => panic!("expected SourceUnavailable"),
    }
}

#[test]
fn test_no_sources_configured() {
    let err = load_source(&[], None).unwrap_err();

    assert!(err.to_string().contains("no source configured"));
}

#[test]
fn test_empty_file_is_empty_forest_not_unavailable() {
    let empty = temp_with("");

    let source = load_source(&[empty.path().to_path_buf()], None).unwrap();
    assert_eq!(source.text, "");

    let err = load_forest(&[empty.path().to_path_buf()], None, IndentPolicy::Pad).unwrap_err();
    assert!(matches!(err, LoadError::EmptyForest));
    assert_eq!(
        err.to_string(),
        "no headings or lists found in the skill tree source"
    );
}

#[test]
fn test_load_forest_parses_sections() {
    let file = temp_with("# Languages\n- Python [py]\n# Tools\n- Git\n");

    let forest = load_forest(&[file.path().to_path_buf()], None, IndentPolicy::Pad).unwrap();

    assert_eq!(forest.len(), 2);
    assert_eq!(forest[1].title, "Tools");
}

#[test]
fn test_extract_inline_variants() {
    assert_eq!(
        extract_inline("<SCRIPT id='skilltree-md' type='text/markdown'># A</SCRIPT>").as_deref(),
        Some("# A")
    );
    assert_eq!(extract_inline("<script id=\"other\"># A</script>"), None);
}
