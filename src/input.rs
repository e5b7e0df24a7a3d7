//! Loading the outline source and turning it into a forest.
//!
//! Candidate files are tried in order. When all of them fail, markdown embedded in an HTML page
//! is used instead, the way a static site can ship the outline inline as
//! `<script type="text/markdown" id="skilltree-md">…</script>`. A path of `-` reads stdin.

use crate::error::{LoadError, Result};
use crate::outline::{parse_with_policy, IndentPolicy};
use crate::section::Section;
use regex::Regex;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Id of the script element holding inline markdown.
pub const INLINE_ID: &str = "skilltree-md";

static INLINE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?is)<script\b[^>]*\bid\s*=\s*["']{INLINE_ID}["'][^>]*>(.*?)</script>"#
    ))
    .expect("inline script pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outline text together with where it came from.
pub struct LoadedSource {
    /// Raw outline text. May be empty.
    pub text: String,
    /// Path or page the text was read from.
    pub location: String,
}

#[must_use]
/// Extracts the inline markdown element from an HTML page, if present.
pub fn extract_inline(html: &str) -> Option<String> {
    INLINE_SCRIPT
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn read_candidate(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

fn read_inline(page: &Path) -> std::result::Result<String, String> {
    let html = fs::read_to_string(page).map_err(|e| e.to_string())?;
    extract_inline(&html).ok_or_else(|| format!("no element with id \"{INLINE_ID}\""))
}

/// Reads the first available source.
///
/// Empty content is a successful load; only unreadable sources are failures.
///
/// # Errors
///
/// Returns `SourceUnavailable` naming the last attempted file (or the inline page when no files
/// were given) if neither a candidate file nor the inline fallback produced text.
pub fn load_source(candidates: &[PathBuf], inline_page: Option<&Path>) -> Result<LoadedSource> {
    let mut last_failure: Option<(String, String)> = None;

    for path in candidates {
        let location = path.display().to_string();
        match read_candidate(path) {
            Ok(text) => {
                tracing::info!(%location, bytes = text.len(), "loaded skill tree source");
                return Ok(LoadedSource { text, location });
            }
            Err(e) => {
                tracing::warn!(%location, error = %e, "skill tree source unavailable");
                last_failure = Some((location, e.to_string()));
            }
        }
    }

    if let Some(page) = inline_page {
        let location = format!("{}#{INLINE_ID}", page.display());
        match read_inline(page) {
            Ok(text) => {
                tracing::warn!(%location, "using inline markdown fallback");
                return Ok(LoadedSource { text, location });
            }
            Err(reason) => {
                tracing::warn!(%location, error = %reason, "inline fallback unavailable");
                if last_failure.is_none() {
                    last_failure = Some((location, reason));
                }
            }
        }
    }

    let (location, reason) =
        last_failure.unwrap_or_else(|| ("<none>".to_string(), "no source configured".to_string()));
    Err(LoadError::SourceUnavailable { location, reason })
}

/// Loads and parses a source into a non-empty forest.
///
/// # Errors
///
/// Returns `SourceUnavailable` when nothing could be read and `EmptyForest` when the text
/// contained no headings.
pub fn load_forest(
    candidates: &[PathBuf],
    inline_page: Option<&Path>,
    policy: IndentPolicy,
) -> Result<Vec<Section>> {
    let source = load_source(candidates, inline_page)?;
    let forest = parse_with_policy(&source.text, policy);
    if forest.is_empty() {
        return Err(LoadError::EmptyForest);
    }
    Ok(forest)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
