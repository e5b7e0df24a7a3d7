//! Configuration to acknowledge site preferences as well as set defaults.
//!
//! Specifically, we try to find a skilltree.toml, and if present we load settings from there.
//! This provides the outline source locations, the indent policy and the listing page.

use crate::outline::IndentPolicy;
use facet::Facet;
use std::fs;
use std::path::PathBuf;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "skilltree.toml";

#[derive(Facet, Clone, Debug)]
/// Preferences loaded from skilltree.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec!["data/skilltree.md".to_string()])]
    /// Outline files to try, in order.
    pub sources: Vec<String>,
    #[facet(default = String::new())]
    /// HTML page holding inline markdown to fall back on. Empty for none.
    pub inline_page: String,
    #[facet(default = "pad".to_string())]
    /// `pad` or `clamp`; see `IndentPolicy`.
    pub indent_policy: String,
    #[facet(default = "http://localhost:8000/pages/projects.html".to_string())]
    /// Absolute URL of the project listing page.
    pub listing_url: String,
    #[facet(default = String::new())]
    /// Project manifest JSON used to preview listing results. Empty for none.
    pub manifest: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec!["data/skilltree.md".to_string()],
            inline_page: String::new(),
            indent_policy: "pad".to_string(),
            listing_url: "http://localhost:8000/pages/projects.html".to_string(),
            manifest: String::new(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from skilltree.toml if present.
    pub fn load() -> Self {
        fs::read_to_string(CONFIG_FILE)
            .map_or_else(|_| Self::default(), |contents| Self::from_toml(&contents))
    }

    #[must_use]
    /// Parses configuration text, falling back to defaults when it is invalid.
    pub fn from_toml(contents: &str) -> Self {
        facet_toml::from_str::<Self>(contents).unwrap_or_else(|_| {
            tracing::warn!("ignoring invalid {CONFIG_FILE}");
            Self::default()
        })
    }

    #[must_use]
    /// Source files as paths.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources.iter().map(PathBuf::from).collect()
    }

    #[must_use]
    /// Inline fallback page, if configured.
    pub fn inline_path(&self) -> Option<PathBuf> {
        non_empty(&self.inline_page).map(PathBuf::from)
    }

    #[must_use]
    /// Manifest path, if configured.
    pub fn manifest_path(&self) -> Option<PathBuf> {
        non_empty(&self.manifest).map(PathBuf::from)
    }

    #[must_use]
    /// Parsed indent policy; unknown values fall back to the default.
    pub fn indent_policy(&self) -> IndentPolicy {
        self.indent_policy.parse().unwrap_or_else(|e: String| {
            tracing::warn!(error = %e, "using default indent policy");
            IndentPolicy::default()
        })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
