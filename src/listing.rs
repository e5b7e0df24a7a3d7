//! The project listing page that skill-tree leaves navigate to.
//!
//! Activating a leaf hands its filter key to the listing as a `skill` query parameter. The
//! listing reads the parameter back (from `?skill=` first, then `#skill=`), and shows the
//! projects of its manifest whose comma-separated skills contain it, optionally narrowed to one
//! difficulty level.

use crate::app_state::Navigator;
use serde::Deserialize;
use std::path::Path;
use std::{fs, io};
use url::Url;

/// Query parameter carrying the skill key.
pub const SKILL_PARAM: &str = "skill";

fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
/// Generated index of every project the listing can show.
pub struct Manifest {
    #[serde(default)]
    /// Whether the manifest was produced by the build step.
    pub generated: bool,
    #[serde(default)]
    /// Number of projects recorded by the build step.
    pub count: usize,
    #[serde(default)]
    /// Projects in display order.
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
/// One project card.
pub struct Project {
    /// Directory name of the project.
    pub id: String,
    /// Card title.
    pub title: String,
    #[serde(default)]
    /// Normalised difficulty: `junior`, `mid` or `advanced`.
    pub level: String,
    #[serde(default)]
    /// Tags as written by the author.
    pub tags: Vec<String>,
    #[serde(default)]
    /// Lowercased tags joined with commas.
    pub skills: String,
    #[serde(default)]
    /// Cover image path or URL.
    pub cover: String,
    #[serde(default)]
    /// Short description.
    pub description: String,
    #[serde(default = "default_order")]
    /// Sort priority, lower first.
    pub order: i64,
    #[serde(default)]
    /// Repository link.
    pub repo: String,
    #[serde(default)]
    /// Live demo link.
    pub demo: String,
    #[serde(default)]
    /// Write-up link.
    pub pdf: String,
}

fn default_order() -> i64 {
    999
}

impl Project {
    /// Normalised skill keys of this project.
    pub fn skill_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.skills.split(',').map(norm).filter(|s| !s.is_empty())
    }
}

impl Manifest {
    /// Reads a manifest JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Active filters of the listing page. Unset filters accept everything.
pub struct ListingFilter {
    /// Difficulty level to show, `None` for all.
    pub level: Option<String>,
    /// Skill key the project must carry, `None` for any.
    pub skill: Option<String>,
}

impl ListingFilter {
    #[must_use]
    /// Filter for a single skill key; an empty key means no skill filter.
    pub fn for_skill(key: &str) -> Self {
        let key = norm(key);
        Self {
            level: None,
            skill: (!key.is_empty()).then_some(key),
        }
    }

    #[must_use]
    /// Reads the skill filter from a listing URL.
    pub fn from_url(url: &Url) -> Self {
        Self::for_skill(&skill_from_url(url).unwrap_or_default())
    }

    #[must_use]
    /// Whether a project passes both filters.
    pub fn matches(&self, project: &Project) -> bool {
        let level_ok = self
            .level
            .as_deref()
            .is_none_or(|level| norm(level) == "all" || norm(level) == norm(&project.level));
        let skill_ok = self
            .skill
            .as_deref()
            .is_none_or(|skill| project.skill_keys().any(|s| s == norm(skill)));
        level_ok && skill_ok
    }

    #[must_use]
    /// Projects passing the filter, in manifest order.
    pub fn apply<'a>(&self, manifest: &'a Manifest) -> Vec<&'a Project> {
        manifest.projects.iter().filter(|p| self.matches(p)).collect()
    }
}

#[must_use]
/// Listing URL for a skill key. The key replaces any existing `skill` parameter and the
/// fragment is dropped; an empty key removes the parameter.
pub fn listing_url(base: &Url, key: &str) -> Url {
    let key = norm(key);
    let mut url = base.clone();
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != SKILL_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.set_query(None);
    url.set_fragment(None);
    if !kept.is_empty() || !key.is_empty() {
        let mut pairs = url.query_pairs_mut();
        pairs.extend_pairs(kept);
        if !key.is_empty() {
            pairs.append_pair(SKILL_PARAM, &key);
        }
    }
    url
}

#[must_use]
/// Reads the skill key from `?skill=`, falling back to a `#skill=` fragment.
pub fn skill_from_url(url: &Url) -> Option<String> {
    let from_query = url
        .query_pairs()
        .find(|(k, v)| k == SKILL_PARAM && !v.trim().is_empty())
        .map(|(_, v)| norm(&v));
    from_query.or_else(|| {
        let (k, v) = url.fragment()?.split_once('=')?;
        (k == SKILL_PARAM && !v.trim().is_empty()).then(|| norm(v))
    })
}

#[derive(Debug, Clone)]
/// Outcome of the most recent activation.
pub struct Navigation {
    /// Normalised skill key.
    pub key: String,
    /// Listing URL the key leads to.
    pub url: Url,
    /// Titles of manifest projects carrying the key.
    pub projects: Vec<String>,
}

/// Navigation target that resolves skill keys against the listing page.
pub struct ListingNavigator {
    base: Url,
    manifest: Option<Manifest>,
    last: Option<Navigation>,
}

impl ListingNavigator {
    /// Creates a navigator for the listing page at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute URL.
    pub fn new(base: &str, manifest: Option<Manifest>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base)?,
            manifest,
            last: None,
        })
    }

    #[must_use]
    /// The most recent navigation, if any leaf has been activated.
    pub fn last(&self) -> Option<&Navigation> {
        self.last.as_ref()
    }
}

impl Navigator for ListingNavigator {
    fn navigate(&mut self, key: &str) {
        let url = listing_url(&self.base, key);
        let projects = self.manifest.as_ref().map_or_else(Vec::new, |manifest| {
            ListingFilter::from_url(&url)
                .apply(manifest)
                .into_iter()
                .map(|p| p.title.clone())
                .collect()
        });
        tracing::info!(key, %url, projects = projects.len(), "navigating to listing");
        self.last = Some(Navigation {
            key: norm(key),
            url,
            projects,
        });
    }
}

#[cfg(test)]
#[path = "tests/listing.rs"]
mod tests;
