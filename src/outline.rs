//! Line-based outline parser turning markdown skill lists into a section forest.
//!
//! The parser walks the source one line at a time. Headings open a new section, list items are
//! attached beneath the nearest shallower item according to their indentation, and every other
//! line is ignored. Nothing here fails on malformed input: the source is a hand-authored file,
//! so one bad line should never cost the rest of the tree.

use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::section::{Node, Section};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static MARKDOWN: LazyLock<OutlineParser> = LazyLock::new(|| {
    OutlineParser::new(&MarkdownFormat, IndentPolicy::default())
        .expect("markdown outline patterns are valid")
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// How the parser treats an item indented more than one level past its predecessor.
///
/// ```text
/// - A
///     - B      <- two levels deeper than A
///     - C
/// ```
///
/// Both policies make `B` a child of `A`. They differ on what an equally deep follow-up line
/// attaches to: under `Pad`, `C` is a sibling of `B`; under `Clamp`, `B` is recorded one level
/// below `A` and `C` becomes its child.
pub enum IndentPolicy {
    /// Fill the missing ancestor levels by repeating the current parent.
    #[default]
    Pad,
    /// Treat the item as exactly one level deeper than the current depth.
    Clamp,
}

impl FromStr for IndentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pad" => Ok(Self::Pad),
            "clamp" => Ok(Self::Clamp),
            other => Err(format!("unknown indent policy: {other}")),
        }
    }
}

/// Compiled line patterns plus the indentation rules of one outline format.
pub struct OutlineParser {
    heading: Regex,
    item: Regex,
    token: Regex,
    tab_width: usize,
    policy: IndentPolicy,
}

impl OutlineParser {
    /// Compiles the patterns of `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the format's patterns is not a valid regular expression.
    pub fn new(format: &dyn Format, policy: IndentPolicy) -> Result<Self, regex::Error> {
        Ok(Self {
            heading: Regex::new(format.heading_pattern())?,
            item: Regex::new(format.item_pattern())?,
            token: Regex::new(format.token_pattern())?,
            tab_width: format.tab_width().max(1),
            policy,
        })
    }

    #[must_use]
    /// Returns a copy of this parser using a different indent policy.
    pub fn with_policy(&self, policy: IndentPolicy) -> Self {
        Self {
            heading: self.heading.clone(),
            item: self.item.clone(),
            token: self.token.clone(),
            tab_width: self.tab_width,
            policy,
        }
    }

    #[must_use]
    /// Parses outline text into sections in document order.
    pub fn parse(&self, text: &str) -> Vec<Section> {
        let normalised = text.replace('\t', &" ".repeat(self.tab_width));
        let mut sections: Vec<Section> = Vec::new();
        // Paths of child indices from the current section root; the root itself is `[]`.
        let mut stack: Vec<Vec<usize>> = Vec::new();

        for (line_no, raw) in normalised.lines().enumerate() {
            let line = raw.trim_end();
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = self.heading.captures(line) {
                let title = caps.get(1).map_or("", |m| m.as_str()).trim();
                sections.push(Section::new(title));
                stack = vec![Vec::new()];
                continue;
            }

            let Some(caps) = self.item.captures(line) else {
                tracing::trace!(line = line_no + 1, "ignoring unrecognised line");
                continue;
            };
            let Some(section) = sections.last_mut() else {
                tracing::trace!(line = line_no + 1, "ignoring list item before first heading");
                continue;
            };

            let indent = caps.get(1).map_or(0, |m| m.as_str().chars().count());
            let level = indent / self.tab_width + 1;
            let (label, token) = self.split_token(caps.get(2).map_or("", |m| m.as_str()));

            stack.truncate(level);
            if self.policy == IndentPolicy::Pad {
                while stack.len() < level {
                    let top = stack.last().cloned().unwrap_or_default();
                    stack.push(top);
                }
            }

            let mut path = stack.last().cloned().unwrap_or_default();
            let parent = node_at_mut(&mut section.root, &path);
            parent.children.push(Node::new(label, token));
            path.push(parent.children.len() - 1);
            stack.push(path);
        }

        tracing::debug!(sections = sections.len(), "parsed outline");
        sections
    }

    /// Separates a trailing `[token]` from item text.
    fn split_token(&self, text: &str) -> (String, Option<String>) {
        let text = text.trim();
        let Some(caps) = self.token.captures(text) else {
            return (text.to_string(), None);
        };
        let label = caps.get(1).map_or("", |m| m.as_str()).trim();
        let token = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        if label.is_empty() {
            (text.to_string(), token)
        } else {
            (label.to_string(), token)
        }
    }
}

fn node_at_mut<'a>(root: &'a mut Node, path: &[usize]) -> &'a mut Node {
    path.iter().fold(root, |node, &i| &mut node.children[i])
}

#[must_use]
/// Parses a markdown outline with the default indent policy.
pub fn parse(text: &str) -> Vec<Section> {
    MARKDOWN.parse(text)
}

#[must_use]
/// Parses a markdown outline with an explicit indent policy.
pub fn parse_with_policy(text: &str, policy: IndentPolicy) -> Vec<Section> {
    if policy == IndentPolicy::default() {
        MARKDOWN.parse(text)
    } else {
        MARKDOWN.with_policy(policy).parse(text)
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
