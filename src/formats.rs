//! Format trait and implementations for outline sources.
//!
//! This module defines the `Format` trait which abstracts over the line shapes an outline parser
//! recognises: section headings, list items, and the trailing tag that marks an item's filter
//! token. Each format supplies the regular expressions for these shapes.

pub mod markdown;

/// Line patterns recognised by the outline parser.
pub trait Format {
    /// Pattern for a section heading. Capture group 1 is the title.
    fn heading_pattern(&self) -> &str;
    /// Pattern for a list item. Capture group 1 is the indentation, group 2 the item text.
    fn item_pattern(&self) -> &str;
    /// Pattern for a trailing tag on item text. Group 1 is the label, group 2 the token.
    fn token_pattern(&self) -> &str;
    /// Number of spaces a tab expands to, which is also the width of one nesting level.
    fn tab_width(&self) -> usize;
}
