//! Markdown outline format.
//!
//! Recognises single-`#` ATX headings and `-` bullet items, with an optional `[token]` suffix
//! on each item.

use crate::formats::Format;

/// Line patterns for `# Heading` / `- item [token]` outlines.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn heading_pattern(&self) -> &'static str {
        r"^#\s+(.+)$"
    }

    fn item_pattern(&self) -> &'static str {
        r"^(\s*)-\s+(.+)$"
    }

    fn token_pattern(&self) -> &'static str {
        r"^(.*?)\s*\[([^\[\]]*)\]\s*$"
    }

    fn tab_width(&self) -> usize {
        2
    }
}
