//! skilltree: collapsible, searchable skill trees from markdown outlines.
//!
//! A skill outline is a markdown file of `#` headings and nested `-` lists, where an item may
//! end in a `[token]` naming the tag a project listing should filter by. The crate parses such
//! outlines into a forest of sections, builds an interactive view over it, and routes every
//! interaction through a controller whose state can be driven without a terminal.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod listing;
pub mod outline;
pub mod render;
pub mod search;
pub mod section;
pub mod ui;
pub mod view;
