//! Parsing of layout sources and ASCII-art templates.
//!
//! This module reads YAML layout sources, normalizes their combining marks,
//! and turns the drawn templates into layers (and layers back into
//! templates for previews).

pub mod combining;
pub mod layout;
pub mod template;

// Re-export commonly used functions
pub use combining::{lines_to_text, merge_combining, split_combining};
pub use layout::{parse_layout_file, parse_layout_str};
pub use template::{fill_template, parse_template};
