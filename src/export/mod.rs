//! Driver exporters.
//!
//! Each target has its own module adding views to [`Layout`](crate::models::Layout):
//!
//! - [`xkb`]: Linux XKB symbols
//! - [`klc`]: Windows KLC layout and dead key tables
//! - [`osx`]: macOS keylayout key maps, actions and terminators
//! - [`json`]: web keymap
//!
//! [`driver`] assembles complete driver files from these views and the
//! embedded templates.

pub mod driver;
pub mod json;
pub mod klc;
pub mod osx;
pub mod symbols;
pub mod xkb;

pub use driver::{encode_utf16le_crlf, substitute_lines, substitute_token, Driver, RenderOptions};
pub use json::JsonLayout;
pub use symbols::{hex_ord, xml_proof, Resolved, ResolverChain, SymbolResolver};

/// Appends a section header, preceded by a blank line unless it is the
/// first line of `output`.
pub(crate) fn push_section(output: &mut Vec<String>, header: String) {
    if !output.is_empty() {
        output.push(String::new());
    }
    output.push(header);
}
