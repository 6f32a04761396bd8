//! Kalamine library
//!
//! Parses ASCII-art keyboard layouts and exports them as Linux XKB symbols,
//! Windows KLC sources, macOS keylayouts and web keymaps.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod registry;

pub use error::{LayoutError, RegistryError};
pub use models::{Layout, LayoutMetadata};
pub use parser::{parse_layout_file, parse_layout_str};
pub use registry::Registry;
