//! Error types of the layout compiler core.
//!
//! Every failure here is a data error. Nothing is retried or skipped.

use crate::models::KeyId;

/// Errors raised while loading the embedded (or user-supplied) registries.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A registry table is not valid YAML
    #[error("Failed to parse {file}: {source}")]
    Yaml {
        /// Table file name
        file: &'static str,
        /// Parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// A dead key field holds more or less than one character
    #[error("Dead key '{name}': {field} must be a single character, got {value:?}")]
    NotAChar {
        /// Dead key name
        name: String,
        /// Offending field
        field: &'static str,
        /// Field value
        value: String,
    },

    /// Composition table columns of different lengths
    #[error("Dead key '{name}': base and alt tables differ in length ({base} vs {alt})")]
    MisalignedTable {
        /// Dead key name
        name: String,
        /// Base column length
        base: usize,
        /// Alt column length
        alt: usize,
    },

    /// Two dead keys share a marker
    #[error("Duplicate dead key marker U+{code:04X}")]
    DuplicateMarker {
        /// Marker code point
        code: u32,
    },

    /// A key has no entry in a key code table
    #[error("No {table} key code for key {key}")]
    MissingKeyCode {
        /// Table name
        table: &'static str,
        /// Key without a code
        key: KeyId,
    },
}

/// Errors raised while building or exporting a layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Layout source is not valid YAML
    #[error("Invalid layout source: {0}")]
    Source(#[from] serde_yaml::Error),

    /// Geometry name not in the registry
    #[error("Unknown geometry '{name}' (available: {available})")]
    UnknownGeometry {
        /// Requested name
        name: String,
        /// Registered names, comma-separated
        available: String,
    },

    /// A key cell lies outside the drawn template
    #[error(
        "Key {key} is outside the template: line {line}, column {column} \
         (does the layout match the '{geometry}' geometry?)"
    )]
    OutOfBounds {
        /// Key being read
        key: KeyId,
        /// Template line index
        line: usize,
        /// Column index, in chars
        column: usize,
        /// Geometry of the layout
        geometry: String,
    },

    /// Combining mark with no registered dead key
    #[error("Unregistered dead key {} on key {key}", codepoint(.marker))]
    UnregisteredDeadKey {
        /// The combining mark
        marker: char,
        /// Key carrying it
        key: KeyId,
    },

    /// macOS keymap index other than 0, 1, 2, 4 and 5
    #[error("Unsupported macOS keymap level {0} (expected 0, 1, 2, 4 or 5)")]
    InvalidOsxLevel(usize),

    /// Driver template pattern failed to compile
    #[error("Invalid template marker: {0}")]
    Template(#[from] regex::Error),

    /// Registry loading failed
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn codepoint(c: &char) -> String {
    format!("U+{:04X}", u32::from(*c))
}
