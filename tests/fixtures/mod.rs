//! Shared test fixtures for layout and CLI tests.
#![allow(dead_code)] // Each test binary uses a subset

use kalamine::{parse_layout_str, Layout, Registry};
use std::fs;
use std::path::{Path, PathBuf};

/// QWERTY-based ISO layout with a layout-defined dead key on AC10, a
/// chained diaeresis in the dead key layer and AltGr acute/grave dead keys.
pub const LAFAYETTE_SOURCE: &str = include_str!("lafayette.yaml");

/// Smallest valid layout: metadata only, empty layers.
pub const EMPTY_SOURCE: &str = "name: empty\ngeometry: ANSI\n";

/// Path to the kalamine binary
pub fn kalamine_bin() -> String {
    std::env::var("CARGO_BIN_EXE_kalamine").unwrap_or_else(|_| "target/debug/kalamine".to_string())
}

/// Path of a file under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parses the Lafayette fixture with the builtin registry.
pub fn lafayette() -> Layout {
    let registry = Registry::builtin().expect("builtin registry should load");
    parse_layout_str(LAFAYETTE_SOURCE, registry).expect("fixture should parse")
}

/// Writes `content` to `dir/name` and returns the path.
pub fn write_layout(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write layout file");
    path
}

/// Finds the line starting with `prefix`.
pub fn line_starting_with<'a>(lines: &'a [String], prefix: &str) -> &'a str {
    lines
        .iter()
        .find(|line| line.starts_with(prefix))
        .unwrap_or_else(|| panic!("no line starting with {prefix:?}"))
}
