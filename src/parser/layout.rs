//! YAML layout source parsing.
//!
//! A layout source names a geometry and draws two ASCII-art blocks on its
//! template:
//!
//! ```yaml
//! name: lafayette
//! description: French (Lafayette)
//! geometry: ISO
//! base: |
//!   ┌─────┬─────┬ ...
//!   │ A   │ Z   │ ...
//!   │ a æ │ z   │ ...
//! altgr: |
//!   ...
//! ```
//!
//! `base` holds the base pair (left part of each cell) and the dead-key pair
//! (right part); `altgr` holds the AltGr pair. Both blocks are optional.

use super::combining::merge_combining;
use super::template::parse_template;
use crate::constants::DEFAULT_GEOMETRY;
use crate::error::LayoutError;
use crate::models::{LayerPair, Layout, LayoutMetadata};
use crate::registry::Registry;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct LayoutSource {
    #[serde(flatten)]
    metadata: LayoutMetadata,
    #[serde(default = "default_geometry")]
    geometry: String,
    #[serde(default)]
    base: String,
    #[serde(default)]
    altgr: String,
}

fn default_geometry() -> String {
    DEFAULT_GEOMETRY.to_string()
}

/// Parses a layout file.
///
/// The layout name defaults to the file stem when the source has none.
///
/// # Errors
///
/// Returns errors for:
/// - File not found or unreadable
/// - Invalid YAML
/// - Unknown geometry, misaligned templates or unregistered dead keys
pub fn parse_layout_file(path: &Path, registry: Arc<Registry>) -> Result<Layout> {
    if !path.is_file() {
        anyhow::bail!("Layout file not found: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;

    let mut layout = parse_layout_str(&content, registry)
        .with_context(|| format!("Failed to parse layout file: {}", path.display()))?;

    if layout.metadata.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            layout.metadata.name = stem.to_string_lossy().into_owned();
        }
    }

    Ok(layout)
}

/// Parses a layout from YAML source text.
///
/// # Errors
///
/// Returns a [`LayoutError`] if the source is not valid YAML, names an
/// unknown geometry, or does not fit the geometry template.
pub fn parse_layout_str(source: &str, registry: Arc<Registry>) -> Result<Layout, LayoutError> {
    let source: LayoutSource = serde_yaml::from_str(source)?;
    let mut layout = Layout::new(source.metadata, &source.geometry, registry)?;
    let rows = layout.geometry().rows.clone();

    let blocks = [
        (&source.base, [LayerPair::Base, LayerPair::DeadKey].as_slice()),
        (&source.altgr, [LayerPair::AltGr].as_slice()),
    ];
    for (block, pairs) in blocks {
        if block.trim().is_empty() {
            continue;
        }
        let lines: Vec<String> = merge_combining(block).lines().map(String::from).collect();
        for &pair in pairs {
            parse_template(&mut layout, &lines, &rows, pair)?;
        }
    }

    layout.finalize();
    tracing::debug!(
        name = %layout.metadata.name,
        geometry = %layout.geometry().name,
        dead_keys = layout.dead_keys().count(),
        "Parsed layout"
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeyId, Level};

    const ERGO_SOURCE: &str = r#"
name: mini
description: Tiny test layout
geometry: ERGO
base: |
  ╭╌╌╌╌╌┰─────┬─────┬─────┬─────┬─────┰─────┬─────┬─────┬─────┬─────┰╌╌╌╌╌┬╌╌╌╌╌╮
  ┆ ~   ┃ !   │ @   │ #   │ $   │ %   ┃ ^   │ &   │ *   │ (   │ )   ┃ _   ┆ +   ┆
  ┆ `   ┃ 1   │ 2   │ 3   │ 4   │ 5   ┃ 6   │ 7   │ 8   │ 9   │ 0   ┃ -   ┆ =   ┆
  ╰╌╌╌╌╌╂─────┼─────┼─────┼─────┼─────╂─────┼─────┼─────┼─────┼─────╂╌╌╌╌╌┼╌╌╌╌╌┤
        ┃ Q   │ W   │ E   │ R   │ T   ┃ Y   │ U   │ I   │ O   │ P   ┃ {   ┆ }   ┆
        ┃   â │   é │   è │     │     ┃     │     │     │     │     ┃ [   ┆ ]   ┆
        ┠─────┼─────┼─────┼─────┼─────╂─────┼─────┼─────┼─────┼─────╂╌╌╌╌╌┼╌╌╌╌╌┤
        ┃ A   │ S   │ D   │ F   │ G   ┃ H   │ J   │ K   │ L   │ :   ┃ "   ┆ |   ┆
        ┃   æ │   ß │     │     │     ┃     │     │     │     │ ;   ┃ '   ┆ \   ┆
  ╭╌╌╌╌╌╂─────┼─────┼─────┼─────┼─────╂─────┼─────┼─────┼─────┼─────╂╌╌╌╌╌┴╌╌╌╌╌╯
  ┆ >   ┃ Z   │ X   │ C   │ V   │ B   ┃ N   │ M   │ ;   │ :   │ !   ┃
  ┆ <   ┃     │     │     │     │     ┃     │     │ ,  ̈ │ .   │ /   ┃
  ╰╌╌╌╌╌┸─────┴─────┴─────┴─────┴─────┸─────┴─────┴─────┴─────┴─────┚
                  ╭───────┬───────────────────────┬───────╮
                  │  Alt  │                       │ AltGr │
                  ╰───────┴───────────────────────┴───────╯
altgr: |
  ╭╌╌╌╌╌┰─────┬─────┬─────┬─────┬─────┰─────┬─────┬─────┬─────┬─────┰╌╌╌╌╌┬╌╌╌╌╌╮
  ┆     ┃     │     │     │    ́ │     ┃     │     │     │     │     ┃     ┆     ┆
  ┆     ┃     │     │     │   € │     ┃     │     │     │     │     ┃     ┆     ┆
  ╰╌╌╌╌╌╂─────┼─────┼─────┼─────┼─────╂─────┼─────┼─────┼─────┼─────╂╌╌╌╌╌┼╌╌╌╌╌┤
        ┃     │     │     │     │     ┃     │     │     │     │     ┃     ┆     ┆
        ┃     │     │     │     │     ┃     │     │     │     │     ┃     ┆     ┆
        ┠─────┼─────┼─────┼─────┼─────╂─────┼─────┼─────┼─────┼─────╂╌╌╌╌╌┼╌╌╌╌╌┤
        ┃     │     │     │     │     ┃     │     │     │     │     ┃     ┆     ┆
        ┃     │     │     │     │     ┃     │     │     │     │     ┃     ┆     ┆
  ╭╌╌╌╌╌╂─────┼─────┼─────┼─────┼─────╂─────┼─────┼─────┼─────┼─────╂╌╌╌╌╌┴╌╌╌╌╌╯
  ┆     ┃     │     │     │     │     ┃     │     │     │     │     ┃
  ┆     ┃     │     │     │     │     ┃     │     │     │     │     ┃
  ╰╌╌╌╌╌┸─────┴─────┴─────┴─────┴─────┸─────┴─────┴─────┴─────┴─────┚
                  ╭───────┬───────────────────────┬───────╮
                  │  Alt  │                       │ AltGr │
                  ╰───────┴───────────────────────┴───────╯
"#;

    fn registry() -> Arc<Registry> {
        Registry::builtin().unwrap()
    }

    #[test]
    fn test_parse_ergo_source() {
        let layout = parse_layout_str(ERGO_SOURCE, registry()).unwrap();
        assert_eq!(layout.metadata.name, "mini");
        assert_eq!(layout.metadata.description, "Tiny test layout");
        assert_eq!(layout.geometry().name, "ERGO");

        assert_eq!(layout.symbol(KeyId::Ad01, Level::Base), Some('q'));
        assert_eq!(layout.symbol(KeyId::Ad01, Level::Shift), Some('Q'));
        assert_eq!(layout.symbol(KeyId::Ae01, Level::Base), Some('1'));
        assert_eq!(layout.symbol(KeyId::Ae01, Level::Shift), Some('!'));
        assert_eq!(layout.symbol(KeyId::Ad01, Level::DeadKey), Some('â'));
        assert_eq!(layout.symbol(KeyId::Ad01, Level::DeadKeyShift), Some('Â'));
        assert_eq!(layout.symbol(KeyId::Ac02, Level::DeadKeyShift), Some('ẞ'));
        assert_eq!(layout.symbol(KeyId::Ae04, Level::AltGr), Some('€'));
        assert_eq!(layout.symbol(KeyId::Ae04, Level::AltGrShift), Some('\u{0301}'));
    }

    #[test]
    fn test_block_scalar_keeps_drawing() {
        let source: LayoutSource = serde_yaml::from_str(ERGO_SOURCE).unwrap();
        let base = source.base;
        assert!(base.starts_with("╭╌╌╌╌╌┰─────┬"));
        assert!(base.contains("┆ `   ┃ 1   │ 2   │"));
        assert_eq!(base.lines().count(), 16);
    }

    #[test]
    fn test_standalone_marks_are_merged() {
        let layout = parse_layout_str(ERGO_SOURCE, registry()).unwrap();
        assert_eq!(layout.symbol(KeyId::Ab08, Level::Base), Some(','));
        assert_eq!(layout.symbol(KeyId::Ab08, Level::DeadKey), Some('\u{0308}'));

        let names: Vec<&str> = layout.dead_keys().map(|dk| dk.name.as_str()).collect();
        assert_eq!(names, vec!["diaeresis", "acute"]);
    }

    #[test]
    fn test_missing_altgr_leaves_empty_layers() {
        let source = ERGO_SOURCE.split("altgr:").next().unwrap();
        let layout = parse_layout_str(source, registry()).unwrap();
        assert!(layout.layer(Level::AltGr).is_empty());
        assert!(layout.layer(Level::AltGrShift).is_empty());
        assert!(!layout.layer(Level::Base).is_empty());
    }

    #[test]
    fn test_unknown_geometry() {
        let err = parse_layout_str("geometry: JIS\n", registry()).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownGeometry { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_layout_str("geometry: [ISO\n", registry()).unwrap_err();
        assert!(matches!(err, LayoutError::Source(_)));
    }

    #[test]
    fn test_parse_layout_file_defaults_name_to_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini_ergo.yaml");
        let source = ERGO_SOURCE.replace("name: mini\n", "");
        std::fs::write(&path, source).unwrap();

        let layout = parse_layout_file(&path, registry()).unwrap();
        assert_eq!(layout.metadata.name, "mini_ergo");
    }

    #[test]
    fn test_parse_layout_file_missing() {
        let err = parse_layout_file(Path::new("/nonexistent/layout.yaml"), registry())
            .unwrap_err();
        assert!(err.to_string().contains("Layout file not found"));
    }
}
