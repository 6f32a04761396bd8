//! Physical keyboard geometries (ANSI, ISO, ERGO).

use super::KeyId;
use serde::{Deserialize, Serialize};

/// Horizontal distance, in characters, between two adjacent key cells.
pub const KEY_STRIDE: usize = 6;

/// One row of keys in a geometry template.
///
/// Row `j` of the template uses line `1 + 3j` for shifted symbols and line
/// `2 + 3j` for unshifted symbols. The first key cell starts at `offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryRow {
    /// Column (in chars) of the first key's base-layer cell
    pub offset: usize,
    /// Keys of this row, left to right
    pub keys: Vec<KeyId>,
}

impl GeometryRow {
    /// Line index holding the shifted symbols of row `index`.
    #[must_use]
    pub const fn shift_line(index: usize) -> usize {
        1 + index * 3
    }

    /// Line index holding the unshifted symbols of row `index`.
    #[must_use]
    pub const fn base_line(index: usize) -> usize {
        2 + index * 3
    }
}

/// Named physical keyboard shape with its ASCII-art template.
///
/// # Validation
///
/// - Every row's keys must fit into the template lines (checked when parsing)
/// - Templates use box-drawing characters, so columns are counted in chars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Geometry name (e.g. "ISO")
    pub name: String,
    /// Template lines, one `String` per text line
    pub template: Vec<String>,
    /// Key rows, top to bottom
    pub rows: Vec<GeometryRow>,
}

impl Geometry {
    /// Returns true if the geometry declares `key` in any of its rows.
    #[must_use]
    pub fn contains(&self, key: KeyId) -> bool {
        self.rows.iter().any(|row| row.keys.contains(&key))
    }

    /// All keys declared by the geometry, top to bottom, left to right.
    pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.rows.iter().flat_map(|row| row.keys.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lines() {
        assert_eq!(GeometryRow::shift_line(0), 1);
        assert_eq!(GeometryRow::base_line(0), 2);
        assert_eq!(GeometryRow::shift_line(3), 10);
        assert_eq!(GeometryRow::base_line(3), 11);
    }

    #[test]
    fn test_contains() {
        let geometry = Geometry {
            name: "tiny".to_string(),
            template: vec![],
            rows: vec![GeometryRow {
                offset: 2,
                keys: vec![KeyId::Ad01, KeyId::Ad02],
            }],
        };
        assert!(geometry.contains(KeyId::Ad02));
        assert!(!geometry.contains(KeyId::Lsgt));
        assert_eq!(geometry.keys().count(), 2);
    }
}
