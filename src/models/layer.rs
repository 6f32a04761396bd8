//! Layers: one key → character mapping per shift/AltGr state.

use super::KeyId;
use std::collections::BTreeMap;
use std::fmt;

/// One of the six shift/AltGr states of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// No modifier
    Base = 0,
    /// Shift
    Shift = 1,
    /// After the layout-defined dead key
    DeadKey = 2,
    /// Shift, after the layout-defined dead key
    DeadKeyShift = 3,
    /// AltGr
    AltGr = 4,
    /// AltGr + Shift
    AltGrShift = 5,
}

impl Level {
    /// All levels, in layer index order.
    pub const ALL: [Self; 6] = [
        Self::Base,
        Self::Shift,
        Self::DeadKey,
        Self::DeadKeyShift,
        Self::AltGr,
        Self::AltGrShift,
    ];

    /// Layer index (0..5).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Level for a layer index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The unshifted level of the pair this level belongs to.
    #[must_use]
    pub const fn pair(self) -> LayerPair {
        match self {
            Self::Base | Self::Shift => LayerPair::Base,
            Self::DeadKey | Self::DeadKeyShift => LayerPair::DeadKey,
            Self::AltGr | Self::AltGrShift => LayerPair::AltGr,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base => "base",
            Self::Shift => "shift",
            Self::DeadKey => "dead key",
            Self::DeadKeyShift => "dead key + shift",
            Self::AltGr => "AltGr",
            Self::AltGrShift => "AltGr + shift",
        };
        f.write_str(name)
    }
}

/// An (unshifted, shifted) pair of levels, as drawn in one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerPair {
    /// Levels 0 and 1; the shifted cell prevails
    Base,
    /// Levels 2 and 3
    DeadKey,
    /// Levels 4 and 5
    AltGr,
}

impl LayerPair {
    /// Unshifted level of the pair.
    #[must_use]
    pub const fn lower(self) -> Level {
        match self {
            Self::Base => Level::Base,
            Self::DeadKey => Level::DeadKey,
            Self::AltGr => Level::AltGr,
        }
    }

    /// Shifted level of the pair.
    #[must_use]
    pub const fn upper(self) -> Level {
        match self {
            Self::Base => Level::Shift,
            Self::DeadKey => Level::DeadKeyShift,
            Self::AltGr => Level::AltGrShift,
        }
    }

    /// Column shift inside a key cell: base symbols sit in the left part
    /// of the cell, dead-key and AltGr symbols two columns to the right.
    #[must_use]
    pub const fn column_offset(self) -> usize {
        match self {
            Self::Base => 0,
            Self::DeadKey | Self::AltGr => 2,
        }
    }
}

/// Mapping from key to the single character it produces at one level.
///
/// A key absent from the layer produces nothing at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer(BTreeMap<KeyId, char>);

impl Layer {
    /// Creates an empty layer.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Character produced by `key`, if any.
    #[must_use]
    pub fn get(&self, key: KeyId) -> Option<char> {
        self.0.get(&key).copied()
    }

    /// Returns true if `key` produces something at this level.
    #[must_use]
    pub fn contains(&self, key: KeyId) -> bool {
        self.0.contains_key(&key)
    }

    /// Returns true if any key of this layer produces `symbol`.
    #[must_use]
    pub fn produces(&self, symbol: char) -> bool {
        self.0.values().any(|&c| c == symbol)
    }

    /// Number of keys producing something at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no key produces anything at this level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over (key, character) entries.
    pub fn iter(&self) -> impl Iterator<Item = (KeyId, char)> + '_ {
        self.0.iter().map(|(&key, &c)| (key, c))
    }

    pub(crate) fn insert(&mut self, key: KeyId, symbol: char) {
        self.0.insert(key, symbol);
    }
}
