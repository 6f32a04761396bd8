//! Dead key descriptors.

use serde::{Deserialize, Serialize};

/// How a dead key obtains its composition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposeBehavior {
    /// Fixed table declared in the registry (accent composition)
    #[default]
    Table,
    /// Table derived from the layout itself: the base layer pair composes
    /// into the dead-key layer pair. Exported as a level-3 latch on XKB.
    Layout,
}

/// A dead key: pressing it changes what the next keystroke produces.
///
/// # Invariants
///
/// - `base` and `alt` have the same length and are index-aligned:
///   `base[i]` followed by this dead key produces `alt[i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadKey {
    /// Marker character used in layout sources (usually a combining mark)
    pub marker: char,
    /// Symbolic name (e.g. "acute"), used as the macOS state name
    pub name: String,
    /// Glyph shown for this dead key in previews and web keymaps
    pub klc_glyph: char,
    /// XKB keysym emitted for this dead key (e.g. "dead_acute")
    pub xkb_symbol: String,
    /// Produced when the dead key is followed by space
    pub alt_space: char,
    /// Produced when the dead key is followed by itself
    pub alt_self: char,
    /// Composition strategy
    pub compose: ComposeBehavior,
    /// Characters this dead key combines with
    pub base: Vec<char>,
    /// Composed characters, index-aligned with `base`
    pub alt: Vec<char>,
}

impl DeadKey {
    /// Returns the character produced by `base` after this dead key, if any.
    #[must_use]
    pub fn compose(&self, base: char) -> Option<char> {
        self.base
            .iter()
            .position(|&c| c == base)
            .and_then(|idx| self.alt.get(idx).copied())
    }

    /// Returns true if `base` participates in this dead key's composition.
    #[must_use]
    pub fn combines_with(&self, base: char) -> bool {
        self.base.contains(&base)
    }

    /// Iterates over (base, composed) pairs in table order.
    pub fn pairs(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.base.iter().copied().zip(self.alt.iter().copied())
    }

    /// True for dead keys whose table comes from the layout content.
    #[must_use]
    pub fn is_layout_defined(&self) -> bool {
        self.compose == ComposeBehavior::Layout
    }

    /// Keeps only the pairs whose base character satisfies `keep`.
    pub(crate) fn retain_bases(&mut self, keep: impl Fn(char) -> bool) {
        let (base, alt): (Vec<char>, Vec<char>) = self.pairs().filter(|&(b, _)| keep(b)).unzip();
        self.base = base;
        self.alt = alt;
    }

    /// Replaces the composition table.
    pub(crate) fn set_table(&mut self, base: Vec<char>, alt: Vec<char>) {
        debug_assert_eq!(base.len(), alt.len());
        self.base = base;
        self.alt = alt;
    }
}
