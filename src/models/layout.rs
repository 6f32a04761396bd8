//! Layout and metadata data structures.

use crate::error::LayoutError;
use crate::models::{DeadKey, Geometry, KeyId, Layer, Level};
use crate::registry::Registry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Descriptive fields of a layout source.
///
/// All fields are optional in the source; exporters substitute them into
/// driver templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetadata {
    /// Short layout name (e.g. "lafayette"), defaults to the file stem
    pub name: String,
    /// Long description
    pub description: String,
    /// Locale code (e.g. "fr")
    pub locale: String,
    /// Variant name used by XKB (e.g. "lafayette")
    pub variant: String,
    /// Creator name
    pub author: String,
    /// Layout version
    pub version: String,
}

impl LayoutMetadata {
    /// Creates metadata with the given name and empty fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Complete keyboard layout: six layers plus the dead keys they use.
///
/// # Invariants
///
/// - The six layers always exist, possibly empty
/// - `dead_keys` only holds markers that appear in at least one layer, in
///   first-seen order
/// - Table dead keys only keep pairs whose base character is producible
///   by this layout; layout-defined dead keys get their table from the
///   base and dead-key layer pairs
///
/// A `Layout` is built once by the parser and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Descriptive metadata
    pub metadata: LayoutMetadata,
    geometry: Geometry,
    layers: [Layer; 6],
    dead_keys: IndexMap<char, DeadKey>,
    registry: Arc<Registry>,
}

impl Layout {
    /// Creates an empty layout bound to a registry geometry.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownGeometry`] if the registry has no
    /// geometry called `geometry`.
    pub fn new(
        metadata: LayoutMetadata,
        geometry: &str,
        registry: Arc<Registry>,
    ) -> Result<Self, LayoutError> {
        let geometry = lookup_geometry(&registry, geometry)?.clone();
        Ok(Self {
            metadata,
            geometry,
            layers: Default::default(),
            dead_keys: IndexMap::new(),
            registry,
        })
    }

    /// Geometry the layout source was drawn on.
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Layer for one shift/AltGr state.
    #[must_use]
    pub fn layer(&self, level: Level) -> &Layer {
        &self.layers[level.index()]
    }

    /// Character produced by `key` at `level`, if any.
    #[must_use]
    pub fn symbol(&self, key: KeyId, level: Level) -> Option<char> {
        self.layer(level).get(key)
    }

    /// Dead keys used by this layout, in first-seen order.
    pub fn dead_keys(&self) -> impl Iterator<Item = &DeadKey> {
        self.dead_keys.values()
    }

    /// Dead key registered for `marker` in this layout.
    #[must_use]
    pub fn dead_key(&self, marker: char) -> Option<&DeadKey> {
        self.dead_keys.get(&marker)
    }

    /// Returns true if `symbol` is a dead key of this layout.
    #[must_use]
    pub fn is_dead_key(&self, symbol: char) -> bool {
        self.dead_keys.contains_key(&symbol)
    }

    /// Returns true if `symbol` is a base character of any dead key.
    #[must_use]
    pub fn has_dead_keys(&self, symbol: char) -> bool {
        self.dead_keys.values().any(|dk| dk.combines_with(symbol))
    }

    /// Returns true if any layer produces `symbol`.
    #[must_use]
    pub fn produces(&self, symbol: char) -> bool {
        self.layers.iter().any(|layer| layer.produces(symbol))
    }

    /// Registry the layout was built against.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn layer_mut(&mut self, level: Level) -> &mut Layer {
        &mut self.layers[level.index()]
    }

    /// Records `marker` as used. Unknown markers are left to the caller.
    ///
    /// Returns false if `marker` is not a registered dead key.
    pub(crate) fn register_dead_key(&mut self, marker: char) -> bool {
        if self.dead_keys.contains_key(&marker) {
            return true;
        }
        match self.registry.dead_key(marker) {
            Some(dk) => {
                tracing::debug!(name = %dk.name, "Registered dead key");
                self.dead_keys.insert(marker, dk.clone());
                true
            }
            None => false,
        }
    }

    /// Completes dead key tables once all layers are parsed.
    pub(crate) fn finalize(&mut self) {
        let markers: Vec<char> = self.dead_keys.keys().copied().collect();
        for marker in markers {
            let Some(dk) = self.dead_keys.get(&marker) else {
                continue;
            };
            if dk.is_layout_defined() {
                let (base, alt) = self.derive_layout_table();
                if let Some(dk) = self.dead_keys.get_mut(&marker) {
                    dk.set_table(base, alt);
                }
            } else {
                let layers = &self.layers;
                if let Some(dk) = self.dead_keys.get_mut(&marker) {
                    dk.retain_bases(|c| layers.iter().any(|layer| layer.produces(c)));
                }
            }
        }
    }

    /// Pairs each base-layer symbol with its dead-key layer symbol, unshifted
    /// keys first, then shifted keys, in canonical key order.
    fn derive_layout_table(&self) -> (Vec<char>, Vec<char>) {
        let mut pairs: Vec<(char, char)> = Vec::new();
        for (base_level, dead_level) in [
            (Level::Base, Level::DeadKey),
            (Level::Shift, Level::DeadKeyShift),
        ] {
            for key in KeyId::all() {
                let Some(alt) = self.symbol(key, dead_level) else {
                    continue;
                };
                match self.symbol(key, base_level) {
                    Some(base) => pairs.push((base, alt)),
                    None => tracing::warn!(
                        key = %key,
                        level = %base_level,
                        "Dead key symbol without a base symbol, skipped"
                    ),
                }
            }
        }
        pairs.into_iter().unzip()
    }
}

pub(crate) fn lookup_geometry<'a>(
    registry: &'a Registry,
    name: &str,
) -> Result<&'a Geometry, LayoutError> {
    registry
        .geometry(name)
        .ok_or_else(|| LayoutError::UnknownGeometry {
            name: name.to_string(),
            available: registry.geometry_names().collect::<Vec<_>>().join(", "),
        })
}
