//! Static lookup tables: geometries, dead keys, key codes and symbol names.
//!
//! The tables are embedded in the binary as YAML and parsed once per process
//! by [`Registry::builtin`]. A registry is read-only after loading and shared
//! between layouts through an `Arc`.

use crate::error::RegistryError;
use crate::models::{ComposeBehavior, DeadKey, Geometry, GeometryRow, KeyId};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

const GEOMETRY_YAML: &str = include_str!("geometry.yaml");
const DEAD_KEYS_YAML: &str = include_str!("dead_keys.yaml");
const KEY_CODES_YAML: &str = include_str!("key_codes.yaml");
const SYMBOLS_YAML: &str = include_str!("symbols.yaml");

static BUILTIN: OnceLock<Arc<Registry>> = OnceLock::new();

/// Target-specific codes of one physical key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyCodes {
    /// Windows scan code (hex, e.g. "1e")
    pub klc_scan: String,
    /// Windows virtual key name (e.g. "A", "OEM_1")
    pub klc_vk: String,
    /// macOS virtual key code
    pub osx: u16,
    /// DOM `KeyboardEvent.code` (e.g. "KeyA")
    pub web: String,
}

#[derive(Debug, Deserialize)]
struct GeometryEntry {
    template: Vec<String>,
    rows: Vec<GeometryRow>,
}

#[derive(Debug, Deserialize)]
struct DeadKeyEntry {
    char: String,
    name: String,
    klc: String,
    xkb: String,
    alt_space: String,
    alt_self: String,
    #[serde(default)]
    compose: ComposeBehavior,
    #[serde(default)]
    base: String,
    #[serde(default)]
    alt: String,
}

#[derive(Debug, Deserialize)]
struct SymbolTables {
    xkb: HashMap<char, String>,
    klc: String,
}

/// All static tables needed to parse and export layouts.
#[derive(Debug, Clone)]
pub struct Registry {
    geometries: IndexMap<String, Geometry>,
    dead_keys: IndexMap<char, DeadKey>,
    key_codes: Vec<KeyCodes>,
    xkb_symbols: HashMap<char, String>,
    klc_literals: HashSet<char>,
}

impl Registry {
    /// Returns the process-wide registry built from the embedded tables.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded table is malformed.
    pub fn builtin() -> Result<Arc<Self>, RegistryError> {
        if let Some(registry) = BUILTIN.get() {
            return Ok(Arc::clone(registry));
        }
        let registry = Arc::new(Self::from_sources(
            GEOMETRY_YAML,
            DEAD_KEYS_YAML,
            KEY_CODES_YAML,
            SYMBOLS_YAML,
        )?);
        tracing::debug!(
            geometries = registry.geometries.len(),
            dead_keys = registry.dead_keys.len(),
            "Loaded builtin registry"
        );
        Ok(Arc::clone(BUILTIN.get_or_init(|| registry)))
    }

    /// Builds a registry from YAML sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed, a dead key table is
    /// misaligned, a marker is declared twice, or a key lacks key codes.
    pub fn from_sources(
        geometry_yaml: &str,
        dead_keys_yaml: &str,
        key_codes_yaml: &str,
        symbols_yaml: &str,
    ) -> Result<Self, RegistryError> {
        let geometries = parse_geometries(geometry_yaml, "geometry.yaml")?;

        let entries: Vec<DeadKeyEntry> =
            serde_yaml::from_str(dead_keys_yaml).map_err(|source| RegistryError::Yaml {
                file: "dead_keys.yaml",
                source,
            })?;
        let mut dead_keys = IndexMap::new();
        for entry in entries {
            let dead_key = entry.into_dead_key()?;
            let code = u32::from(dead_key.marker);
            if dead_keys.insert(dead_key.marker, dead_key).is_some() {
                return Err(RegistryError::DuplicateMarker { code });
            }
        }

        let mut codes: HashMap<KeyId, KeyCodes> =
            serde_yaml::from_str(key_codes_yaml).map_err(|source| RegistryError::Yaml {
                file: "key_codes.yaml",
                source,
            })?;
        let key_codes = KeyId::all()
            .map(|key| {
                codes
                    .remove(&key)
                    .ok_or(RegistryError::MissingKeyCode { table: "key_codes.yaml", key })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let symbols: SymbolTables =
            serde_yaml::from_str(symbols_yaml).map_err(|source| RegistryError::Yaml {
                file: "symbols.yaml",
                source,
            })?;

        Ok(Self {
            geometries,
            dead_keys,
            key_codes,
            xkb_symbols: symbols.xkb,
            klc_literals: symbols.klc.chars().collect(),
        })
    }

    /// Adds (or replaces) geometries from a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be parsed.
    pub fn with_geometries(mut self, geometry_yaml: &str) -> Result<Self, RegistryError> {
        let extra = parse_geometries(geometry_yaml, "geometry catalog")?;
        self.geometries.extend(extra);
        Ok(self)
    }

    /// Looks up a geometry by name (case-insensitive).
    #[must_use]
    pub fn geometry(&self, name: &str) -> Option<&Geometry> {
        self.geometries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, geometry)| geometry)
    }

    /// Names of all known geometries, in declaration order.
    pub fn geometry_names(&self) -> impl Iterator<Item = &str> {
        self.geometries.keys().map(String::as_str)
    }

    /// Looks up a dead key by its marker character.
    #[must_use]
    pub fn dead_key(&self, marker: char) -> Option<&DeadKey> {
        self.dead_keys.get(&marker)
    }

    /// All registered dead keys, in declaration order.
    pub fn dead_keys(&self) -> impl Iterator<Item = &DeadKey> {
        self.dead_keys.values()
    }

    /// Target-specific codes of `key`.
    #[must_use]
    pub fn key_codes(&self, key: KeyId) -> &KeyCodes {
        // complete by construction: `from_sources` rejects missing keys
        &self.key_codes[key.index()]
    }

    /// XKB keysym name of `symbol`, if it has one.
    #[must_use]
    pub fn xkb_symbol(&self, symbol: char) -> Option<&str> {
        self.xkb_symbols.get(&symbol).map(String::as_str)
    }

    /// Returns true if `symbol` may be written literally in a KLC table.
    #[must_use]
    pub fn is_klc_literal(&self, symbol: char) -> bool {
        self.klc_literals.contains(&symbol)
    }
}

fn parse_geometries(
    yaml: &str,
    file: &'static str,
) -> Result<IndexMap<String, Geometry>, RegistryError> {
    let entries: IndexMap<String, GeometryEntry> =
        serde_yaml::from_str(yaml).map_err(|source| RegistryError::Yaml { file, source })?;
    Ok(entries
        .into_iter()
        .map(|(name, entry)| {
            let geometry = Geometry {
                name: name.clone(),
                template: entry.template,
                rows: entry.rows,
            };
            (name, geometry)
        })
        .collect())
}

impl DeadKeyEntry {
    fn into_dead_key(self) -> Result<DeadKey, RegistryError> {
        let base: Vec<char> = self.base.chars().collect();
        let alt: Vec<char> = self.alt.chars().collect();
        if base.len() != alt.len() {
            return Err(RegistryError::MisalignedTable {
                name: self.name,
                base: base.len(),
                alt: alt.len(),
            });
        }
        Ok(DeadKey {
            marker: single_char(&self.name, "char", &self.char)?,
            klc_glyph: single_char(&self.name, "klc", &self.klc)?,
            alt_space: single_char(&self.name, "alt_space", &self.alt_space)?,
            alt_self: single_char(&self.name, "alt_self", &self.alt_self)?,
            xkb_symbol: self.xkb,
            compose: self.compose,
            base,
            alt,
            name: self.name,
        })
    }
}

fn single_char(name: &str, field: &'static str, value: &str) -> Result<char, RegistryError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(RegistryError::NotAChar {
            name: name.to_string(),
            field,
            value: value.to_string(),
        }),
    }
}
