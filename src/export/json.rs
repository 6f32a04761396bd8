//! JSON keymap for the `x-keyboard` web widget.
//!
//! ```json
//! {
//!   "name": "lafayette",
//!   "geometry": "iso",
//!   "keymap": { "KeyQ": ["q", "Q", "", ""], "Quote": ["*´", "*¨"] },
//!   "deadkeys": { "*´": { "a": "á", "A": "Á" } }
//! }
//! ```
//!
//! Dead keys are written as `*` followed by their glyph.

use crate::models::{KeyId, Layout, Level};
use indexmap::IndexMap;
use serde::Serialize;

/// Levels listed in a keymap entry: base, shift, AltGr, AltGr+shift.
const JSON_LEVELS: [Level; 4] = [Level::Base, Level::Shift, Level::AltGr, Level::AltGrShift];

/// Serializable web keymap of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonLayout {
    /// Layout name
    pub name: String,
    /// Layout description
    pub description: String,
    /// Geometry name, lowercase
    pub geometry: String,
    /// DOM key code → symbols per level; missing inner levels are empty
    /// strings, missing trailing levels are dropped
    pub keymap: IndexMap<String, Vec<String>>,
    /// Dead key id → (base → composed)
    pub deadkeys: IndexMap<String, IndexMap<String, String>>,
}

impl Layout {
    /// Web keymap view, keys in canonical order.
    #[must_use]
    pub fn json(&self) -> JsonLayout {
        let mut keymap = IndexMap::new();
        for key in KeyId::all() {
            let mut symbols: Vec<String> = JSON_LEVELS
                .iter()
                .map(|&level| {
                    self.symbol(key, level)
                        .map(|c| self.json_symbol(c))
                        .unwrap_or_default()
                })
                .collect();
            while symbols.last().is_some_and(String::is_empty) {
                symbols.pop();
            }
            if !symbols.is_empty() {
                keymap.insert(self.registry().key_codes(key).web.clone(), symbols);
            }
        }

        let deadkeys = self
            .dead_keys()
            .map(|dk| {
                let table = dk
                    .pairs()
                    .map(|(base, alt)| (self.json_symbol(base), self.json_symbol(alt)))
                    .collect();
                (self.json_symbol(dk.marker), table)
            })
            .collect();

        JsonLayout {
            name: self.metadata.name.clone(),
            description: self.metadata.description.clone(),
            geometry: self.geometry().name.to_lowercase(),
            keymap,
            deadkeys,
        }
    }

    fn json_symbol(&self, c: char) -> String {
        match self.dead_key(c) {
            Some(dk) => format!("*{}", dk.klc_glyph),
            None => c.to_string(),
        }
    }
}
