//! Symbol resolution for the XKB and KLC exporters.
//!
//! Each target turns a layer character into a target symbol by trying a
//! chain of [`SymbolResolver`] strategies in order. Every chain ends with a
//! literal code-point rendering, so resolution never fails.

use crate::constants::XKB_SYMBOL_WIDTH;
use crate::models::Layout;

/// A layer character rendered for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Target symbol (keysym name, hex code point, ...)
    pub symbol: String,
    /// Character shown in the human-readable comment
    pub description: char,
}

impl Resolved {
    fn new(symbol: impl Into<String>, description: char) -> Self {
        Self {
            symbol: symbol.into(),
            description,
        }
    }
}

/// One resolution strategy. Returns `None` to defer to the next one.
pub trait SymbolResolver {
    fn resolve(&self, layout: &Layout, symbol: char) -> Option<Resolved>;
}

/// Ordered strategies plus a total fallback.
pub struct ResolverChain {
    strategies: Vec<Box<dyn SymbolResolver>>,
    literal: fn(char) -> Resolved,
}

impl ResolverChain {
    /// XKB: dead key, then keysym name, then `U` + code point.
    #[must_use]
    pub fn xkb() -> Self {
        Self {
            strategies: vec![Box::new(XkbDeadKey), Box::new(XkbKeysym)],
            literal: |symbol| Resolved::new(format!("U{}", hex_ord(symbol).to_uppercase()), symbol),
        }
    }

    /// KLC: dead key, then literal whitelist, then bare hex code point.
    #[must_use]
    pub fn klc() -> Self {
        Self {
            strategies: vec![Box::new(KlcDeadKey), Box::new(KlcLiteral)],
            literal: |symbol| Resolved::new(hex_ord(symbol), symbol),
        }
    }

    /// Resolves `symbol`; always succeeds.
    #[must_use]
    pub fn resolve(&self, layout: &Layout, symbol: char) -> Resolved {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.resolve(layout, symbol))
            .unwrap_or_else(|| (self.literal)(symbol))
    }
}

struct XkbDeadKey;

impl SymbolResolver for XkbDeadKey {
    fn resolve(&self, layout: &Layout, symbol: char) -> Option<Resolved> {
        let dk = layout.dead_key(symbol)?;
        let description = if dk.is_layout_defined() {
            dk.alt_space
        } else {
            dk.alt_self
        };
        Some(Resolved::new(dk.xkb_symbol.clone(), description))
    }
}

struct XkbKeysym;

impl SymbolResolver for XkbKeysym {
    fn resolve(&self, layout: &Layout, symbol: char) -> Option<Resolved> {
        layout
            .registry()
            .xkb_symbol(symbol)
            .filter(|name| name.len() <= XKB_SYMBOL_WIDTH)
            .map(|name| Resolved::new(name, symbol))
    }
}

struct KlcDeadKey;

impl SymbolResolver for KlcDeadKey {
    fn resolve(&self, layout: &Layout, symbol: char) -> Option<Resolved> {
        let dk = layout.dead_key(symbol)?;
        Some(Resolved::new(format!("{}@", hex_ord(dk.alt_space)), dk.alt_space))
    }
}

struct KlcLiteral;

impl SymbolResolver for KlcLiteral {
    fn resolve(&self, layout: &Layout, symbol: char) -> Option<Resolved> {
        layout
            .registry()
            .is_klc_literal(symbol)
            .then(|| Resolved::new(symbol.to_string(), symbol))
    }
}

/// Lowercase hex code point, at least 4 digits.
#[must_use]
pub fn hex_ord(symbol: char) -> String {
    format!("{:04x}", u32::from(symbol))
}

/// Escapes characters that cannot appear literally in keylayout attributes.
#[must_use]
pub fn xml_proof(symbol: char) -> String {
    match symbol {
        '<' | '&' | '"' | '\u{00a0}' | '>' => format!("&#x{};", hex_ord(symbol)),
        _ => symbol.to_string(),
    }
}
