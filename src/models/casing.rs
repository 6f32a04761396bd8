//! Case transforms used to derive implicit shift/base symbols.

/// Blank cell: "this key produces nothing at this level".
pub const BLANK: char = ' ';

/// Symbol pairs whose "shifted" partner is not their Unicode uppercase.
const UPPER_OVERRIDES: [(char, char); 9] = [
    ('\u{00df}', '\u{1e9e}'), // ß ẞ
    ('\u{007c}', '\u{00a6}'), // | ¦
    ('\u{003c}', '\u{2264}'), // < ≤
    ('\u{003e}', '\u{2265}'), // > ≥
    ('\u{2020}', '\u{2021}'), // † ‡
    ('\u{2190}', '\u{21d0}'), // ← ⇐
    ('\u{2191}', '\u{21d1}'), // ↑ ⇑
    ('\u{2192}', '\u{21d2}'), // → ⇒
    ('\u{2193}', '\u{21d3}'), // ↓ ⇓
];

/// Canonical "shifted" partner of a symbol.
///
/// Known symbol pairs go through the override table, cased letters get their
/// uppercase form. Anything else returns [`BLANK`]: no derivable shift value.
#[must_use]
pub fn upper_key(symbol: char) -> char {
    if let Some(&(_, upper)) = UPPER_OVERRIDES.iter().find(|(lower, _)| *lower == symbol) {
        return upper;
    }
    match (single(symbol.to_uppercase()), single(symbol.to_lowercase())) {
        (Some(upper), Some(lower)) if upper != lower => upper,
        (Some(upper), None) => upper,
        _ => BLANK,
    }
}

/// Lowercase of a shifted symbol, used to fill a blank base-layer cell.
///
/// Symbols without a single-char lowercase are returned unchanged.
#[must_use]
pub fn lower_key(symbol: char) -> char {
    single(symbol.to_lowercase()).unwrap_or(symbol)
}

/// Standard single-char uppercase, if it exists.
#[must_use]
pub fn simple_upper(symbol: char) -> Option<char> {
    single(symbol.to_uppercase())
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
