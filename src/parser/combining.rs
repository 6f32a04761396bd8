//! Combining-mark normalization for ASCII-art layout sources.
//!
//! A combining mark cannot be drawn alone in a fixed-width grid: sources
//! write it after a padding space (`" ́"`), which renders as a standalone
//! accent. Before parsing, [`merge_combining`] folds every mark onto the
//! cell it follows; [`split_combining`] does the reverse when rendering.

/// Unicode blocks of combining diacritical marks.
const COMBINING_RANGES: [(char, char); 5] = [
    ('\u{0300}', '\u{036f}'),
    ('\u{1ab0}', '\u{1aff}'),
    ('\u{1dc0}', '\u{1dff}'),
    ('\u{20d0}', '\u{20ff}'),
    ('\u{fe20}', '\u{fe2f}'),
];

/// Returns true if `c` is a combining diacritical mark.
#[must_use]
pub fn is_combining(c: char) -> bool {
    COMBINING_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}

/// Replaces the character preceding each combining mark with the mark.
///
/// A mark at the very start of the text is kept as is.
#[must_use]
pub fn merge_combining(text: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(text.len());
    for c in text.chars() {
        if is_combining(c) {
            if let Some(last) = out.last_mut() {
                *last = c;
                continue;
            }
        }
        out.push(c);
    }
    out.into_iter().collect()
}

/// Inserts a space before each combining mark.
#[must_use]
pub fn split_combining(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_combining(c) {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Joins rendered lines into text, indenting non-empty lines and splitting
/// combining marks off their cells.
#[must_use]
pub fn lines_to_text(lines: &[String], indent: &str) -> String {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{}", split_combining(line))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
