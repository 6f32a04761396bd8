//! ASCII-art template parsing and filling.
//!
//! A template draws each key as a cell. Row `j` of a geometry puts the
//! shifted symbols on line `1 + 3j` and the unshifted ones on line `2 + 3j`;
//! key cells are [`KEY_STRIDE`] columns apart. Within a cell, the base pair
//! sits on the left and the dead-key/AltGr pairs two columns to the right.
//!
//! ```text
//! ┌─────┬─────┬
//! │ A   │ Z   │   shift line   (shift, dead-key shift)
//! │ a æ │ z   │   base line    (base, dead-key base)
//! ```
//!
//! Columns are counted in chars: templates use multi-byte box-drawing glyphs.

use super::combining::is_combining;
use crate::error::LayoutError;
use crate::models::layout::lookup_geometry;
use crate::models::{
    lower_key, upper_key, GeometryRow, KeyId, LayerPair, Layout, BLANK, KEY_STRIDE,
};

/// Reads one layer pair of `layout` from template lines.
///
/// Combining marks must already be merged onto their cell (see
/// [`merge_combining`](super::combining::merge_combining)).
///
/// # Blank cells
///
/// - Base pair: the shift cell prevails, a blank base cell takes its
///   lowercase
/// - A blank shift cell takes [`upper_key`] of the base cell
/// - Cells still blank after derivation are not stored
///
/// # Errors
///
/// - [`LayoutError::OutOfBounds`] if a key cell lies outside the lines
/// - [`LayoutError::UnregisteredDeadKey`] for a combining mark with no
///   registered dead key
pub fn parse_template(
    layout: &mut Layout,
    lines: &[String],
    rows: &[GeometryRow],
    pair: LayerPair,
) -> Result<(), LayoutError> {
    for (j, row) in rows.iter().enumerate() {
        let Some(&first) = row.keys.first() else {
            continue;
        };
        let shift_line = GeometryRow::shift_line(j);
        let base_line = GeometryRow::base_line(j);
        let line_chars = |index: usize| {
            lines
                .get(index)
                .map(|line| line.chars().collect::<Vec<char>>())
                .ok_or_else(|| out_of_bounds(layout, first, index, row.offset))
        };
        let shift = line_chars(shift_line)?;
        let base = line_chars(base_line)?;

        for (k, &key) in row.keys.iter().enumerate() {
            let column = row.offset + pair.column_offset() + k * KEY_STRIDE;
            let (Some(&base_cell), Some(&shift_cell)) = (base.get(column), shift.get(column))
            else {
                return Err(out_of_bounds(layout, key, base_line, column));
            };

            let (base_key, shift_key) = match (base_cell, shift_cell) {
                (BLANK, _) if pair == LayerPair::Base => (lower_key(shift_cell), shift_cell),
                (_, BLANK) => (base_cell, upper_key(base_cell)),
                _ => (base_cell, shift_cell),
            };

            for (symbol, level) in [(base_key, pair.lower()), (shift_key, pair.upper())] {
                if symbol == BLANK {
                    continue;
                }
                if !layout.register_dead_key(symbol) && is_combining(symbol) {
                    return Err(LayoutError::UnregisteredDeadKey {
                        marker: symbol,
                        key,
                    });
                }
                layout.layer_mut(level).insert(key, symbol);
            }
        }
    }
    Ok(())
}

/// Draws one layer pair of `layout` into template lines.
///
/// The base pair writes the shift cell and skips the base cell only when
/// the shift cell holds its [`upper_key`]; other pairs write the base cell
/// and only write the shift cell when it is not derivable. Keys that fall
/// outside the lines are left out.
#[must_use]
pub fn fill_template(
    layout: &Layout,
    mut lines: Vec<String>,
    rows: &[GeometryRow],
    pair: LayerPair,
) -> Vec<String> {
    for (j, row) in rows.iter().enumerate() {
        let shift_line = GeometryRow::shift_line(j);
        let base_line = GeometryRow::base_line(j);
        let (Some(shift), Some(base)) = (lines.get(shift_line), lines.get(base_line)) else {
            tracing::warn!(row = j, "Template has no lines for row, skipped");
            continue;
        };
        let mut shift: Vec<char> = shift.chars().collect();
        let mut base: Vec<char> = base.chars().collect();

        for (k, &key) in row.keys.iter().enumerate() {
            let column = row.offset + pair.column_offset() + k * KEY_STRIDE;
            if column >= base.len() || column >= shift.len() {
                continue;
            }
            let base_key = layout.symbol(key, pair.lower()).unwrap_or(BLANK);
            let shift_key = layout.symbol(key, pair.upper()).unwrap_or(BLANK);
            let derivable = upper_key(base_key) == shift_key;

            if pair == LayerPair::Base {
                shift[column] = shift_key;
                if shift_key == BLANK || !derivable {
                    base[column] = base_key;
                }
            } else {
                base[column] = base_key;
                if !derivable {
                    shift[column] = shift_key;
                }
            }
        }

        lines[shift_line] = shift.into_iter().collect();
        lines[base_line] = base.into_iter().collect();
    }
    lines
}

impl Layout {
    /// ASCII-art view of the requested layer pairs, drawn on the template
    /// of geometry `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownGeometry`] if `name` is not registered.
    pub fn get_geometry(&self, pairs: &[LayerPair], name: &str) -> Result<Vec<String>, LayoutError> {
        let geometry = lookup_geometry(self.registry(), name)?;
        Ok(pairs.iter().fold(geometry.template.clone(), |lines, &pair| {
            fill_template(self, lines, &geometry.rows, pair)
        }))
    }
}

fn out_of_bounds(layout: &Layout, key: KeyId, line: usize, column: usize) -> LayoutError {
    LayoutError::OutOfBounds {
        key,
        line,
        column,
        geometry: layout.geometry().name.clone(),
    }
}
