//! Driver file assembly.
//!
//! Driver templates are plain text files embedded in the binary. They hold
//! two kinds of placeholders:
//!
//! - line markers (`KALAMINE::LAYOUT`): the whole line is replaced by a
//!   layout view, each line of the view prefixed with whatever precedes the
//!   marker (indentation, comment leaders)
//! - tokens (`${name}` or `${name=default}`): replaced by metadata values

use crate::constants::DEFAULT_GEOMETRY;
use crate::error::LayoutError;
use crate::models::{LayerPair, Layout};
use crate::parser::lines_to_text;
use regex::{Captures, Regex};
use std::fmt;

/// Prefix of line markers in driver templates.
const MARKER_PREFIX: &str = "KALAMINE::";

const XKB_TEMPLATE: &str = include_str!("templates/template.xkb");
const KLC_TEMPLATE: &str = include_str!("templates/template.klc");
const KEYLAYOUT_TEMPLATE: &str = include_str!("templates/template.keylayout");

/// Encoding announced in KLC headers.
const KLC_ENCODING: &str = "UTF-16LE";

/// Replaces the line holding the `KALAMINE::<variable>` marker with `lines`.
///
/// # Errors
///
/// Returns [`LayoutError::Template`] if the marker pattern cannot be built.
pub fn substitute_lines(
    template: &str,
    variable: &str,
    lines: &[String],
) -> Result<String, LayoutError> {
    let pattern = format!(
        r"(?m)^(?P<indent>.*){}{}\b.*$",
        regex::escape(MARKER_PREFIX),
        regex::escape(variable)
    );
    let re = Regex::new(&pattern)?;
    Ok(re
        .replace_all(template, |caps: &Captures| lines_to_text(lines, &caps["indent"]))
        .into_owned())
}

/// Replaces `${token}` and `${token=default}` with `value`.
///
/// An empty `value` keeps the template default, if there is one.
///
/// # Errors
///
/// Returns [`LayoutError::Template`] if the token pattern cannot be built.
pub fn substitute_token(template: &str, token: &str, value: &str) -> Result<String, LayoutError> {
    let pattern = format!(r"\$\{{{}(?:=(?P<default>[^}}]*))?\}}", regex::escape(token));
    let re = Regex::new(&pattern)?;
    Ok(re
        .replace_all(template, |caps: &Captures| match caps.name("default") {
            Some(default) if value.is_empty() => default.as_str().to_string(),
            _ => value.to_string(),
        })
        .into_owned())
}

/// UTF-16LE bytes of `text` with CRLF line endings, as Windows expects
/// KLC sources.
#[must_use]
pub fn encode_utf16le_crlf(text: &str) -> Vec<u8> {
    text.replace("\r\n", "\n")
        .replace('\n', "\r\n")
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// Rendering options shared by all drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Geometry used to draw the layout previews in file headers
    pub preview_geometry: String,
    /// Append the produced characters as comments to XKB key lines
    pub show_description: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preview_geometry: DEFAULT_GEOMETRY.to_string(),
            show_description: true,
        }
    }
}

/// Target driver formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// Linux XKB symbols
    Xkb,
    /// Windows Keyboard Layout Creator source
    Klc,
    /// macOS keylayout
    Keylayout,
}

impl Driver {
    /// All drivers, in build order.
    pub const ALL: [Self; 3] = [Self::Xkb, Self::Klc, Self::Keylayout];

    /// File extension of the driver.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xkb => "xkb",
            Self::Klc => "klc",
            Self::Keylayout => "keylayout",
        }
    }

    const fn template(self) -> &'static str {
        match self {
            Self::Xkb => XKB_TEMPLATE,
            Self::Klc => KLC_TEMPLATE,
            Self::Keylayout => KEYLAYOUT_TEMPLATE,
        }
    }

    /// Renders the complete driver file for `layout`.
    ///
    /// KLC output uses LF line endings here; see [`encode_utf16le_crlf`]
    /// for the on-disk form.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview geometry is unknown.
    pub fn render(self, layout: &Layout, options: &RenderOptions) -> Result<String, LayoutError> {
        let geometry = &options.preview_geometry;
        let qwerty = layout.get_geometry(&[LayerPair::Base, LayerPair::DeadKey], geometry)?;
        let altgr = layout.get_geometry(&[LayerPair::AltGr], geometry)?;

        let mut out = self.template().to_string();
        out = substitute_lines(&out, "GEOMETRY_qwerty", &qwerty)?;
        out = substitute_lines(&out, "GEOMETRY_altgr", &altgr)?;

        match self {
            Self::Xkb => {
                out = substitute_lines(&out, "LAYOUT", &layout.xkb_lines(options.show_description))?;
            }
            Self::Klc => {
                out = substitute_lines(&out, "LAYOUT", &layout.klc())?;
                out = substitute_lines(&out, "DEAD_KEYS", &layout.klc_deadkeys())?;
                out = substitute_lines(&out, "DEAD_KEY_INDEX", &layout.klc_dk_index())?;
                out = substitute_token(&out, "encoding", KLC_ENCODING)?;
            }
            Self::Keylayout => {
                for (i, index) in [0, 1, 2, 4, 5].into_iter().enumerate() {
                    let keymap = layout.osx_keymap(index)?;
                    out = substitute_lines(&out, &format!("LAYOUT_{i}"), &keymap)?;
                }
                out = substitute_lines(&out, "ACTIONS", &layout.osx_actions())?;
                out = substitute_lines(&out, "TERMINATORS", &layout.osx_terminators())?;
            }
        }

        let meta = &layout.metadata;
        let variant = if meta.variant.is_empty() {
            &meta.name
        } else {
            &meta.variant
        };
        for (token, value) in [
            ("name", meta.name.as_str()),
            ("description", meta.description.as_str()),
            ("locale", meta.locale.as_str()),
            ("variant", variant.as_str()),
            ("author", meta.author.as_str()),
            ("version", meta.version.as_str()),
        ] {
            out = substitute_token(&out, token, value)?;
        }
        Ok(out)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
