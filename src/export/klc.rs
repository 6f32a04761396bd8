//! Windows KLC exporter: layout table, dead key tables and dead key index.

use super::push_section;
use super::symbols::{hex_ord, ResolverChain};
use crate::models::{DeadKey, Layout, Level, KEY_SECTIONS};

/// KLC placeholder for "no symbol".
const NONE: &str = "-1";

/// Levels written to the KLC layout table, in column order.
const KLC_LEVELS: [Level; 4] = [Level::Base, Level::Shift, Level::AltGr, Level::AltGrShift];

impl Layout {
    /// KLC `LAYOUT` table rows.
    ///
    /// Columns: scan code, virtual key, CapsLock flag, base, shift, ctrl
    /// (always `-1`), AltGr, AltGr+shift, comment.
    #[must_use]
    pub fn klc(&self) -> Vec<String> {
        let chain = ResolverChain::klc();
        let mut output = Vec::new();

        for section in &KEY_SECTIONS {
            push_section(&mut output, format!("//{}", section.title));

            for &key in section.keys {
                let mut symbols = Vec::with_capacity(KLC_LEVELS.len());
                let mut description = String::from("//");
                for level in KLC_LEVELS {
                    let (symbol, desc) = match self.symbol(key, level) {
                        Some(c) => {
                            let resolved = chain.resolve(self, c);
                            (resolved.symbol, resolved.description)
                        }
                        None => (NONE.to_string(), ' '),
                    };
                    symbols.push(symbol);
                    description.push(' ');
                    description.push(desc);
                }

                let codes = self.registry().key_codes(key);
                let caps = self
                    .symbol(key, Level::Base)
                    .is_some_and(|c| !self.is_dead_key(c) && is_caps_affected(c));

                output.push(
                    [
                        codes.klc_scan.as_str(),
                        codes.klc_vk.as_str(),
                        if caps { "1" } else { "0" },
                        &symbols[0],
                        &symbols[1],
                        NONE,
                        &symbols[2],
                        &symbols[3],
                        description.trim(),
                    ]
                    .join("\t"),
                );
            }
        }
        output
    }

    /// KLC `DEADKEY` blocks, one per dead key in first-seen order.
    #[must_use]
    pub fn klc_deadkeys(&self) -> Vec<String> {
        let mut output = Vec::new();

        for dk in self.dead_keys() {
            output.push(format!("// DEADKEY: {} //{{{{{{", dk.name.to_uppercase()));
            output.push(format!("DEADKEY\t{}", hex_ord(dk.alt_space)));
            output.push(String::new());

            if dk.is_layout_defined() {
                output.extend(self.klc_layout_defined_pairs());
            } else {
                output.extend(dk.pairs().map(|(base, alt)| self.klc_pair(base, alt)));
            }

            output.push(String::new());
            output.push(self.klc_pair('\u{00a0}', dk.alt_space));
            output.push(self.klc_pair(' ', dk.alt_space));
            output.push("//}}}".to_string());
            output.push(String::new());
        }

        output.pop();
        output
    }

    /// KLC `KEYNAME_DEAD` entries.
    #[must_use]
    pub fn klc_dk_index(&self) -> Vec<String> {
        self.dead_keys()
            .map(|dk| format!("{}\t\"{}\"", hex_ord(dk.alt_space), dk.name.to_uppercase()))
            .collect()
    }

    /// Pairs of a layout-defined dead key, grouped by key section: the
    /// unshifted pairs first, then the shifted ones.
    fn klc_layout_defined_pairs(&self) -> Vec<String> {
        let mut output = Vec::new();
        for (base_level, dead_level) in [
            (Level::Base, Level::DeadKey),
            (Level::Shift, Level::DeadKeyShift),
        ] {
            for section in &KEY_SECTIONS {
                push_section(&mut output, format!("//{}", section.title));
                for &key in section.keys {
                    if let (Some(base), Some(alt)) =
                        (self.symbol(key, base_level), self.symbol(key, dead_level))
                    {
                        output.push(self.klc_pair(base, alt));
                    }
                }
            }
        }
        output
    }

    /// One `base -> alt` line; dead keys show their `alt_space`, and a dead
    /// key as result gets the `@` chaining suffix.
    fn klc_pair(&self, base: char, alt: char) -> String {
        let shown = |c: char| self.dead_key(c).map_or(c, |dk: &DeadKey| dk.alt_space);
        let (base_shown, alt_shown) = (shown(base), shown(alt));
        let alt_code = if self.is_dead_key(alt) {
            format!("{}@", hex_ord(alt_shown))
        } else {
            hex_ord(alt_shown)
        };
        format!(
            "{}\t{}\t// {} -> {}",
            hex_ord(base_shown),
            alt_code,
            base_shown,
            alt_shown
        )
    }
}

/// True if CapsLock changes `c`: its standard uppercase differs from it.
fn is_caps_affected(c: char) -> bool {
    c.to_uppercase().ne(std::iter::once(c))
}
