//! Linux XKB symbols exporter.

use super::push_section;
use super::symbols::ResolverChain;
use crate::constants::XKB_SYMBOL_WIDTH;
use crate::models::{Layout, Level, KEY_SECTIONS};

const VOID_SYMBOL: &str = "VoidSymbol";

impl Layout {
    /// XKB `key` statements, one per key, with a trailing comment listing
    /// the produced characters.
    ///
    /// ```text
    /// key <AD01> {[ q               , Q               , acircumflex     , Acircumflex     ],[ VoidSymbol      , VoidSymbol      ]}; // q Q â Â
    /// ```
    #[must_use]
    pub fn xkb(&self) -> Vec<String> {
        self.xkb_lines(true)
    }

    /// Same as [`Layout::xkb`], optionally without the trailing comments.
    #[must_use]
    pub fn xkb_lines(&self, show_description: bool) -> Vec<String> {
        let chain = ResolverChain::xkb();
        let mut output = Vec::new();

        for section in &KEY_SECTIONS {
            push_section(&mut output, format!("//{}", section.title));

            for &key in section.keys {
                let mut symbols: Vec<String> = Vec::with_capacity(Level::ALL.len());
                let mut description = String::from(" //");
                for level in Level::ALL {
                    let (symbol, desc) = match self.symbol(key, level) {
                        Some(c) => {
                            let resolved = chain.resolve(self, c);
                            (resolved.symbol, resolved.description)
                        }
                        None => (VOID_SYMBOL.to_string(), ' '),
                    };
                    symbols.push(format!("{symbol:<width$}", width = XKB_SYMBOL_WIDTH));
                    description.push(' ');
                    description.push(desc);
                }

                let mut line = format!(
                    "key <{}> {{[ {}],[ {}]}};",
                    key.as_str().to_uppercase(),
                    symbols[..4].join(", "),
                    symbols[4..].join(", "),
                );
                if show_description {
                    line.push_str(description.trim_end());
                }
                output.push(line);
            }
        }
        output
    }
}
