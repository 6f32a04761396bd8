//! macOS keylayout exporter: key maps, dead key actions and terminators.

use super::push_section;
use super::symbols::xml_proof;
use crate::error::LayoutError;
use crate::models::casing::simple_upper;
use crate::models::{Layout, Level, KEY_SECTIONS};
use std::collections::HashSet;

/// Output of a key that produces nothing.
const NO_OUTPUT: &str = "&#x0010;";

/// Target of a `<when>` element.
enum Transition {
    Next(String),
    Output(String),
}

fn when(state: &str, transition: &Transition) -> String {
    let state = format!("state=\"{state}\"");
    let transition = match transition {
        Transition::Next(name) => format!("next=\"{name}\""),
        Transition::Output(output) => format!("output=\"{output}\""),
    };
    format!("  <when {state:<18} {transition} />")
}

impl Layout {
    /// `<key>` elements of one keymap.
    ///
    /// Keymap indexes: 0 base, 1 shift, 2 caps lock (base layer
    /// uppercased), 4 AltGr, 5 AltGr+shift.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOsxLevel`] for any other index.
    pub fn osx_keymap(&self, index: usize) -> Result<Vec<String>, LayoutError> {
        let (level, caps) = match index {
            0 => (Level::Base, false),
            1 => (Level::Shift, false),
            2 => (Level::Base, true),
            4 => (Level::AltGr, false),
            5 => (Level::AltGrShift, false),
            _ => return Err(LayoutError::InvalidOsxLevel(index)),
        };

        let mut output = Vec::new();
        for section in &KEY_SECTIONS {
            push_section(&mut output, format!("<!-- {} -->", section.title));

            for &key in section.keys {
                let (symbol, is_action) = match self.symbol(key, level) {
                    Some(c) => match self.dead_key(c) {
                        Some(dk) => (format!("dead_{}", dk.name), true),
                        None if caps => (
                            c.to_uppercase().map(xml_proof).collect(),
                            simple_upper(c).is_some_and(|upper| self.has_dead_keys(upper)),
                        ),
                        None => (xml_proof(c), self.has_dead_keys(c)),
                    },
                    None => (NO_OUTPUT.to_string(), false),
                };

                let code = format!("code=\"{}\"", self.registry().key_codes(key).osx);
                let attribute = if is_action { "action" } else { "output" };
                output.push(format!("<key {code:<10} {attribute}=\"{symbol}\" />"));
            }
        }
        Ok(output)
    }

    /// `<action>` elements: dead key actions, a blank line, then the
    /// spacebar actions and the actions of every character that composes
    /// with a dead key. Each action id is emitted once.
    #[must_use]
    pub fn osx_actions(&self) -> Vec<String> {
        let mut dead_key_actions: Vec<String> = Vec::new();
        let mut output: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        output.push("<!-- Spacebar -->".to_string());
        for (id, none) in [("space", " "), ("nbsp", "&#x00a0;")] {
            output.push(format!("<action id=\"{id}\">"));
            output.push(when("none", &Transition::Output(none.to_string())));
            for dk in self.dead_keys() {
                output.push(when(&dk.name, &Transition::Output(xml_proof(dk.alt_space))));
            }
            output.push("</action>".to_string());
        }

        for section in &KEY_SECTIONS {
            output.push(String::new());
            output.push(format!("<!-- {} -->", section.title));

            for &key in section.keys {
                for level in [Level::Base, Level::Shift] {
                    let Some(c) = self.symbol(key, level) else {
                        continue;
                    };
                    if level == Level::Shift && self.symbol(key, Level::Base) == Some(c) {
                        continue;
                    }
                    let is_dead = self.is_dead_key(c);
                    let whens = self.composition_whens(c);
                    if !is_dead && whens.is_empty() {
                        continue;
                    }
                    let target = if is_dead {
                        &mut dead_key_actions
                    } else {
                        &mut output
                    };
                    self.push_action(target, &mut seen, c, whens);
                }

                for level in [
                    Level::DeadKey,
                    Level::DeadKeyShift,
                    Level::AltGr,
                    Level::AltGrShift,
                ] {
                    let Some(c) = self.symbol(key, level) else {
                        continue;
                    };
                    if self.is_dead_key(c) {
                        let whens = self.composition_whens(c);
                        self.push_action(&mut dead_key_actions, &mut seen, c, whens);
                    }
                }
            }
        }

        dead_key_actions.push(String::new());
        dead_key_actions.extend(output);
        dead_key_actions
    }

    /// Output of each dead key when pressed twice.
    #[must_use]
    pub fn osx_terminators(&self) -> Vec<String> {
        self.dead_keys()
            .map(|dk| {
                let state = format!("state=\"{}\"", dk.name);
                format!(" <when {state:<18} output=\"{}\" />", xml_proof(dk.alt_self))
            })
            .collect()
    }

    /// Action id of a layer character.
    fn osx_action_id(&self, c: char) -> String {
        match self.dead_key(c) {
            Some(dk) => format!("dead_{}", dk.name),
            None => xml_proof(c),
        }
    }

    /// What typing `c` does in each dead key state.
    fn composition_whens(&self, c: char) -> Vec<String> {
        self.dead_keys()
            .filter_map(|dk| dk.compose(c).map(|alt| when(&dk.name, &self.transition(alt))))
            .collect()
    }

    fn transition(&self, c: char) -> Transition {
        match self.dead_key(c) {
            Some(dk) => Transition::Next(dk.name.clone()),
            None => Transition::Output(xml_proof(c)),
        }
    }

    fn push_action(
        &self,
        target: &mut Vec<String>,
        seen: &mut HashSet<String>,
        c: char,
        whens: Vec<String>,
    ) {
        let id = self.osx_action_id(c);
        if !seen.insert(id.clone()) {
            return;
        }
        target.push(format!("<action id=\"{id}\">"));
        target.push(when("none", &self.transition(c)));
        target.extend(whens);
        target.push("</action>".to_string());
    }
}
