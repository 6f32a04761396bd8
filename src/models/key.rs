//! Physical key identifiers.
//!
//! Keys are named after their XKB position codes (`ae01` is the `1` key of a
//! QWERTY keyboard, `ad01` the `Q` key, ...). The set is fixed and shared by
//! every geometry and every layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical name of a physical key position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyId {
    /// QWERTY `1` key
    Ae01,
    /// QWERTY `2` key
    Ae02,
    /// QWERTY `3` key
    Ae03,
    /// QWERTY `4` key
    Ae04,
    /// QWERTY `5` key
    Ae05,
    /// QWERTY `6` key
    Ae06,
    /// QWERTY `7` key
    Ae07,
    /// QWERTY `8` key
    Ae08,
    /// QWERTY `9` key
    Ae09,
    /// QWERTY `0` key
    Ae10,
    /// QWERTY `Q` key
    Ad01,
    /// QWERTY `W` key
    Ad02,
    /// QWERTY `E` key
    Ad03,
    /// QWERTY `R` key
    Ad04,
    /// QWERTY `T` key
    Ad05,
    /// QWERTY `Y` key
    Ad06,
    /// QWERTY `U` key
    Ad07,
    /// QWERTY `I` key
    Ad08,
    /// QWERTY `O` key
    Ad09,
    /// QWERTY `P` key
    Ad10,
    /// QWERTY `A` key
    Ac01,
    /// QWERTY `S` key
    Ac02,
    /// QWERTY `D` key
    Ac03,
    /// QWERTY `F` key
    Ac04,
    /// QWERTY `G` key
    Ac05,
    /// QWERTY `H` key
    Ac06,
    /// QWERTY `J` key
    Ac07,
    /// QWERTY `K` key
    Ac08,
    /// QWERTY `L` key
    Ac09,
    /// QWERTY `;` key
    Ac10,
    /// QWERTY `Z` key
    Ab01,
    /// QWERTY `X` key
    Ab02,
    /// QWERTY `C` key
    Ab03,
    /// QWERTY `V` key
    Ab04,
    /// QWERTY `B` key
    Ab05,
    /// QWERTY `N` key
    Ab06,
    /// QWERTY `M` key
    Ab07,
    /// QWERTY `,` key
    Ab08,
    /// QWERTY `.` key
    Ab09,
    /// QWERTY `/` key
    Ab10,
    /// QWERTY `` ` `` key
    Tlde,
    /// QWERTY `-` key
    Ae11,
    /// QWERTY `=` key
    Ae12,
    /// QWERTY `[` key
    Ad11,
    /// QWERTY `]` key
    Ad12,
    /// QWERTY `'` key
    Ac11,
    /// QWERTY `\` key
    Bksl,
    /// ISO key between left shift and `Z`
    Lsgt,
}

/// A titled group of keys, in export order.
#[derive(Debug, Clone, Copy)]
pub struct KeySection {
    /// Human-readable section title, printed as a comment by exporters
    pub title: &'static str,
    /// Keys of the section, left to right
    pub keys: &'static [KeyId],
}

/// Canonical export order: every exporter walks these sections in sequence.
pub const KEY_SECTIONS: [KeySection; 5] = [
    KeySection {
        title: "Digits",
        keys: &[
            KeyId::Ae01,
            KeyId::Ae02,
            KeyId::Ae03,
            KeyId::Ae04,
            KeyId::Ae05,
            KeyId::Ae06,
            KeyId::Ae07,
            KeyId::Ae08,
            KeyId::Ae09,
            KeyId::Ae10,
        ],
    },
    KeySection {
        title: "Letters, first row",
        keys: &[
            KeyId::Ad01,
            KeyId::Ad02,
            KeyId::Ad03,
            KeyId::Ad04,
            KeyId::Ad05,
            KeyId::Ad06,
            KeyId::Ad07,
            KeyId::Ad08,
            KeyId::Ad09,
            KeyId::Ad10,
        ],
    },
    KeySection {
        title: "Letters, second row",
        keys: &[
            KeyId::Ac01,
            KeyId::Ac02,
            KeyId::Ac03,
            KeyId::Ac04,
            KeyId::Ac05,
            KeyId::Ac06,
            KeyId::Ac07,
            KeyId::Ac08,
            KeyId::Ac09,
            KeyId::Ac10,
        ],
    },
    KeySection {
        title: "Letters, third row",
        keys: &[
            KeyId::Ab01,
            KeyId::Ab02,
            KeyId::Ab03,
            KeyId::Ab04,
            KeyId::Ab05,
            KeyId::Ab06,
            KeyId::Ab07,
            KeyId::Ab08,
            KeyId::Ab09,
            KeyId::Ab10,
        ],
    },
    KeySection {
        title: "Pinky keys",
        keys: &[
            KeyId::Tlde,
            KeyId::Ae11,
            KeyId::Ae12,
            KeyId::Ad11,
            KeyId::Ad12,
            KeyId::Ac11,
            KeyId::Bksl,
            KeyId::Lsgt,
        ],
    },
];

impl KeyId {
    /// All key identifiers in canonical order.
    #[must_use]
    pub fn all() -> impl Iterator<Item = Self> {
        KEY_SECTIONS.iter().flat_map(|section| section.keys.iter().copied())
    }

    /// Position of the key in canonical order (0..48).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase XKB position code (e.g. `ae01`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ae01 => "ae01",
            Self::Ae02 => "ae02",
            Self::Ae03 => "ae03",
            Self::Ae04 => "ae04",
            Self::Ae05 => "ae05",
            Self::Ae06 => "ae06",
            Self::Ae07 => "ae07",
            Self::Ae08 => "ae08",
            Self::Ae09 => "ae09",
            Self::Ae10 => "ae10",
            Self::Ad01 => "ad01",
            Self::Ad02 => "ad02",
            Self::Ad03 => "ad03",
            Self::Ad04 => "ad04",
            Self::Ad05 => "ad05",
            Self::Ad06 => "ad06",
            Self::Ad07 => "ad07",
            Self::Ad08 => "ad08",
            Self::Ad09 => "ad09",
            Self::Ad10 => "ad10",
            Self::Ac01 => "ac01",
            Self::Ac02 => "ac02",
            Self::Ac03 => "ac03",
            Self::Ac04 => "ac04",
            Self::Ac05 => "ac05",
            Self::Ac06 => "ac06",
            Self::Ac07 => "ac07",
            Self::Ac08 => "ac08",
            Self::Ac09 => "ac09",
            Self::Ac10 => "ac10",
            Self::Ab01 => "ab01",
            Self::Ab02 => "ab02",
            Self::Ab03 => "ab03",
            Self::Ab04 => "ab04",
            Self::Ab05 => "ab05",
            Self::Ab06 => "ab06",
            Self::Ab07 => "ab07",
            Self::Ab08 => "ab08",
            Self::Ab09 => "ab09",
            Self::Ab10 => "ab10",
            Self::Tlde => "tlde",
            Self::Ae11 => "ae11",
            Self::Ae12 => "ae12",
            Self::Ad11 => "ad11",
            Self::Ad12 => "ad12",
            Self::Ac11 => "ac11",
            Self::Bksl => "bksl",
            Self::Lsgt => "lsgt",
        }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::all()
            .find(|key| key.as_str() == lower)
            .ok_or_else(|| format!("Unknown key identifier: {s}"))
    }
}
