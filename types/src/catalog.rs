//! The bar's fixed ingredient shelves.

use crate::HexColor;

/// A base liquid the manual workbench can pour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Base {
    pub name: &'static str,
    pub color: HexColor,
    /// The feeling this base is meant to evoke.
    pub mood: &'static str,
}

/// A garnish the manual workbench can float on the drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Accent {
    pub name: &'static str,
    pub glyph: &'static str,
    pub ascii_glyph: &'static str,
}

pub const BASES: [Base; 5] = [
    Base {
        name: "Deep Blue",
        color: HexColor::from_rgb(0x1e, 0x3a, 0x8a),
        mood: "Calm",
    },
    Base {
        name: "Fiery Red",
        color: HexColor::from_rgb(0xb9, 0x1c, 0x1c),
        mood: "Release",
    },
    Base {
        name: "Soft Pink",
        color: HexColor::from_rgb(0xfb, 0xcf, 0xe8),
        mood: "Soothe",
    },
    Base {
        name: "Forest Green",
        color: HexColor::from_rgb(0x14, 0x53, 0x2d),
        mood: "Growth",
    },
    Base {
        name: "Midnight Violet",
        color: HexColor::from_rgb(0x58, 0x1c, 0x87),
        mood: "Mystery",
    },
];

pub const ACCENTS: [Accent; 4] = [
    Accent {
        name: "Sharp Ice",
        glyph: "❄",
        ascii_glyph: "*",
    },
    Accent {
        name: "Rosemary",
        glyph: "♣",
        ascii_glyph: "&",
    },
    Accent {
        name: "Gold Leaf",
        glyph: "✦",
        ascii_glyph: "+",
    },
    Accent {
        name: "Bitters",
        glyph: "●",
        ascii_glyph: "o",
    },
];

impl Base {
    /// Case-insensitive lookup by display name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        BASES
            .iter()
            .copied()
            .find(|base| base.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Accent {
    /// Case-insensitive lookup by display name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        ACCENTS
            .iter()
            .copied()
            .find(|accent| accent.name.eq_ignore_ascii_case(name.trim()))
    }
}
