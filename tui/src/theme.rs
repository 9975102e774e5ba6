//! Color theme and glyphs for the Soul Bar TUI.
//!
//! A warm stone-and-brass palette by default, with an optional high-contrast
//! override.

use ratatui::style::{Color, Modifier, Style};

use soulbar_types::HexColor;
use soulbar_types::ui::UiOptions;

/// Bar palette constants.
mod colors {
    use super::Color;

    // === Backgrounds (stone) ===
    pub const BG_DARK: Color = Color::Rgb(28, 25, 23); // stone-900
    pub const BG_PANEL: Color = Color::Rgb(41, 37, 36); // stone-800
    pub const BG_HIGHLIGHT: Color = Color::Rgb(68, 64, 60); // stone-700
    pub const BG_BORDER: Color = Color::Rgb(87, 83, 78); // stone-600

    // === Foregrounds (paper) ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(227, 213, 198); // receipt paper
    pub const TEXT_SECONDARY: Color = Color::Rgb(214, 211, 209); // stone-300
    pub const TEXT_MUTED: Color = Color::Rgb(168, 162, 158); // stone-400
    pub const TEXT_DISABLED: Color = Color::Rgb(120, 113, 108); // stone-500

    // === Brass ===
    pub const GOLD: Color = Color::Rgb(197, 160, 89);
    pub const GOLD_DIM: Color = Color::Rgb(138, 112, 62);

    // === Semantic ===
    pub const SUCCESS: Color = Color::Rgb(134, 239, 172);
    pub const ERROR: Color = Color::Rgb(248, 113, 113);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub gold: Color,
    pub gold_dim: Color,
    pub success: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            text_disabled: colors::TEXT_DISABLED,
            gold: colors::GOLD,
            gold_dim: colors::GOLD_DIM,
            success: colors::SUCCESS,
            error: colors::ERROR,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            text_disabled: Color::DarkGray,
            gold: Color::Yellow,
            gold_dim: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// Terminal color for a drink or base color.
#[must_use]
pub fn liquid_color(color: HexColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// ASCII/Unicode glyphs for the glass, gauges and spinners.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub wall: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub floor: &'static str,
    pub liquid: &'static str,
    pub pour: &'static str,
    pub gauge_full: &'static str,
    pub gauge_empty: &'static str,
    pub bullet: &'static str,
    pub selected: &'static str,
    pub checked: &'static str,
    pub unchecked: &'static str,
    pub bottle: &'static str,
    pub spinner_frames: &'static [&'static str],
    pub spoon_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];
const SPOON_FRAMES: &[&str] = &["╲", "│", "╱", "─"];
const SPOON_FRAMES_ASCII: &[&str] = &["\\", "|", "/", "-"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            wall: "|",
            bottom_left: "\\",
            bottom_right: "/",
            floor: "_",
            liquid: "#",
            pour: ":",
            gauge_full: "#",
            gauge_empty: ".",
            bullet: "*",
            selected: ">",
            checked: "[x]",
            unchecked: "[ ]",
            bottle: "U",
            spinner_frames: SPINNER_FRAMES_ASCII,
            spoon_frames: SPOON_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            wall: "│",
            bottom_left: "╰",
            bottom_right: "╯",
            floor: "─",
            liquid: "█",
            pour: "┊",
            gauge_full: "█",
            gauge_empty: "░",
            bullet: "•",
            selected: "▸",
            checked: "◉",
            unchecked: "○",
            bottle: "▮",
            spinner_frames: SPINNER_FRAMES,
            spoon_frames: SPOON_FRAMES,
        }
    }
}

/// When `reduced_motion` is enabled, returns a static glyph instead of cycling.
#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[tick % frames.len()]
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.gold)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_muted)
            .add_modifier(Modifier::ITALIC)
    }

    #[must_use]
    pub fn highlighted_row(palette: &Palette) -> Style {
        Style::default()
            .bg(palette.bg_highlight)
            .fg(palette.gold)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn selected(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.gold)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.gold)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;
    use soulbar_types::HexColor;
    use soulbar_types::ui::UiOptions;

    use super::{glyphs, liquid_color, spinner_frame};

    #[test]
    fn spinner_frame_cycles_without_reduced_motion() {
        let options = UiOptions::default();
        let frame0 = spinner_frame(0, options);
        let frame1 = spinner_frame(1, options);
        assert_ne!(frame0, frame1, "spinner should cycle through frames");
    }

    #[test]
    fn spinner_frame_static_with_reduced_motion() {
        let options = UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        };
        let frame0 = spinner_frame(0, options);
        let frame1 = spinner_frame(1, options);
        let frame100 = spinner_frame(100, options);
        assert_eq!(
            frame0, frame1,
            "spinner should be static with reduced_motion"
        );
        assert_eq!(frame0, frame100, "spinner should remain static at any tick");
    }

    #[test]
    fn ascii_glyphs_are_ascii() {
        let g = glyphs(UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        });
        for glyph in [
            g.wall,
            g.bottom_left,
            g.bottom_right,
            g.floor,
            g.liquid,
            g.pour,
            g.gauge_full,
            g.gauge_empty,
            g.bullet,
            g.selected,
            g.checked,
            g.unchecked,
            g.bottle,
        ] {
            assert!(glyph.is_ascii(), "{glyph:?} is not ASCII");
        }
        assert!(g.spinner_frames.iter().all(|f| f.is_ascii()));
        assert!(g.spoon_frames.iter().all(|f| f.is_ascii()));
    }

    #[test]
    fn liquid_color_maps_rgb() {
        assert_eq!(
            liquid_color(HexColor::from_rgb(0x1e, 0x3a, 0x8a)),
            Color::Rgb(0x1e, 0x3a, 0x8a)
        );
    }
}
