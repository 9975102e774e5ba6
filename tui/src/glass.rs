//! Text-mode glass shared by the whisper, workbench and result views.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use soulbar_types::GlassParams;
use soulbar_types::ui::UiOptions;

use crate::theme::{Glyphs, Palette, liquid_color};

const GLASS_WIDTH: u16 = 16;
const GLASS_HEIGHT: u16 = 10;
/// Narrowest interior; the pour stream and spoon need a middle column.
const MIN_INTERIOR_WIDTH: u16 = 3;
const MIN_INTERIOR_HEIGHT: u16 = 2;

/// A garnish glyph at a position given in percent of the glass interior.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Garnish {
    pub glyph: &'static str,
    pub left_percent: u8,
    pub top_percent: u8,
}

#[derive(Debug, Clone)]
pub(crate) struct Glass {
    pub fill_percent: u8,
    pub liquid: Option<ratatui::style::Color>,
    /// Dims the liquid while it is being stirred.
    pub hazy: bool,
    pub pouring: bool,
    pub spoon: Option<&'static str>,
    pub garnishes: Vec<Garnish>,
}

impl Glass {
    pub(crate) fn empty() -> Self {
        Self {
            fill_percent: 0,
            liquid: None,
            hazy: false,
            pouring: false,
            spoon: None,
            garnishes: Vec::new(),
        }
    }

    /// The workbench glass. The spoon turns once per spin period.
    pub(crate) fn from_params(
        params: &GlassParams,
        elapsed_ms: u128,
        options: UiOptions,
        glyphs: &Glyphs,
    ) -> Self {
        let spoon = params.spin_period.map(|period| {
            let frames = glyphs.spoon_frames;
            if options.reduced_motion || period.is_zero() {
                return frames[0];
            }
            let step = period.as_millis() / frames.len() as u128;
            let index = (elapsed_ms / step.max(1)) as usize % frames.len();
            frames[index]
        });
        Self {
            fill_percent: params.fill_percent,
            liquid: params
                .liquid
                .map(|color| liquid_color(color.rotate_hue(params.hue_rotate_deg))),
            hazy: params.blur_px > 0.0,
            pouring: params.pouring,
            spoon,
            garnishes: params
                .garnishes
                .iter()
                .map(|g| Garnish {
                    glyph: if options.ascii_only {
                        g.accent.ascii_glyph
                    } else {
                        g.accent.glyph
                    },
                    left_percent: g.left_percent,
                    top_percent: g.top_percent,
                })
                .collect(),
        }
    }

    /// Rows of the glass, top to bottom, including the floor.
    pub(crate) fn lines(
        &self,
        width: u16,
        height: u16,
        palette: &Palette,
        glyphs: &Glyphs,
    ) -> Vec<Line<'static>> {
        let w = usize::from(width.max(MIN_INTERIOR_WIDTH));
        let h = usize::from(height.max(MIN_INTERIOR_HEIGHT));
        let liquid_rows = (usize::from(self.fill_percent.min(100)) * h + 50) / 100;
        let wall_style = Style::default().fg(palette.bg_border);
        let mut liquid_style = Style::default().fg(self.liquid.unwrap_or(palette.text_disabled));
        if self.hazy {
            liquid_style = liquid_style.add_modifier(Modifier::DIM);
        }
        let garnish_style = Style::default()
            .fg(palette.gold)
            .add_modifier(Modifier::BOLD);

        let mut grid: Vec<Vec<(&'static str, Style)>> = (0..h)
            .map(|row| {
                let wet = row >= h - liquid_rows;
                (0..w)
                    .map(|_| {
                        if wet {
                            (glyphs.liquid, liquid_style)
                        } else {
                            (" ", Style::default())
                        }
                    })
                    .collect()
            })
            .collect();

        if self.pouring {
            for row in grid.iter_mut().take(h - liquid_rows) {
                row[w / 2] = (glyphs.pour, liquid_style);
            }
        }
        if let Some(spoon) = self.spoon {
            grid[0][w / 2] = (spoon, Style::default().fg(palette.text_secondary));
        }
        for garnish in &self.garnishes {
            let col = usize::from(garnish.left_percent.min(100)) * (w - 1) / 100;
            let row = usize::from(garnish.top_percent.min(100)) * (h - 1) / 100;
            grid[row][col] = (garnish.glyph, garnish_style);
        }

        let mut lines: Vec<Line<'static>> = grid
            .into_iter()
            .map(|row| {
                let mut spans = Vec::with_capacity(w + 2);
                spans.push(Span::styled(glyphs.wall, wall_style));
                spans.extend(row.into_iter().map(|(g, s)| Span::styled(g, s)));
                spans.push(Span::styled(glyphs.wall, wall_style));
                Line::from(spans)
            })
            .collect();
        lines.push(Line::from(vec![
            Span::styled(glyphs.bottom_left, wall_style),
            Span::styled(glyphs.floor.repeat(w), wall_style),
            Span::styled(glyphs.bottom_right, wall_style),
        ]));
        lines
    }

    /// Draws the glass centered in `area`.
    pub(crate) fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
        let height = GLASS_HEIGHT
            .min(area.height.saturating_sub(1))
            .max(MIN_INTERIOR_HEIGHT);
        let width = GLASS_WIDTH
            .min(area.width.saturating_sub(2))
            .max(MIN_INTERIOR_WIDTH);
        let lines = self.lines(width, height, palette, glyphs);
        let top = area.y + area.height.saturating_sub(height + 1) / 2;
        let target = Rect {
            x: area.x,
            y: top,
            width: area.width,
            height: (height + 1).min(area.height),
        };
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), target);
    }
}
