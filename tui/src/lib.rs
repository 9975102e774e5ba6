//! TUI rendering for Soul Bar using ratatui.

mod cellar;
mod glass;
mod home;
mod input;
mod result;
mod theme;
mod whisper;
mod workbench;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, liquid_color, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use soulbar_engine::{App, NoticeLevel, View, WorkbenchStage};

/// Blank border around every view. Pointer hit-testing skips it too.
pub(crate) const FRAME_MARGIN: u16 = 1;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(FRAME_MARGIN)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // View
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0], &palette);
    match app.view() {
        View::Home => home::draw_home(frame, app, chunks[1], &palette, &glyphs),
        View::AiWhisper => whisper::draw_whisper(frame, app, chunks[1], &palette, &glyphs),
        View::ManualWorkbench => {
            workbench::draw_workbench(frame, app, chunks[1], &palette, &glyphs);
        }
        View::Result => result::draw_result(frame, app, chunks[1], &palette, &glyphs),
        View::Cellar => cellar::draw_cellar(frame, app, chunks[1], &palette, &glyphs),
    }
    draw_status_bar(frame, app, chunks[2], &palette);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let subtitle = match app.view() {
        View::Home => "Open for the weary",
        View::AiWhisper => "The Whisper",
        View::ManualWorkbench => "The Workbench",
        View::Result => "Mood Elixir",
        View::Cellar => "The Cellar",
    };
    let lines = vec![
        Line::from(Span::styled("S O U L   B A R", styles::title(palette))),
        Line::from(Span::styled(subtitle, styles::subtitle(palette))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Key hints for the active view.
fn key_hints(app: &App) -> &'static [(&'static str, &'static str)] {
    match app.view() {
        View::Home => &[("hold v", "vent"), ("hold c", "craft"), ("q", "quit")],
        View::AiWhisper => &[("enter", "serve"), ("esc", "back")],
        View::ManualWorkbench => match app.workbench().map(soulbar_engine::Workbench::stage) {
            Some(WorkbenchStage::Accents(_)) => &[
                ("←→", "choose"),
                ("enter", "toggle"),
                ("tab", "to stirring"),
                ("esc", "back"),
            ],
            Some(WorkbenchStage::Stir(_)) => {
                &[("space", "stir"), ("enter", "serve"), ("esc", "back")]
            }
            _ => &[("←→", "choose"), ("enter", "pour"), ("esc", "back")],
        },
        View::Result => &[("space", "drink"), ("s", "save receipt"), ("c", "cellar")],
        View::Cellar => &[
            ("←→", "browse"),
            ("enter", "open"),
            ("n", "new mix"),
            ("q", "quit"),
        ],
    }
}

pub(crate) fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let line = if let Some(notice) = app.notice() {
        let color = match notice.level() {
            NoticeLevel::Error => palette.error,
            NoticeLevel::Info => palette.success,
        };
        Line::from(Span::styled(notice.text().to_string(), Style::default().fg(color)))
    } else if app.is_processing() {
        let spinner = spinner_frame(app.tick_count(), app.ui_options());
        Line::from(Span::styled(
            format!("{spinner} Mixing..."),
            Style::default().fg(palette.gold),
        ))
    } else {
        let mut spans = Vec::new();
        for (i, (key, action)) in key_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", styles::key_hint(palette)));
            }
            spans.push(Span::styled(*key, styles::key_highlight(palette)));
            spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// `[#####.....]`-style bar of `width` cells for a `[0.0, 1.0]` ratio.
pub(crate) fn gauge_bar(ratio: f32, width: usize, glyphs: &Glyphs) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!(
        "{}{}",
        glyphs.gauge_full.repeat(filled),
        glyphs.gauge_empty.repeat(width - filled)
    )
}
