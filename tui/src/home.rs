//! Home: the two hold-to-enter cards.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use soulbar_engine::{App, HoldAccumulator, HoldTarget};

use crate::gauge_bar;
use crate::theme::{Glyphs, Palette, styles};

struct Card {
    label: &'static str,
    title: &'static str,
    lines: [&'static str; 2],
    key: &'static str,
}

fn card(target: HoldTarget) -> Card {
    match target {
        HoldTarget::Vent => Card {
            label: "VENT",
            title: "The Whisper",
            lines: ["Entrust your emotions to me.", "Speak to dissolve."],
            key: "V",
        },
        HoldTarget::Craft => Card {
            label: "CRAFT",
            title: "The Workbench",
            lines: ["Mix your current self.", "Craft to clarity."],
            key: "C",
        },
    }
}

/// Splits the home area into the Vent and Craft halves.
///
/// Mouse hit-testing uses the same split.
pub(crate) fn card_areas(area: Rect) -> [Rect; 2] {
    let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    [halves[0], halves[1]]
}

pub(crate) fn draw_home(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let hold = app.home_hold();
    let [vent, craft] = card_areas(area);
    for (target, rect) in [(HoldTarget::Vent, vent), (HoldTarget::Craft, craft)] {
        let progress = hold
            .filter(|h| h.active() == Some(target))
            .map_or(0.0, HoldAccumulator::progress);
        draw_card(frame, rect, &card(target), progress, palette, glyphs);
    }
}

fn draw_card(
    frame: &mut Frame,
    area: Rect,
    card: &Card,
    progress: f32,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let held = progress > 0.0;
    let border = if held { palette.gold } else { palette.bg_border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .padding(Padding::uniform(1))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let gauge_width = usize::from(inner.width.saturating_sub(2)).min(24);
    let mut lines = vec![
        Line::from(Span::styled(card.label, styles::key_hint(palette))),
        Line::from(Span::styled(card.title, styles::title(palette))),
        Line::default(),
    ];
    lines.extend(
        card.lines
            .iter()
            .map(|l| Line::from(Span::styled(*l, Style::default().fg(palette.text_secondary)))),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        gauge_bar(progress, gauge_width, glyphs),
        Style::default().fg(if held { palette.gold } else { palette.text_disabled }),
    )));
    lines.push(Line::from(vec![
        Span::styled("HOLD ", styles::key_hint(palette)),
        Span::styled(card.key, styles::key_highlight(palette)),
        Span::styled(" OR HOLD CARD TO ENTER", styles::key_hint(palette)),
    ]));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
