//! Cellar: mood trend and the shelf of past drinks.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph,
        Sparkline,
    },
};

use soulbar_engine::{App, Cellar};

use crate::gauge_bar;
use crate::theme::{Glyphs, Palette, liquid_color, styles};

/// Bottle fill for a drink that has been finished.
pub(crate) const CONSUMED_FILL: u8 = 10;
/// Bottle fill for a drink still waiting to be drunk.
pub(crate) const FULL_FILL: u8 = 70;

const ASCII_BARS: symbols::bar::Set = symbols::bar::Set {
    full: "#",
    seven_eighths: "#",
    three_quarters: "=",
    five_eighths: "=",
    half: "-",
    three_eighths: "-",
    one_quarter: ".",
    one_eighth: ".",
    empty: " ",
};

pub(crate) fn draw_cellar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let cellar = app.cellar();
    if cellar.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Your cellar is empty. Visit the bar to start your collection.",
                styles::subtitle(palette),
            )))
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let trend_height = if cellar.has_trend() { 6 } else { 0 };
    let [trend_area, shelf_area] = Layout::vertical([
        Constraint::Length(trend_height),
        Constraint::Min(3),
    ])
    .areas(area);

    if cellar.has_trend() {
        let scores: Vec<u64> = cellar
            .scores()
            .iter()
            .map(|s| u64::from(s.value()))
            .collect();
        let bars = if app.ui_options().ascii_only {
            ASCII_BARS
        } else {
            symbols::bar::NINE_LEVELS
        };
        let sparkline = Sparkline::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.bg_border))
                    .title(Span::styled(" Emotional Trajectory ", styles::title(palette))),
            )
            .data(&scores)
            .max(100)
            .bar_set(bars)
            .style(Style::default().fg(palette.gold));
        frame.render_widget(sparkline, trend_area);
    }

    let cursor = app.cellar_cursor().unwrap_or(0);
    draw_shelf(frame, cellar, cursor, shelf_area, palette, glyphs);
}

/// Bottles newest first. The list scrolls to keep `cursor` in view.
fn draw_shelf(
    frame: &mut Frame,
    cellar: &Cellar,
    cursor: usize,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let items: Vec<ListItem> = cellar
        .newest_first()
        .map(|artifact| {
            let fill = if artifact.is_consumed() {
                CONSUMED_FILL
            } else {
                FULL_FILL
            };
            let liquid = Style::default().fg(liquid_color(artifact.color()));
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", glyphs.bottle), liquid),
                Span::styled(gauge_bar(f32::from(fill) / 100.0, 5, glyphs), liquid),
                Span::raw(" "),
                Span::styled(
                    artifact.name().to_string(),
                    Style::default().fg(palette.text_primary),
                ),
                Span::styled(
                    format!("  {} · {}%", artifact.mode().label(), artifact.positivity().value()),
                    styles::key_hint(palette),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.bg_border))
                .title(Span::styled(" The Cellar ", styles::title(palette))),
        )
        .highlight_symbol(format!("{} ", glyphs.selected))
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(styles::highlighted_row(palette));
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}
