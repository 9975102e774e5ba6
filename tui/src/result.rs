//! Result: the drink, its receipt and the closing quote.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use soulbar_engine::{App, CLOSING_QUOTE, ReceiptCard};

use crate::glass::Glass;
use crate::theme::{Glyphs, Palette, liquid_color, styles};

pub(crate) fn draw_result(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (Some(artifact), Some(sip)) = (app.current_artifact(), app.sip_gauge()) else {
        return;
    };

    let [drink_area, receipt_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let [glass_area, caption_area] =
        Layout::vertical([Constraint::Min(4), Constraint::Length(2)]).areas(drink_area);
    Glass {
        fill_percent: sip.level(),
        liquid: Some(liquid_color(artifact.color())),
        ..Glass::empty()
    }
    .render(frame, glass_area, palette, glyphs);

    let caption = if app.quote_revealed() {
        Line::from(Span::styled(
            CLOSING_QUOTE,
            Style::default()
                .fg(palette.gold)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled("TAP TO DRINK", styles::key_hint(palette)))
    };
    frame.render_widget(
        Paragraph::new(caption)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        caption_area,
    );

    draw_receipt(frame, &ReceiptCard::from_artifact(artifact), receipt_area, palette, glyphs);
}

fn draw_receipt(
    frame: &mut Frame,
    card: &ReceiptCard,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(palette.bg_border))
        .padding(Padding::horizontal(2))
        .style(Style::default().bg(palette.bg_panel));

    let paper = Style::default().fg(palette.text_primary);
    let muted = styles::key_hint(palette);
    let mut lines = vec![
        Line::from(Span::styled(ReceiptCard::TITLE.to_uppercase(), muted)),
        Line::from(vec![
            Span::styled(
                format!("{} ", glyphs.liquid),
                Style::default().fg(liquid_color(card.color)),
            ),
            Span::styled(card.name.clone(), styles::title(palette)),
        ]),
        Line::from(Span::styled(card.timestamp.clone(), muted)),
        Line::default(),
    ];
    lines.extend(
        card.ingredients
            .iter()
            .map(|i| Line::from(Span::styled(format!("{} {i}", glyphs.bullet), paper))),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        card.analysis.clone(),
        Style::default()
            .fg(palette.text_secondary)
            .add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Mood ", muted),
        Span::styled(format!("{} ({})", card.mood, card.mode), paper),
    ]));
    lines.push(Line::from(vec![
        Span::styled("SPIRIT LIFT ", muted),
        Span::styled(format!("{}%", card.positivity), styles::key_highlight(palette)),
    ]));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
