//! Manual workbench: shelf, glass and stir gauge.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use soulbar_engine::{ACCENTS, App, BASES, Workbench, WorkbenchStage};

use crate::gauge_bar;
use crate::glass::Glass;
use crate::theme::{Glyphs, Palette, liquid_color, spinner_frame, styles};

const STIR_GAUGE_WIDTH: usize = 20;

pub(crate) fn draw_workbench(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let Some(bench) = app.workbench() else {
        return;
    };

    let [title_area, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(4)]).areas(area);
    let title = vec![
        Line::from(Span::styled(
            format!("STEP {} / 3", bench.step()),
            styles::subtitle(palette),
        )),
        Line::from(Span::styled(bench.title(), styles::title(palette))),
    ];
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);

    let [shelf_area, glass_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body);

    draw_shelf(frame, bench, shelf_area, palette, glyphs);

    let [glass_box, footer] =
        Layout::vertical([Constraint::Min(4), Constraint::Length(2)]).areas(glass_area);
    let elapsed_ms = app.tick_count() as u128 * 100;
    Glass::from_params(&bench.glass(), elapsed_ms, app.ui_options(), glyphs)
        .render(frame, glass_box, palette, glyphs);

    let footer_lines = footer_lines(app, bench, palette, glyphs);
    frame.render_widget(
        Paragraph::new(footer_lines).alignment(Alignment::Center),
        footer,
    );
}

fn footer_lines(
    app: &App,
    bench: &Workbench,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'static>> {
    if app.is_processing() {
        return vec![Line::from(Span::styled(
            format!(
                "{} Analyzing...",
                spinner_frame(app.tick_count(), app.ui_options())
            ),
            styles::title(palette),
        ))];
    }
    if let Some(progress) = bench.pour_progress() {
        return vec![Line::from(Span::styled(
            format!("Pouring {}", gauge_bar(progress, 10, glyphs)),
            Style::default().fg(palette.text_secondary),
        ))];
    }
    match bench.stage() {
        WorkbenchStage::Stir(draft) => {
            let level = draft.stir_level();
            let ready = bench.can_finish();
            vec![
                Line::from(vec![
                    Span::styled("Stir ", styles::key_hint(palette)),
                    Span::styled(
                        gauge_bar(f32::from(level.value()) / 100.0, STIR_GAUGE_WIDTH, glyphs),
                        Style::default().fg(palette.gold),
                    ),
                    Span::styled(format!(" {}%", level.value()), styles::key_hint(palette)),
                ]),
                Line::from(Span::styled(
                    if ready { "Serve Drink" } else { "Stir to fuse" },
                    if ready {
                        styles::key_highlight(palette)
                    } else {
                        styles::key_hint(palette)
                    },
                )),
            ]
        }
        WorkbenchStage::Accents(_) => vec![Line::from(Span::styled(
            "Prepare to Stir",
            styles::key_highlight(palette),
        ))],
        WorkbenchStage::SelectBase | WorkbenchStage::Pouring { .. } => Vec::new(),
    }
}

fn draw_shelf(frame: &mut Frame, bench: &Workbench, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));

    let cursor = bench.cursor();
    let marker = |i: usize| if i == cursor { glyphs.selected } else { " " };
    let lines: Vec<Line> = match bench.stage() {
        WorkbenchStage::SelectBase | WorkbenchStage::Pouring { .. } => BASES
            .iter()
            .enumerate()
            .map(|(i, base)| {
                let style = if i == cursor && !bench.is_pouring() {
                    styles::selected(palette)
                } else {
                    Style::default().fg(palette.text_primary)
                };
                Line::from(vec![
                    Span::raw(format!("{} ", marker(i))),
                    Span::styled(
                        glyphs.liquid.repeat(2),
                        Style::default().fg(liquid_color(base.color)),
                    ),
                    Span::raw(" "),
                    Span::styled(base.name, style),
                    Span::styled(format!("  {}", base.mood), styles::key_hint(palette)),
                ])
            })
            .collect(),
        WorkbenchStage::Accents(draft) => ACCENTS
            .iter()
            .enumerate()
            .map(|(i, accent)| {
                let chosen = draft.accents().contains(accent);
                let style = if i == cursor {
                    styles::selected(palette)
                } else {
                    Style::default().fg(palette.text_primary)
                };
                Line::from(vec![
                    Span::raw(format!("{} ", marker(i))),
                    Span::styled(
                        if chosen { glyphs.checked } else { glyphs.unchecked },
                        Style::default().fg(palette.gold),
                    ),
                    Span::raw(" "),
                    Span::styled(accent.name, style),
                ])
            })
            .collect(),
        WorkbenchStage::Stir(draft) => {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    glyphs.liquid.repeat(2),
                    Style::default().fg(liquid_color(draft.base().color)),
                ),
                Span::raw(" "),
                Span::styled(draft.base().name, Style::default().fg(palette.text_primary)),
            ])];
            lines.extend(draft.accents().names().map(|name| {
                Line::from(Span::styled(
                    format!("{} {name}", glyphs.bullet),
                    Style::default().fg(palette.text_secondary),
                ))
            }));
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
