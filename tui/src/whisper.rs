//! AI whisper: the tinted glass and the "I feel..." box.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use unicode_width::UnicodeWidthChar;

use soulbar_engine::{App, WhisperPhase};

use crate::glass::Glass;
use crate::theme::{Glyphs, Palette, liquid_color, spinner_frame, styles};

const TYPING_FILL: u8 = 30;
const MIXED_FILL: u8 = 80;

pub(crate) fn draw_whisper(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let Some(whisper) = app.whisper() else {
        return;
    };

    let [glass_area, caption_area, input_area] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(2),
        Constraint::Length(5),
    ])
    .areas(area);

    let fill = match whisper.phase {
        WhisperPhase::Idle => 0,
        WhisperPhase::Typing => TYPING_FILL,
        WhisperPhase::Mixing => {
            let progress = app.mix_progress().unwrap_or(0.0);
            TYPING_FILL + ((f32::from(MIXED_FILL - TYPING_FILL) * progress).round() as u8)
        }
    };
    let glass = Glass {
        fill_percent: fill,
        liquid: Some(liquid_color(whisper.tint)),
        pouring: whisper.phase == WhisperPhase::Mixing,
        ..Glass::empty()
    };
    glass.render(frame, glass_area, palette, glyphs);

    let caption = match whisper.phase {
        WhisperPhase::Mixing => vec![
            Line::from(Span::styled(
                format!(
                    "{} Distilling Emotions...",
                    spinner_frame(app.tick_count(), app.ui_options())
                ),
                styles::title(palette),
            )),
            Line::from(Span::styled("Mixing meaning into matter", styles::subtitle(palette))),
        ],
        WhisperPhase::Idle | WhisperPhase::Typing => vec![
            Line::from(Span::styled("THE WHISPER", styles::title(palette))),
            Line::from(Span::styled(
                format!("The glass reads {}", whisper.mood.label().to_lowercase()),
                styles::subtitle(palette),
            )),
        ],
    };
    frame.render_widget(
        Paragraph::new(caption).alignment(Alignment::Center),
        caption_area,
    );

    let editable = whisper.phase != WhisperPhase::Mixing;
    let border = if editable { palette.gold_dim } else { palette.bg_border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    let text = if whisper.input.is_empty() {
        Line::from(Span::styled(
            "I feel...",
            Style::default()
                .fg(palette.text_disabled)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        let style = if editable {
            Style::default().fg(palette.text_primary)
        } else {
            Style::default().fg(palette.text_muted)
        };
        let inner = block.inner(input_area);
        let room = usize::from(inner.width).saturating_mul(usize::from(inner.height.max(1)));
        let shown = visible_tail(whisper.input, room.saturating_sub(1));
        let mut spans = vec![Span::styled(shown.to_string(), style)];
        if editable {
            spans.push(Span::styled("_", Style::default().fg(palette.gold)));
        }
        Line::from(spans)
    };
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false }),
        input_area,
    );
}

/// The longest suffix of `text` that fits in `width` columns.
fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::visible_tail;

    #[test]
    fn tail_keeps_the_end_of_long_input() {
        assert_eq!(visible_tail("hello world", 5), "world");
        assert_eq!(visible_tail("short", 20), "short");
        assert_eq!(visible_tail("", 3), "");
    }

    #[test]
    fn tail_counts_wide_characters() {
        assert_eq!(visible_tail("a日本", 4), "日本");
        assert_eq!(visible_tail("a日本", 3), "本");
    }
}
