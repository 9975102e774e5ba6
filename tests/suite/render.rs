//! Full-frame renders of each view on a test backend

use std::time::Duration;

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use soulbar_engine::{App, AppSettings, CLOSING_QUOTE, GenerationClient, HoldSource, HoldTarget, View};
use soulbar_providers::MissingKeyBackend;

use crate::common::{DAWN_HAZE, app_for, mount_gemini_reply, run_until, start_gemini_mock};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 32;

fn offline_app() -> App {
    App::new(GenerationClient::new(MissingKeyBackend), AppSettings::default())
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| soulbar_tui::draw(frame, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn open(app: &mut App, target: HoldTarget) {
    app.hold_press(target, HoldSource::Pointer);
    app.advance(Duration::from_secs(2));
}

#[test]
fn home_shows_both_cards() {
    let screen = render(&offline_app());
    assert!(screen.contains("S O U L   B A R"));
    assert!(screen.contains("Open for the weary"));
    assert!(screen.contains("VENT"));
    assert!(screen.contains("The Whisper"));
    assert!(screen.contains("CRAFT"));
    assert!(screen.contains("The Workbench"));
    assert!(screen.contains("HOLD CARD TO ENTER"));
}

#[test]
fn whisper_shows_placeholder_then_text() {
    let mut app = offline_app();
    open(&mut app, HoldTarget::Vent);
    assert!(render(&app).contains("I feel..."));

    for c in "tired".chars() {
        app.whisper_insert(c);
    }
    let screen = render(&app);
    assert!(screen.contains("tired_"));
    assert!(!screen.contains("I feel..."));
}

#[test]
fn workbench_lists_bases_then_accents() {
    let mut app = offline_app();
    open(&mut app, HoldTarget::Craft);
    let screen = render(&app);
    assert!(screen.contains("STEP 1 / 3"));
    assert!(screen.contains("CHOOSE YOUR BASE"));
    assert!(screen.contains("Midnight Violet"));
}

#[tokio::test]
async fn result_and_cellar_show_the_drink() {
    let server = start_gemini_mock().await;
    mount_gemini_reply(&server, DAWN_HAZE).await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_for(&server, dir.path());

    open(&mut app, HoldTarget::Vent);
    app.whisper_insert('x');
    app.whisper_submit();
    run_until(&mut app, |app| app.view() == View::Result).await;

    let screen = render(&app);
    assert!(screen.contains("MOOD PRESCRIPTION RECEIPT"));
    assert!(screen.contains("Dawn Haze"));
    assert!(screen.contains("SPIRIT LIFT 64%"));
    assert!(screen.contains("TAP TO DRINK"));

    for _ in 0..5 {
        app.sip();
    }
    assert!(render(&app).contains(CLOSING_QUOTE));

    app.open_cellar();
    let screen = render(&app);
    assert!(screen.contains("The Cellar"));
    assert!(screen.contains("Dawn Haze"));
    assert!(!screen.contains("Emotional Trajectory"));
}
