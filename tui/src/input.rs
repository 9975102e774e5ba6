//! Input handling for the Soul Bar TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Margin, Position, Rect};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use soulbar_engine::{App, HoldSource, HoldTarget, View, WorkbenchStage};

use crate::FRAME_MARGIN;
use crate::home::card_areas;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering
const FALLBACK_WIDTH: u16 = 80;

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
    width: u16,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        let width = crossterm::terminal::size().map_or(FALLBACK_WIDTH, |(w, _)| w);
        Self {
            rx,
            stop,
            join: Some(join),
            width,
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a send blocked on capacity returns.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    // Bounded queue: apply backpressure instead of dropping events.
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drains pending input into the app. Returns `true` once the app wants to quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if let Event::Resize(width, _) = ev {
            input.width = width;
        }
        if apply_event(app, &ev, input.width) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Applies one terminal event. `width` is the terminal width used for pointer hit-testing.
pub fn apply_event(app: &mut App, event: &Event, width: u16) -> bool {
    match event {
        Event::Key(key) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.request_quit();
                return true;
            }

            if matches!(key.kind, KeyEventKind::Release) {
                // Only the home cards care about releases.
                if app.view() == View::Home && hold_key(key).is_some() {
                    app.hold_release();
                }
                return app.should_quit();
            }

            match app.view() {
                View::Home => handle_home_key(app, key),
                View::AiWhisper => handle_whisper_key(app, key),
                View::ManualWorkbench => handle_workbench_key(app, key),
                View::Result => handle_result_key(app, key),
                View::Cellar => handle_cellar_key(app, key),
            }
        }
        Event::Mouse(mouse) => handle_mouse(app, mouse, width),
        Event::Paste(text) => {
            if app.view() == View::AiWhisper {
                for c in text.chars() {
                    app.whisper_insert(if c == '\n' || c == '\r' { ' ' } else { c });
                }
            }
        }
        _ => {}
    }
    app.should_quit()
}

fn hold_key(key: &KeyEvent) -> Option<HoldTarget> {
    match key.code {
        KeyCode::Char('v' | 'V') => Some(HoldTarget::Vent),
        KeyCode::Char('c' | 'C') => Some(HoldTarget::Craft),
        _ => None,
    }
}

fn handle_home_key(app: &mut App, key: &KeyEvent) {
    if let Some(target) = hold_key(key) {
        app.hold_press(target, HoldSource::Key);
        return;
    }
    if matches!(key.code, KeyCode::Char('q')) {
        app.request_quit();
    } else if key.code == KeyCode::Esc {
        app.dismiss_notice();
    }
}

fn handle_whisper_key(app: &mut App, key: &KeyEvent) {
    // Repeats of the key that held the Vent card open would otherwise land in the box.
    // Without event-type reporting they arrive as plain presses.
    if matches!(key.kind, KeyEventKind::Repeat) {
        return;
    }
    if hold_key(key) == Some(HoldTarget::Vent) && app.whisper_swallow_hold_key() {
        return;
    }
    match key.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Enter => app.whisper_submit(),
        KeyCode::Backspace => app.whisper_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => app.whisper_insert(c),
        _ => {}
    }
}

fn handle_workbench_key(app: &mut App, key: &KeyEvent) {
    if key.code == KeyCode::Esc {
        app.cancel();
        return;
    }

    let stirring = matches!(
        app.workbench().map(soulbar_engine::Workbench::stage),
        Some(WorkbenchStage::Stir(_))
    );
    let outcome = if stirring {
        match key.code {
            KeyCode::Char(' ' | 's') => app.stir().map(|_| ()),
            KeyCode::Enter | KeyCode::Char('f') => app.finish_craft(),
            _ => Ok(()),
        }
    } else {
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => {
                app.move_shelf_cursor(-1);
                Ok(())
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j') => {
                app.move_shelf_cursor(1);
                Ok(())
            }
            KeyCode::Enter | KeyCode::Char(' ') => app.select_on_shelf(),
            KeyCode::Tab | KeyCode::Char('n') => app.advance_to_stir(),
            _ => Ok(()),
        }
    };
    if let Err(rejection) = outcome {
        debug!(?rejection, code = ?key.code, "Workbench key ignored");
    }
}

fn handle_result_key(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.sip();
        }
        KeyCode::Char('s') => {
            // The outcome is surfaced as a notice.
            let _ = app.export_receipt();
        }
        KeyCode::Char('c') => app.open_cellar(),
        KeyCode::Esc => app.cancel(),
        _ => {}
    }
}

fn handle_cellar_key(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k' | 'h') => app.move_cellar_cursor(-1),
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j' | 'l') => app.move_cellar_cursor(1),
        KeyCode::Enter => app.open_highlighted(),
        KeyCode::Char('n') => app.new_mix(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Char('q') => app.request_quit(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: &MouseEvent, width: u16) {
    match app.view() {
        View::Home => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(target) = card_at(mouse.column, width) {
                    app.hold_press(target, HoldSource::Pointer);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => app.hold_release(),
            _ => {}
        },
        View::Result => {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                app.sip();
            }
        }
        View::AiWhisper | View::ManualWorkbench | View::Cellar => {}
    }
}

/// The card under `column`, or `None` on the frame margin.
fn card_at(column: u16, width: u16) -> Option<HoldTarget> {
    let home = Rect::new(0, 0, width, 1).inner(Margin::new(FRAME_MARGIN, 0));
    let [vent, craft] = card_areas(home);
    let point = Position::new(column, 0);
    if vent.contains(point) {
        Some(HoldTarget::Vent)
    } else if craft.contains(point) {
        Some(HoldTarget::Craft)
    } else {
        None
    }
}
