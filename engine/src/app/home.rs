//! Home view: press-and-hold on the Vent and Craft cards.

use std::time::Duration;

use soulbar_types::{HoldAccumulator, HoldTarget};

use super::{App, HomeState, Screen};

/// Terminals without key release reporting end a key hold once repeats stop
/// for this long.
pub(crate) const KEY_HOLD_GRACE: Duration = Duration::from_millis(700);

/// What is driving a hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldSource {
    /// Mouse press and release; the release is always reported.
    Pointer,
    /// Key press and repeat; the release may never arrive.
    Key,
}

impl HomeState {
    pub(super) fn new(tick: Duration) -> Self {
        Self {
            hold: HoldAccumulator::new(tick),
            key_idle: None,
        }
    }

    pub(super) fn advance(&mut self, elapsed: Duration) -> Option<HoldTarget> {
        if let Some(idle) = &mut self.key_idle {
            *idle = idle.saturating_add(elapsed);
            if *idle >= KEY_HOLD_GRACE {
                self.key_idle = None;
                self.hold.release();
                return None;
            }
        }
        self.hold.advance(elapsed)
    }

    pub(super) fn source(&self) -> HoldSource {
        if self.key_idle.is_some() {
            HoldSource::Key
        } else {
            HoldSource::Pointer
        }
    }
}

impl App {
    /// The hold accumulator while home is showing.
    #[must_use]
    pub fn home_hold(&self) -> Option<&HoldAccumulator> {
        match &self.screen {
            Screen::Home(state) => Some(&state.hold),
            _ => None,
        }
    }

    /// Starts or continues holding `target`. Key repeats count as presses.
    pub fn hold_press(&mut self, target: HoldTarget, source: HoldSource) {
        let Screen::Home(state) = &mut self.screen else {
            return;
        };
        state.hold.press(target);
        state.key_idle = match source {
            HoldSource::Key => Some(Duration::ZERO),
            HoldSource::Pointer => None,
        };
    }

    /// Opens the card a completed hold was on. A key-driven hold leaves its
    /// repeats to be swallowed by the whisper.
    pub(super) fn open_held(&mut self, target: HoldTarget, source: HoldSource) {
        self.navigate(target.destination());
        if source == HoldSource::Key
            && let Screen::Whisper(state) = &mut self.screen
        {
            state.key_echo = Some(Duration::ZERO);
        }
    }

    /// Ends the hold. Progress is lost unless the hold already completed.
    pub fn hold_release(&mut self) {
        if let Screen::Home(state) = &mut self.screen {
            state.key_idle = None;
            state.hold.release();
        }
    }
}
