//! AI whisper view: free text in, a drink out.

use std::time::Duration;

use soulbar_types::{Craft, HexColor, MoodHint, NonEmptyString};

use super::home::KEY_HOLD_GRACE;
use super::{AI_FAILURE_NOTICE, App, Screen, Settled, WhisperState};
use crate::pending::PendingGeneration;

/// What the whisper glass is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhisperPhase {
    Idle,
    Typing,
    Mixing,
}

/// Read-only view of the whisper state for rendering.
#[derive(Debug, Clone, Copy)]
pub struct WhisperView<'a> {
    pub input: &'a str,
    pub phase: WhisperPhase,
    pub mood: MoodHint,
    pub tint: HexColor,
}

impl WhisperState {
    fn phase(&self) -> WhisperPhase {
        if self.pending.is_some() {
            WhisperPhase::Mixing
        } else if self.input.is_empty() {
            WhisperPhase::Idle
        } else {
            WhisperPhase::Typing
        }
    }

    pub(super) fn settle(&mut self, elapsed: Duration) -> Option<Settled> {
        if let Some(idle) = &mut self.key_echo {
            *idle = idle.saturating_add(elapsed);
            if *idle >= KEY_HOLD_GRACE {
                self.key_echo = None;
            }
        }

        let pending = self.pending.as_mut()?;
        pending.advance(elapsed);
        let outcome = pending.poll()?;
        self.pending = None;

        Some(match outcome {
            Ok(result) => Settled::Served(
                result,
                Craft::Ai {
                    mood: MoodHint::from_text(&self.input).label().to_string(),
                },
            ),
            Err(error) => Settled::Failed {
                notice: AI_FAILURE_NOTICE,
                error,
            },
        })
    }
}

impl App {
    #[must_use]
    pub fn whisper(&self) -> Option<WhisperView<'_>> {
        let Screen::Whisper(state) = &self.screen else {
            return None;
        };
        let mood = MoodHint::from_text(&state.input);
        Some(WhisperView {
            input: &state.input,
            phase: state.phase(),
            mood,
            tint: mood.color(),
        })
    }

    fn editable_whisper(&mut self) -> Option<&mut WhisperState> {
        match &mut self.screen {
            Screen::Whisper(state) if state.pending.is_none() => Some(state),
            _ => None,
        }
    }

    /// The key that held the Vent card arrived again.
    ///
    /// Returns `true` while it is still a leftover repeat of that hold and
    /// must not be typed. Each repeat restarts the grace period; the window
    /// closes once it passes quietly or another key is handled.
    pub fn whisper_swallow_hold_key(&mut self) -> bool {
        match &mut self.screen {
            Screen::Whisper(WhisperState {
                key_echo: Some(idle),
                ..
            }) => {
                *idle = Duration::ZERO;
                true
            }
            _ => false,
        }
    }

    pub fn whisper_insert(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(state) = self.editable_whisper() {
            state.key_echo = None;
            state.input.push(c);
        }
    }

    pub fn whisper_backspace(&mut self) {
        if let Some(state) = self.editable_whisper() {
            state.key_echo = None;
            state.input.pop();
        }
    }

    /// Sends the typed feelings to the bartender.
    ///
    /// Blank input and a second submit while mixing are ignored.
    pub fn whisper_submit(&mut self) {
        let mix = self.timings.mix;
        let client = self.client.clone();
        let Some(state) = self.editable_whisper() else {
            tracing::debug!("Whisper submit ignored");
            return;
        };
        let Ok(feelings) = NonEmptyString::new(state.input.trim()) else {
            tracing::debug!("Whisper submit ignored: nothing typed");
            return;
        };

        tracing::info!(chars = feelings.as_str().chars().count(), "Mixing from whisper");
        state.pending = Some(PendingGeneration::spawn(
            client.generate_from_text(feelings),
            mix,
        ));
    }
}
