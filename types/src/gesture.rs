//! Continuous gestures mapped to one-shot events.

use std::time::Duration;

use crate::ui::View;

/// Default interval between hold accumulator steps.
pub const HOLD_TICK: Duration = Duration::from_millis(100);

// Progress is tracked in permille so 20 steps land exactly on the cap.
const HOLD_STEP_PERMILLE: u16 = 50;
const HOLD_FULL_PERMILLE: u16 = 1000;

/// Which home card is being held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoldTarget {
    Vent,
    Craft,
}

impl HoldTarget {
    /// The view a completed hold opens.
    #[must_use]
    pub const fn destination(self) -> View {
        match self {
            HoldTarget::Vent => View::AiWhisper,
            HoldTarget::Craft => View::ManualWorkbench,
        }
    }
}

/// Press-and-hold accumulator for the home cards.
///
/// While held, progress grows by 0.05 per tick and caps at 1.0. Releasing
/// early resets it. Reaching the cap yields the held target exactly once;
/// after that the accumulator is spent and ignores further input.
#[derive(Debug, Clone)]
pub struct HoldAccumulator {
    active: Option<HoldTarget>,
    permille: u16,
    carry: Duration,
    tick: Duration,
    fired: bool,
}

impl Default for HoldAccumulator {
    fn default() -> Self {
        Self::new(HOLD_TICK)
    }
}

impl HoldAccumulator {
    #[must_use]
    pub fn new(tick: Duration) -> Self {
        Self {
            active: None,
            permille: 0,
            carry: Duration::ZERO,
            tick: tick.max(Duration::from_millis(1)),
            fired: false,
        }
    }

    /// Starts (or retargets) a hold. Switching cards restarts the progress.
    pub fn press(&mut self, target: HoldTarget) {
        if self.fired || self.active == Some(target) {
            return;
        }
        self.active = Some(target);
        self.permille = 0;
        self.carry = Duration::ZERO;
    }

    pub fn release(&mut self) {
        if self.fired {
            return;
        }
        self.active = None;
        self.permille = 0;
        self.carry = Duration::ZERO;
    }

    /// One accumulator step.
    pub fn tick(&mut self) -> Option<HoldTarget> {
        if self.fired {
            return None;
        }
        let target = self.active?;
        self.permille = (self.permille + HOLD_STEP_PERMILLE).min(HOLD_FULL_PERMILLE);
        if self.permille == HOLD_FULL_PERMILLE {
            self.fired = true;
            return Some(target);
        }
        None
    }

    /// Converts wall-clock time into ticks.
    pub fn advance(&mut self, elapsed: Duration) -> Option<HoldTarget> {
        if self.fired || self.active.is_none() {
            return None;
        }
        self.carry = self.carry.saturating_add(elapsed);
        while self.carry >= self.tick {
            self.carry -= self.tick;
            if let Some(target) = self.tick() {
                return Some(target);
            }
        }
        None
    }

    #[must_use]
    pub fn active(&self) -> Option<HoldTarget> {
        self.active
    }

    /// Progress in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        f32::from(self.permille) / f32::from(HOLD_FULL_PERMILLE)
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

const SIP_STEP: u8 = 20;
const SIP_THRESHOLD: u8 = 20;
const FULL_GLASS: u8 = 100;

/// What a single sip did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SipOutcome {
    Sipped,
    /// The last drop: the drink should now be marked consumed.
    Finished,
    /// The glass was already empty.
    Empty,
}

/// Tap-to-drink gauge on the result view.
#[derive(Debug, Clone)]
pub struct SipGauge {
    level: u8,
    finished: bool,
}

impl Default for SipGauge {
    fn default() -> Self {
        Self::full()
    }
}

impl SipGauge {
    #[must_use]
    pub fn full() -> Self {
        Self {
            level: FULL_GLASS,
            finished: false,
        }
    }

    /// A glass that has already been drunk.
    #[must_use]
    pub fn drained() -> Self {
        Self {
            level: 0,
            finished: true,
        }
    }

    /// Takes one sip of 20.
    ///
    /// The sip taken from a level at or below the threshold finishes the
    /// drink; that is reported once.
    pub fn sip(&mut self) -> SipOutcome {
        if self.level == 0 {
            return SipOutcome::Empty;
        }
        let before = self.level;
        self.level = before.saturating_sub(SIP_STEP);
        if before <= SIP_THRESHOLD && !self.finished {
            self.finished = true;
            return SipOutcome::Finished;
        }
        SipOutcome::Sipped
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
