//! The session controller.
//!
//! `App` owns everything a running session has: the active view and its
//! state, the cellar, the generation client and the notice line. The TUI
//! reads from it and forwards input back; no rendering happens here.
//!
//! Each view's state lives inside [`Screen`]. Changing view replaces the
//! whole value, so hold progress, pour timers and in-flight requests die
//! with the view that started them.

use std::time::{Duration, Instant};

use soulbar_providers::{GenerationClient, GenerationError};
use soulbar_types::ui::{UiOptions, View};
use soulbar_types::{Artifact, Craft, GenerationResult, HoldAccumulator, HoldTarget, SipGauge};

use crate::cellar::Cellar;
use crate::config::{AppSettings, SoulBarConfig, Timings, build_generation_client};
use crate::export::{ReceiptExporter, SvgReceiptExporter};
use crate::notices::{Notice, NoticeLevel, Notices};
use crate::pending::PendingGeneration;
use crate::workbench::Workbench;

mod crafting;
mod home;
mod serving;
mod whisper;

use crafting::ManualRequest;

pub use home::HoldSource;
pub use whisper::{WhisperPhase, WhisperView};

/// Shown when a free-text generation fails.
pub const AI_FAILURE_NOTICE: &str = "The bartender couldn't quite hear you. Please try again.";
/// Shown when a workbench generation fails.
pub const MANUAL_FAILURE_NOTICE: &str = "Failed to analyze your craft. Try again.";
/// Revealed on the result view once the drink is finished.
pub const CLOSING_QUOTE: &str = "The soul heals what it reveals.";

const UI_TICK: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub(crate) struct HomeState {
    hold: HoldAccumulator,
    /// Time since the last key press or repeat, when a key drives the hold.
    key_idle: Option<Duration>,
}

#[derive(Debug, Default)]
pub(crate) struct WhisperState {
    input: String,
    pending: Option<PendingGeneration>,
    /// Time since the held key last repeated, while a key hold opened the view.
    key_echo: Option<Duration>,
}

#[derive(Debug)]
pub(crate) struct CraftState {
    bench: Workbench,
    pending: Option<ManualRequest>,
}

#[derive(Debug)]
pub(crate) struct ResultState {
    sip: SipGauge,
}

#[derive(Debug, Default)]
pub(crate) struct CellarState {
    cursor: usize,
}

/// The active view together with the state only it uses.
#[derive(Debug)]
pub(crate) enum Screen {
    Home(HomeState),
    Whisper(WhisperState),
    Workbench(CraftState),
    Result(ResultState),
    Cellar(CellarState),
}

impl Screen {
    fn view(&self) -> View {
        match self {
            Screen::Home(_) => View::Home,
            Screen::Whisper(_) => View::AiWhisper,
            Screen::Workbench(_) => View::ManualWorkbench,
            Screen::Result(_) => View::Result,
            Screen::Cellar(_) => View::Cellar,
        }
    }
}

/// What the active view asks of the session after its timers moved.
enum Settled {
    Held(HoldTarget, HoldSource),
    Served(GenerationResult, Craft),
    Failed {
        notice: &'static str,
        error: GenerationError,
    },
}

pub struct App {
    screen: Screen,
    cellar: Cellar,
    client: GenerationClient,
    exporter: Box<dyn ReceiptExporter>,
    timings: Timings,
    ui_options: UiOptions,
    notices: Notices,
    last_frame: Instant,
    last_ui_tick: Instant,
    tick: usize,
    should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("view", &self.view())
            .field("cellar", &self.cellar.len())
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}

impl App {
    #[must_use]
    pub fn new(client: GenerationClient, settings: AppSettings) -> Self {
        let now = Instant::now();
        let exporter = SvgReceiptExporter::new(settings.export_dir.clone());
        Self {
            screen: Screen::Home(HomeState::new(settings.timings.hold_tick)),
            cellar: Cellar::new(),
            client,
            exporter: Box::new(exporter),
            timings: settings.timings,
            ui_options: settings.ui,
            notices: Notices::default(),
            last_frame: now,
            last_ui_tick: now,
            tick: 0,
            should_quit: false,
        }
    }

    /// Builds a session from the loaded config (or defaults).
    #[must_use]
    pub fn from_config(config: Option<&SoulBarConfig>) -> Self {
        Self::new(
            build_generation_client(config),
            AppSettings::from_config(config),
        )
    }

    /// Replaces the receipt exporter.
    #[must_use]
    pub fn with_exporter(mut self, exporter: impl ReceiptExporter + 'static) -> Self {
        self.exporter = Box::new(exporter);
        self
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.screen.view()
    }

    #[must_use]
    pub fn cellar(&self) -> &Cellar {
        &self.cellar
    }

    #[must_use]
    pub fn current_artifact(&self) -> Option<&Artifact> {
        self.cellar.current()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Spinner counter, advanced at roughly 10 Hz.
    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.dismiss();
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub(crate) fn push_notice(&mut self, text: impl Into<String>, level: NoticeLevel) {
        self.notices.push(text, level, Instant::now());
    }

    /// Whether a generation request is outstanding for the active view.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        match &self.screen {
            Screen::Whisper(state) => state.pending.is_some(),
            Screen::Workbench(state) => state.pending.is_some(),
            Screen::Home(_) | Screen::Result(_) | Screen::Cellar(_) => false,
        }
    }

    /// Mixing animation progress while a request is outstanding.
    #[must_use]
    pub fn mix_progress(&self) -> Option<f32> {
        let pending = match &self.screen {
            Screen::Whisper(state) => state.pending.as_ref(),
            Screen::Workbench(state) => state.pending.as_ref().map(|r| &r.generation),
            Screen::Home(_) | Screen::Result(_) | Screen::Cellar(_) => None,
        };
        pending.map(PendingGeneration::progress)
    }

    /// Switches to `view` with fresh view state.
    ///
    /// Entering the result view without a current artifact lands on home.
    pub(crate) fn navigate(&mut self, view: View) {
        let from = self.view();
        self.screen = match view {
            View::Home => Screen::Home(HomeState::new(self.timings.hold_tick)),
            View::AiWhisper => Screen::Whisper(WhisperState::default()),
            View::ManualWorkbench => Screen::Workbench(CraftState {
                bench: Workbench::new(self.timings.pour),
                pending: None,
            }),
            View::Result => match self.cellar.current() {
                Some(artifact) => Screen::Result(ResultState {
                    sip: if artifact.is_consumed() {
                        SipGauge::drained()
                    } else {
                        SipGauge::full()
                    },
                }),
                None => {
                    tracing::debug!("No current artifact; returning home");
                    Screen::Home(HomeState::new(self.timings.hold_tick))
                }
            },
            View::Cellar => Screen::Cellar(CellarState::default()),
        };
        tracing::info!(from = ?from, to = ?self.view(), "View changed");
    }

    /// Esc: leave the active view.
    pub fn cancel(&mut self) {
        match self.view() {
            View::Home => {}
            View::AiWhisper | View::ManualWorkbench => {
                if self.is_processing() {
                    tracing::info!("Abandoning in-flight generation");
                }
                self.navigate(View::Home);
            }
            View::Result => self.open_cellar(),
            View::Cellar => self.new_mix(),
        }
    }

    /// Advances the session clock to now. Called once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(elapsed);
        self.notices.expire(now);

        if now.saturating_duration_since(self.last_ui_tick) >= UI_TICK {
            self.last_ui_tick = now;
            self.tick = self.tick.wrapping_add(1);
        }
    }

    /// Moves every timer of the active view forward by `elapsed` and settles
    /// whatever became ready.
    pub fn advance(&mut self, elapsed: Duration) {
        let settled = match &mut self.screen {
            Screen::Home(state) => state.advance(elapsed).map(|target| {
                tracing::info!(?target, "Hold completed");
                Settled::Held(target, state.source())
            }),
            Screen::Whisper(state) => state.settle(elapsed),
            Screen::Workbench(state) => {
                state.bench.advance(elapsed);
                state.settle(elapsed)
            }
            Screen::Result(_) | Screen::Cellar(_) => None,
        };

        match settled {
            Some(Settled::Held(target, source)) => self.open_held(target, source),
            Some(Settled::Served(result, craft)) => self.serve(result, craft),
            Some(Settled::Failed { notice, error }) => {
                tracing::warn!(%error, "Generation failed");
                self.push_notice(notice, NoticeLevel::Error);
            }
            None => {}
        }
    }

    /// Turns a validated result into an artifact, makes it current and shows it.
    fn serve(&mut self, result: GenerationResult, craft: Craft) {
        let artifact = Artifact::new(result, craft);
        tracing::info!(
            id = %artifact.id(),
            name = artifact.name(),
            mode = artifact.mode().label(),
            "Artifact appended"
        );
        self.cellar.append(artifact);
        self.navigate(View::Result);
    }
}
