//! Core engine for Soul Bar: the session state machine.
//!
//! This crate contains the [`App`] session controller without terminal
//! dependencies. The TUI reads state from `App` and forwards input back.
//!
//! - **Views**: home, AI whisper, manual workbench, result and cellar, each
//!   with state that lives exactly as long as the view is showing
//! - **Cellar**: the session's append-only history of drinks
//! - **Generation**: requests run on the tokio runtime and are joined with a
//!   cosmetic mixing delay before the result is revealed
//! - **Receipts**: export of the result card through [`ReceiptExporter`]

mod app;
mod cellar;
mod config;
mod export;
mod notices;
mod pending;
mod workbench;


pub use app::{
    AI_FAILURE_NOTICE, App, CLOSING_QUOTE, HoldSource, MANUAL_FAILURE_NOTICE, WhisperPhase,
    WhisperView,
};
pub use cellar::{Cellar, NotFound};
pub use config::{
    AppConfig, AppSettings, ConfigError, GoogleConfig, SoulBarConfig, TimingConfig, Timings,
    build_generation_client, config_path, resolve_api_key,
};
pub use export::{
    ExportError, RECEIPT_BACKGROUND, ReceiptCard, ReceiptExporter, SvgReceiptExporter, render_svg,
};
pub use notices::{Notice, NoticeLevel};
pub use workbench::{Workbench, WorkbenchRejection, WorkbenchStage};

pub use soulbar_providers::{self, GenerationClient};
pub use soulbar_types::{
    ACCENTS, Accent, Artifact, ArtifactId, BASES, Base, Draft, GlassParams, HoldAccumulator,
    HoldTarget, MoodHint, SipGauge, SipOutcome, StirLevel,
};
pub use soulbar_types::ui::{EffectTimer, UiOptions, View};
