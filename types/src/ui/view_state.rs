//! View selection and display options.

/// The five screens of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    AiWhisper,
    ManualWorkbench,
    Result,
    Cellar,
}

impl View {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            View::Home => "Soul Bar",
            View::AiWhisper => "AI Whisper",
            View::ManualWorkbench => "Workbench",
            View::Result => "Mood Elixir",
            View::Cellar => "Cellar",
        }
    }
}

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}
