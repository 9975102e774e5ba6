use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};
use thiserror::Error;

use soulbar_providers::{GEMINI_API_BASE_URL, GeminiBackend, GenerationClient, MissingKeyBackend};
use soulbar_types::{ApiKey, HOLD_TICK, ModelName, ui::UiOptions};

const DEFAULT_POUR_MS: u64 = 1500;
const DEFAULT_MIX_MS: u64 = 3000;

/// Environment variables consulted for the Gemini key, in order.
const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Default, Deserialize)]
pub struct SoulBarConfig {
    pub app: Option<AppConfig>,
    pub google: Option<GoogleConfig>,
    pub timing: Option<TimingConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable spinners and glass animations.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Directory receipts are saved into. Defaults to the working directory.
    pub export_dir: Option<PathBuf>,
}

#[derive(Default, Deserialize)]
pub struct GoogleConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

// Manual Debug impl to prevent leaking API keys in logs.
impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Cosmetic delays, in milliseconds.
#[derive(Debug, Default, Deserialize)]
pub struct TimingConfig {
    pub pour_ms: Option<u64>,
    pub mix_ms: Option<u64>,
    pub hold_tick_ms: Option<u64>,
}

/// Resolved timing values used by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long the workbench pours a base before accents unlock.
    pub pour: Duration,
    /// Minimum time the whisper glass mixes before revealing a drink.
    pub mix: Duration,
    /// Interval of one hold accumulator step.
    pub hold_tick: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            pour: Duration::from_millis(DEFAULT_POUR_MS),
            mix: Duration::from_millis(DEFAULT_MIX_MS),
            hold_tick: HOLD_TICK,
        }
    }
}

impl Timings {
    /// No cosmetic delays at all.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            pour: Duration::ZERO,
            mix: Duration::ZERO,
            hold_tick: HOLD_TICK,
        }
    }
}

/// Session settings that do not involve the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub ui: UiOptions,
    pub timings: Timings,
    pub export_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ui: UiOptions::default(),
            timings: Timings::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppSettings {
    #[must_use]
    pub fn from_config(config: Option<&SoulBarConfig>) -> Self {
        let mut settings = Self::default();

        if let Some(app) = config.and_then(|c| c.app.as_ref()) {
            settings.ui = UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            };
            if let Some(dir) = &app.export_dir {
                settings.export_dir = PathBuf::from(expand_env_vars(&dir.to_string_lossy()));
            }
        }
        if env::var("SOULBAR_ASCII").is_ok_and(|v| v == "1") {
            settings.ui.ascii_only = true;
        }

        if let Some(timing) = config.and_then(|c| c.timing.as_ref()) {
            let ms = Duration::from_millis;
            if let Some(pour) = timing.pour_ms {
                settings.timings.pour = ms(pour);
            }
            if let Some(mix) = timing.mix_ms {
                settings.timings.mix = ms(mix);
            }
            if let Some(tick) = timing.hold_tick_ms.filter(|t| *t > 0) {
                settings.timings.hold_tick = ms(tick);
            }
        }

        settings
    }
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Finds the Gemini key: config first, then the environment.
#[must_use]
pub fn resolve_api_key(config: Option<&SoulBarConfig>) -> Option<ApiKey> {
    let configured = config
        .and_then(|c| c.google.as_ref())
        .and_then(|g| g.api_key.as_deref())
        .map(expand_env_vars);

    configured
        .into_iter()
        .chain(API_KEY_ENV_VARS.iter().filter_map(|var| env::var(var).ok()))
        .find_map(|candidate| ApiKey::new(candidate).ok())
}

/// Builds the generation client the session should use.
///
/// Without a key the client still exists but every request fails with a
/// service error, which the views surface like any other failure.
#[must_use]
pub fn build_generation_client(config: Option<&SoulBarConfig>) -> GenerationClient {
    let google = config.and_then(|c| c.google.as_ref());

    let model = match google.and_then(|g| g.model.as_deref()) {
        Some(raw) => ModelName::parse(raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring configured model: {e}");
            ModelName::default()
        }),
        None => ModelName::default(),
    };

    let Some(api_key) = resolve_api_key(config) else {
        tracing::warn!("No Gemini API key configured; generation will fail until one is set");
        return GenerationClient::new(MissingKeyBackend);
    };

    let base_url = google
        .and_then(|g| g.base_url.as_deref())
        .map_or_else(|| GEMINI_API_BASE_URL.to_string(), expand_env_vars);

    tracing::info!(model = %model, "Using Gemini backend");
    GenerationClient::new(GeminiBackend::new(api_key, model).with_base_url(base_url))
}

impl SoulBarConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        Self::load_from(path)
    }

    pub fn load_from(path: PathBuf) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".soulbar").join("config.toml"))
}
