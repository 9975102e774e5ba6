//! Core domain types for Soul Bar.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod artifact;
mod catalog;
mod draft;
mod gesture;
mod ids;
mod mood;
pub mod ui;

pub use artifact::{Artifact, Craft, GenerationResult, InvalidGeneration, Mode};
pub use catalog::{ACCENTS, Accent, BASES, Base};
pub use draft::{AccentSet, Draft, GarnishPlacement, GlassParams, STIR_STEP, StirLevel};
pub use gesture::{HOLD_TICK, HoldAccumulator, HoldTarget, SipGauge, SipOutcome};
pub use ids::ArtifactId;
pub use mood::MoodHint;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// NonEmpty String Types
// ============================================================================

/// A string guaranteed to be non-empty (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("text must not be empty")]
pub struct EmptyStringError;

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::ops::Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Colors
// ============================================================================

/// An opaque RGB color, written and parsed as `#rrggbb`.
///
/// Parsing accepts the short `#rgb` form, either letter case, and a missing
/// leading `#`; display always yields the canonical lowercase long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

impl HexColor {
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(raw: &str) -> Result<Self, ColorParseError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || ColorParseError(raw.to_string());

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::from_rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Ok(Self::from_rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }

    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Rotates the hue by `degrees`, keeping saturation and lightness.
    #[must_use]
    pub fn rotate_hue(self, degrees: u16) -> Self {
        if degrees % 360 == 0 {
            return self;
        }
        let (h, s, l) = self.to_hsl();
        let h = (h + f32::from(degrees)) % 360.0;
        Self::from_hsl(h, s, l)
    }

    fn to_hsl(self) -> (f32, f32, f32) {
        let r = f32::from(self.r) / 255.0;
        let g = f32::from(self.g) / 255.0;
        let b = f32::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = f32::midpoint(max, min);
        let delta = max - min;
        if delta <= f32::EPSILON {
            return (0.0, 0.0, l);
        }
        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if (max - r).abs() <= f32::EPSILON {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() <= f32::EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        (h, s, l)
    }

    fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::from_rgb(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Positivity Score
// ============================================================================

/// Emotional valence of an artifact, an integer percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositivityScore(u8);

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("positivity score {0} is outside 0..=100")]
pub struct ScoreError(pub f64);

impl PositivityScore {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > Self::MAX {
            return Err(ScoreError(f64::from(value)));
        }
        Ok(Self(value))
    }

    /// Rounds a model-reported number to the nearest integer.
    ///
    /// Non-finite values and values that round outside the range are rejected
    /// rather than clamped.
    pub fn from_reported(value: f64) -> Result<Self, ScoreError> {
        if !value.is_finite() {
            return Err(ScoreError(value));
        }
        let rounded = value.round();
        if !(0.0..=f64::from(Self::MAX)).contains(&rounded) {
            return Err(ScoreError(value));
        }
        Ok(Self(rounded as u8))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PositivityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ============================================================================
// Model & Credentials
// ============================================================================

/// A Gemini model identifier such as `gemini-2.5-flash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelParseError {
    #[error("model name must not be empty")]
    Empty,
    #[error("model name {0:?} is not a Gemini model (expected a `gemini-` prefix)")]
    NotGemini(String),
}

impl ModelName {
    pub const DEFAULT: &'static str = "gemini-2.5-flash";

    pub fn parse(raw: &str) -> Result<Self, ModelParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelParseError::Empty);
        }
        if !trimmed.to_ascii_lowercase().starts_with("gemini-") {
            return Err(ModelParseError::NotGemini(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Gemini API key.
///
/// Note: `Debug` is manually implemented to redact the key value, preventing accidental
/// credential disclosure in logs or error messages.
#[derive(Clone)]
pub struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(<redacted>)")
    }
}

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, EmptyStringError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(EmptyStringError);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiKey, HexColor, ModelName, ModelParseError, NonEmptyString, PositivityScore};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        assert!(NonEmptyString::new("   \n").is_err());
        assert_eq!(NonEmptyString::new(" hi ").unwrap().as_str(), " hi ");
    }

    #[test]
    fn hex_color_parses_long_and_short_forms() {
        let long = HexColor::parse("#1E3A8A").unwrap();
        assert_eq!(long.rgb(), (0x1e, 0x3a, 0x8a));
        assert_eq!(long.to_string(), "#1e3a8a");

        let short = HexColor::parse("#fa0").unwrap();
        assert_eq!(short.to_string(), "#ffaa00");

        assert_eq!(HexColor::parse("b91c1c").unwrap().to_string(), "#b91c1c");
    }

    #[test]
    fn hex_color_rejects_garbage() {
        for raw in ["", "#", "#12345", "#gggggg", "blue", "#1e3a8a00"] {
            assert!(HexColor::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn hue_rotation_by_full_turn_is_identity() {
        let red = HexColor::from_rgb(0xb9, 0x1c, 0x1c);
        assert_eq!(red.rotate_hue(0), red);
        assert_eq!(red.rotate_hue(360), red);
    }

    #[test]
    fn hue_rotation_moves_primary_colors() {
        let red = HexColor::from_rgb(255, 0, 0);
        assert_eq!(red.rotate_hue(120), HexColor::from_rgb(0, 255, 0));
        assert_eq!(red.rotate_hue(240), HexColor::from_rgb(0, 0, 255));
    }

    #[test]
    fn hue_rotation_leaves_greys_alone() {
        let grey = HexColor::from_rgb(0xa8, 0xa8, 0xa8);
        assert_eq!(grey.rotate_hue(90), grey);
    }

    #[test]
    fn positivity_rounds_reported_values() {
        assert_eq!(PositivityScore::from_reported(72.4).unwrap().value(), 72);
        assert_eq!(PositivityScore::from_reported(99.6).unwrap().value(), 100);
        assert_eq!(PositivityScore::from_reported(-0.2).unwrap().value(), 0);
    }

    #[test]
    fn positivity_rejects_out_of_range() {
        assert!(PositivityScore::from_reported(100.6).is_err());
        assert!(PositivityScore::from_reported(-3.0).is_err());
        assert!(PositivityScore::from_reported(f64::NAN).is_err());
        assert!(PositivityScore::new(101).is_err());
    }

    #[test]
    fn model_name_requires_gemini_prefix() {
        assert_eq!(
            ModelName::parse(" gemini-2.5-pro ").unwrap().as_str(),
            "gemini-2.5-pro"
        );
        assert_eq!(ModelName::parse(""), Err(ModelParseError::Empty));
        assert!(matches!(
            ModelName::parse("gpt-5"),
            Err(ModelParseError::NotGemini(_))
        ));
        assert_eq!(ModelName::default().as_str(), ModelName::DEFAULT);
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("secret-value").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("secret-value"));
        assert!(ApiKey::new("  ").is_err());
    }
}
