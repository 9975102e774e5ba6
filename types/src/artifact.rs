//! Generated drinks and the validated generation results they come from.

use std::time::SystemTime;

use thiserror::Error;

use crate::{
    AccentSet, ArtifactId, Base, ColorParseError, HexColor, NonEmptyString, PositivityScore,
    ScoreError,
};

/// A fully validated reply from the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    name: NonEmptyString,
    color: HexColor,
    ingredients: Vec<NonEmptyString>,
    analysis: String,
    positivity: PositivityScore,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGeneration {
    #[error("drink name is empty")]
    EmptyName,
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error("ingredient list is empty")]
    NoIngredients,
    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl GenerationResult {
    /// Validates raw field values.
    ///
    /// Blank ingredient entries are dropped; at least one must remain.
    pub fn new(
        name: impl Into<String>,
        color: &str,
        ingredients: impl IntoIterator<Item = String>,
        analysis: impl Into<String>,
        positivity: f64,
    ) -> Result<Self, InvalidGeneration> {
        let name = NonEmptyString::new(name.into().trim())
            .map_err(|_| InvalidGeneration::EmptyName)?;
        let color = HexColor::parse(color)?;
        let ingredients: Vec<NonEmptyString> = ingredients
            .into_iter()
            .filter_map(|item| NonEmptyString::new(item.trim()).ok())
            .collect();
        if ingredients.is_empty() {
            return Err(InvalidGeneration::NoIngredients);
        }
        let positivity = PositivityScore::from_reported(positivity)?;

        Ok(Self {
            name,
            color,
            ingredients,
            analysis: analysis.into().trim().to_string(),
            positivity,
        })
    }

    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> HexColor {
        self.color
    }

    #[must_use]
    pub fn ingredients(&self) -> &[NonEmptyString] {
        &self.ingredients
    }

    #[must_use]
    pub fn analysis(&self) -> &str {
        &self.analysis
    }

    #[must_use]
    pub fn positivity(&self) -> PositivityScore {
        self.positivity
    }
}

/// Which path produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ai,
    Manual,
}

impl Mode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Ai => "AI",
            Mode::Manual => "MANUAL",
        }
    }
}

/// How an artifact was crafted, with the details each path records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Craft {
    Ai { mood: String },
    Manual { base: Base, accents: AccentSet },
}

impl Craft {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Craft::Ai { .. } => Mode::Ai,
            Craft::Manual { .. } => Mode::Manual,
        }
    }

    #[must_use]
    pub fn origin_mood(&self) -> &str {
        match self {
            Craft::Ai { mood } => mood,
            Craft::Manual { base, .. } => base.name,
        }
    }
}

/// A generated drink as kept in the cellar.
///
/// Everything is fixed at creation except the consumed flag, which can only
/// go from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    id: ArtifactId,
    name: NonEmptyString,
    description: String,
    color: HexColor,
    ingredients: Vec<NonEmptyString>,
    craft: Craft,
    created_at: SystemTime,
    positivity: PositivityScore,
    consumed: bool,
}

impl Artifact {
    #[must_use]
    pub fn new(result: GenerationResult, craft: Craft) -> Self {
        Self::with_timestamp(result, craft, SystemTime::now())
    }

    #[must_use]
    pub fn with_timestamp(result: GenerationResult, craft: Craft, created_at: SystemTime) -> Self {
        let GenerationResult {
            name,
            color,
            ingredients,
            analysis,
            positivity,
        } = result;
        Self {
            id: ArtifactId::new(),
            name,
            description: analysis,
            color,
            ingredients,
            craft,
            created_at,
            positivity,
            consumed: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn color(&self) -> HexColor {
        self.color
    }

    #[must_use]
    pub fn ingredients(&self) -> &[NonEmptyString] {
        &self.ingredients
    }

    #[must_use]
    pub fn craft(&self) -> &Craft {
        &self.craft
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.craft.mode()
    }

    #[must_use]
    pub fn origin_mood(&self) -> &str {
        self.craft.origin_mood()
    }

    /// Accents chosen on the workbench; `None` for AI drinks.
    #[must_use]
    pub fn accents(&self) -> Option<&AccentSet> {
        match &self.craft {
            Craft::Manual { accents, .. } => Some(accents),
            Craft::Ai { .. } => None,
        }
    }

    #[must_use]
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    #[must_use]
    pub fn positivity(&self) -> PositivityScore {
        self.positivity
    }

    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Returns `true` only for the call that flipped the flag.
    pub fn mark_consumed(&mut self) -> bool {
        !std::mem::replace(&mut self.consumed, true)
    }
}

#[cfg(test)]
mod tests {
    use super::{Artifact, Craft, GenerationResult, InvalidGeneration, Mode};
    use crate::{Accent, AccentSet, Base};

    fn result() -> GenerationResult {
        GenerationResult::new(
            "Dawn Haze",
            "#f4c2a1",
            vec!["2oz Quiet Rest".to_string(), "Dash of Sunrise".to_string()],
            "You are tired, yet a light is coming.",
            64.0,
        )
        .unwrap()
    }

    #[test]
    fn new_artifact_is_fresh_and_unconsumed() {
        let a = Artifact::new(
            result(),
            Craft::Ai {
                mood: "Complex".into(),
            },
        );
        let b = Artifact::new(
            result(),
            Craft::Ai {
                mood: "Complex".into(),
            },
        );

        assert!(!a.is_consumed());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.mode(), Mode::Ai);
        assert!(a.accents().is_none());
        assert!(!a.ingredients().is_empty());
        assert!(a.positivity().value() <= 100);
        assert_eq!(a.description(), "You are tired, yet a light is coming.");
    }

    #[test]
    fn manual_artifact_keeps_base_and_accents() {
        let mut accents = AccentSet::new();
        accents.toggle(Accent::by_name("Rosemary").unwrap());
        let artifact = Artifact::new(
            result(),
            Craft::Manual {
                base: Base::by_name("Fiery Red").unwrap(),
                accents,
            },
        );

        assert_eq!(artifact.mode(), Mode::Manual);
        assert_eq!(artifact.origin_mood(), "Fiery Red");
        let names: Vec<_> = artifact.accents().unwrap().names().collect();
        assert_eq!(names, vec!["Rosemary"]);
    }

    #[test]
    fn mark_consumed_is_monotonic() {
        let mut artifact = Artifact::new(result(), Craft::Ai { mood: "x".into() });
        assert!(artifact.mark_consumed());
        assert!(!artifact.mark_consumed());
        assert!(artifact.is_consumed());
    }

    #[test]
    fn generation_result_rejects_bad_fields() {
        let ok = |name: &str, color: &str, ingredients: Vec<&str>, score: f64| {
            GenerationResult::new(
                name,
                color,
                ingredients.into_iter().map(String::from),
                "analysis",
                score,
            )
        };

        assert_eq!(
            ok("  ", "#fff", vec!["a"], 1.0).unwrap_err(),
            InvalidGeneration::EmptyName
        );
        assert!(matches!(
            ok("n", "teal", vec!["a"], 1.0),
            Err(InvalidGeneration::Color(_))
        ));
        assert_eq!(
            ok("n", "#fff", vec![" ", ""], 1.0).unwrap_err(),
            InvalidGeneration::NoIngredients
        );
        assert!(matches!(
            ok("n", "#fff", vec!["a"], 140.0),
            Err(InvalidGeneration::Score(_))
        ));
    }

    #[test]
    fn generation_result_drops_blank_ingredients() {
        let result = GenerationResult::new(
            "Name",
            "#123456",
            vec!["Ice".to_string(), "   ".to_string(), " Mint ".to_string()],
            "analysis",
            50.0,
        )
        .unwrap();
        let names: Vec<_> = result.ingredients().iter().map(|i| i.as_str()).collect();
        assert_eq!(names, vec!["Ice", "Mint"]);
    }
}
