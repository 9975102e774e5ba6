use crate::HexColor;

/// A quick keyword read of free text, used to tint the whisper glass while
/// the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoodHint {
    Fiery,
    Melancholy,
    Radiant,
    #[default]
    Complex,
}

const FIERY_WORDS: [&str; 3] = ["angry", "hate", "fire"];
const MELANCHOLY_WORDS: [&str; 3] = ["sad", "cry", "blue"];
const RADIANT_WORDS: [&str; 3] = ["happy", "joy", "love"];

impl MoodHint {
    /// First matching keyword family wins; substring matches count.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        if mentions(&FIERY_WORDS) {
            Self::Fiery
        } else if mentions(&MELANCHOLY_WORDS) {
            Self::Melancholy
        } else if mentions(&RADIANT_WORDS) {
            Self::Radiant
        } else {
            Self::Complex
        }
    }

    #[must_use]
    pub const fn color(self) -> HexColor {
        match self {
            Self::Fiery => HexColor::from_rgb(0xef, 0x44, 0x44),
            Self::Melancholy => HexColor::from_rgb(0x3b, 0x82, 0xf6),
            Self::Radiant => HexColor::from_rgb(0xf5, 0x9e, 0x0b),
            Self::Complex => HexColor::from_rgb(0xa8, 0xa2, 0x9e),
        }
    }

    /// Label recorded as the origin mood of AI-crafted drinks.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fiery => "Fiery",
            Self::Melancholy => "Melancholy",
            Self::Radiant => "Radiant",
            Self::Complex => "Complex",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MoodHint;

    #[test]
    fn keywords_pick_a_family() {
        assert_eq!(MoodHint::from_text("I HATE Mondays"), MoodHint::Fiery);
        assert_eq!(MoodHint::from_text("feeling blue"), MoodHint::Melancholy);
        assert_eq!(MoodHint::from_text("so much joy"), MoodHint::Radiant);
        assert_eq!(
            MoodHint::from_text("I feel exhausted but hopeful"),
            MoodHint::Complex
        );
    }

    #[test]
    fn earlier_families_take_precedence() {
        assert_eq!(MoodHint::from_text("sad and angry"), MoodHint::Fiery);
        assert_eq!(MoodHint::from_text("I love to cry"), MoodHint::Melancholy);
    }

    #[test]
    fn colors_match_families() {
        assert_eq!(MoodHint::Fiery.color().to_string(), "#ef4444");
        assert_eq!(MoodHint::Complex.color().to_string(), "#a8a29e");
    }
}
