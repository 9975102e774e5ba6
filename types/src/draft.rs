//! The in-progress manual recipe and the glass it renders as.

use std::time::Duration;

use crate::{Accent, Base, HexColor};

/// Stir increment applied by a single stir action.
pub const STIR_STEP: u8 = 5;

const STIR_MAX: u8 = 100;
const POURED_FILL_PERCENT: u8 = 80;
const SPIN_BASE_MS: u64 = 3000;
const SPIN_MS_PER_STIR: u64 = 20;

/// Insertion-ordered set of accents.
///
/// Removing an accent and adding it again moves it to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccentSet(Vec<Accent>);

impl AccentSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `accent` if absent, removes it if present.
    ///
    /// Returns whether the accent is selected afterwards.
    pub fn toggle(&mut self, accent: Accent) -> bool {
        if let Some(pos) = self.0.iter().position(|a| a.name == accent.name) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(accent);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, accent: &Accent) -> bool {
        self.0.iter().any(|a| a.name == accent.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Accent> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|a| a.name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Accumulated stirring, a percentage that only grows and saturates at 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct StirLevel(u8);

impl StirLevel {
    /// Adds one stir step. Returns `false` when already saturated.
    pub fn stir(&mut self) -> bool {
        if self.0 >= STIR_MAX {
            return false;
        }
        self.0 = self.0.saturating_add(STIR_STEP).min(STIR_MAX);
        true
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 >= STIR_MAX
    }
}

/// A manual recipe after its base has been poured.
///
/// The base is fixed at construction; only the accents and stir level change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    base: Base,
    accents: AccentSet,
    stir: StirLevel,
}

impl Draft {
    #[must_use]
    pub fn new(base: Base) -> Self {
        Self {
            base,
            accents: AccentSet::new(),
            stir: StirLevel::default(),
        }
    }

    #[must_use]
    pub fn base(&self) -> Base {
        self.base
    }

    #[must_use]
    pub fn accents(&self) -> &AccentSet {
        &self.accents
    }

    #[must_use]
    pub fn stir_level(&self) -> StirLevel {
        self.stir
    }

    pub fn toggle_accent(&mut self, accent: Accent) -> bool {
        self.accents.toggle(accent)
    }

    pub fn stir(&mut self) -> bool {
        self.stir.stir()
    }

    /// Render parameters for the glass holding this draft.
    ///
    /// `stirring` selects the stir-stage look: the liquid's hue turns and
    /// blurs with the stir level, and the spoon spins faster as it rises.
    #[must_use]
    pub fn glass(&self, stirring: bool) -> GlassParams {
        let level = self.stir.value();
        let (blur_px, hue_rotate_deg, spin_period) = if stirring {
            let spin = (level > 0).then(|| {
                Duration::from_millis(SPIN_BASE_MS - u64::from(level) * SPIN_MS_PER_STIR)
            });
            (f32::from(level) / 20.0, u16::from(level), spin)
        } else {
            (0.0, 0, None)
        };

        GlassParams {
            fill_percent: POURED_FILL_PERCENT,
            liquid: Some(self.base.color),
            blur_px,
            hue_rotate_deg,
            pouring: false,
            spin_period,
            garnishes: GarnishPlacement::layout(&self.accents),
        }
    }
}

/// Where an accent floats inside the glass, in percent of the glass box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarnishPlacement {
    pub accent: Accent,
    pub left_percent: u8,
    pub top_percent: u8,
}

impl GarnishPlacement {
    fn layout(accents: &AccentSet) -> Vec<Self> {
        accents
            .iter()
            .enumerate()
            .map(|(i, accent)| Self {
                accent: *accent,
                left_percent: (20 + 20 * i).min(100) as u8,
                top_percent: (30 + 20 * (i % 2)) as u8,
            })
            .collect()
    }
}

/// Everything the renderer needs to draw the workbench glass.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassParams {
    pub fill_percent: u8,
    /// `None` while the glass is still empty.
    pub liquid: Option<HexColor>,
    /// Haze over the liquid; zero when it is clear.
    pub blur_px: f32,
    /// Turn applied to `liquid` when drawn.
    pub hue_rotate_deg: u16,
    pub pouring: bool,
    /// One revolution of the stirring spoon; `None` when it is still.
    pub spin_period: Option<Duration>,
    pub garnishes: Vec<GarnishPlacement>,
}

impl GlassParams {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fill_percent: 0,
            liquid: None,
            blur_px: 0.0,
            hue_rotate_deg: 0,
            pouring: false,
            spin_period: None,
            garnishes: Vec::new(),
        }
    }

    /// The glass while `base` is being poured.
    #[must_use]
    pub fn pouring(base: Base) -> Self {
        Self {
            fill_percent: POURED_FILL_PERCENT,
            liquid: Some(base.color),
            pouring: true,
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{AccentSet, Draft, StirLevel};
    use crate::{Accent, Base};

    fn accent(name: &str) -> Accent {
        Accent::by_name(name).unwrap()
    }

    #[test]
    fn toggling_twice_restores_the_set() {
        let mut set = AccentSet::new();
        set.toggle(accent("Rosemary"));
        let before = set.clone();

        assert!(set.toggle(accent("Gold Leaf")));
        assert!(!set.toggle(accent("Gold Leaf")));
        assert_eq!(set, before);
    }

    #[test]
    fn re_added_accent_moves_to_end() {
        let mut set = AccentSet::new();
        set.toggle(accent("Sharp Ice"));
        set.toggle(accent("Bitters"));
        set.toggle(accent("Sharp Ice"));
        set.toggle(accent("Sharp Ice"));

        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["Bitters", "Sharp Ice"]);
    }

    #[test]
    fn twenty_five_stirs_saturate_at_one_hundred() {
        let mut level = StirLevel::default();
        for _ in 0..25 {
            level.stir();
        }
        assert_eq!(level.value(), 100);
        assert!(level.is_full());
        assert!(!level.stir());
        assert_eq!(level.value(), 100);
    }

    #[test]
    fn glass_before_stirring_shows_plain_base() {
        let base = Base::by_name("Deep Blue").unwrap();
        let mut draft = Draft::new(base);
        draft.toggle_accent(accent("Rosemary"));
        draft.toggle_accent(accent("Bitters"));

        let glass = draft.glass(false);
        assert_eq!(glass.fill_percent, 80);
        assert_eq!(glass.liquid, Some(base.color));
        assert!(glass.spin_period.is_none());
        assert_eq!(glass.garnishes.len(), 2);
        assert_eq!(
            (glass.garnishes[0].left_percent, glass.garnishes[0].top_percent),
            (20, 30)
        );
        assert_eq!(
            (glass.garnishes[1].left_percent, glass.garnishes[1].top_percent),
            (40, 50)
        );
    }

    #[test]
    fn glass_while_stirring_tracks_stir_level() {
        let base = Base::by_name("Fiery Red").unwrap();
        let mut draft = Draft::new(base);

        let still = draft.glass(true);
        assert!(still.spin_period.is_none());
        assert_eq!(still.liquid, Some(base.color));

        for _ in 0..10 {
            draft.stir();
        }
        let glass = draft.glass(true);
        assert_eq!(glass.hue_rotate_deg, 50);
        assert!((glass.blur_px - 2.5).abs() < f32::EPSILON);
        assert_eq!(glass.spin_period, Some(Duration::from_millis(2000)));
        assert_eq!(glass.liquid, Some(base.color));
    }
}
