//! Manual crafting: base, then accents, then stirring.
//!
//! The stages only move forward. Every operation that does not fit the
//! current stage is rejected without changing anything.

use std::time::Duration;

use thiserror::Error;

use soulbar_types::{ACCENTS, Accent, BASES, Base, Draft, GlassParams, StirLevel, ui::EffectTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkbenchRejection {
    #[error("the base is still being poured")]
    Pouring,
    #[error("not available at this step")]
    WrongStage,
    #[error("stir at least once before serving")]
    NotStirred,
    #[error("already analyzing this drink")]
    Busy,
}

#[derive(Debug, Clone)]
pub enum WorkbenchStage {
    SelectBase,
    Pouring { base: Base, timer: EffectTimer },
    Accents(Draft),
    Stir(Draft),
}

#[derive(Debug, Clone)]
pub struct Workbench {
    stage: WorkbenchStage,
    pour: Duration,
    cursor: usize,
}

impl Workbench {
    #[must_use]
    pub fn new(pour: Duration) -> Self {
        Self {
            stage: WorkbenchStage::SelectBase,
            pour,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn stage(&self) -> &WorkbenchStage {
        &self.stage
    }

    /// 1-based step number shown in the header.
    #[must_use]
    pub fn step(&self) -> u8 {
        match self.stage {
            WorkbenchStage::SelectBase | WorkbenchStage::Pouring { .. } => 1,
            WorkbenchStage::Accents(_) => 2,
            WorkbenchStage::Stir(_) => 3,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.step() {
            1 => "CHOOSE YOUR BASE",
            2 => "ADD ACCENTS",
            _ => "STIR TO FUSE",
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        match &self.stage {
            WorkbenchStage::Accents(draft) | WorkbenchStage::Stir(draft) => Some(draft),
            WorkbenchStage::SelectBase | WorkbenchStage::Pouring { .. } => None,
        }
    }

    #[must_use]
    pub fn is_pouring(&self) -> bool {
        matches!(self.stage, WorkbenchStage::Pouring { .. })
    }

    /// Starts pouring `base`. The draft exists once the pour completes.
    pub fn choose_base(&mut self, base: Base) -> Result<(), WorkbenchRejection> {
        match self.stage {
            WorkbenchStage::SelectBase => {
                self.stage = WorkbenchStage::Pouring {
                    base,
                    timer: EffectTimer::new(self.pour),
                };
                self.cursor = 0;
                self.settle_pour();
                Ok(())
            }
            WorkbenchStage::Pouring { .. } => Err(WorkbenchRejection::Pouring),
            WorkbenchStage::Accents(_) | WorkbenchStage::Stir(_) => {
                Err(WorkbenchRejection::WrongStage)
            }
        }
    }

    /// Advances the pour timer.
    pub fn advance(&mut self, elapsed: Duration) {
        if let WorkbenchStage::Pouring { timer, .. } = &mut self.stage {
            timer.advance(elapsed);
        }
        self.settle_pour();
    }

    fn settle_pour(&mut self) {
        let poured = match &self.stage {
            WorkbenchStage::Pouring { base, timer } if timer.is_finished() => Some(*base),
            _ => None,
        };
        if let Some(base) = poured {
            self.stage = WorkbenchStage::Accents(Draft::new(base));
        }
    }

    /// Returns whether the accent is selected afterwards.
    pub fn toggle_accent(&mut self, accent: Accent) -> Result<bool, WorkbenchRejection> {
        match &mut self.stage {
            WorkbenchStage::Accents(draft) => Ok(draft.toggle_accent(accent)),
            WorkbenchStage::Pouring { .. } => Err(WorkbenchRejection::Pouring),
            WorkbenchStage::SelectBase | WorkbenchStage::Stir(_) => {
                Err(WorkbenchRejection::WrongStage)
            }
        }
    }

    pub fn advance_to_stir(&mut self) -> Result<(), WorkbenchRejection> {
        match &self.stage {
            WorkbenchStage::Accents(draft) => {
                self.stage = WorkbenchStage::Stir(draft.clone());
                Ok(())
            }
            WorkbenchStage::Pouring { .. } => Err(WorkbenchRejection::Pouring),
            WorkbenchStage::SelectBase | WorkbenchStage::Stir(_) => {
                Err(WorkbenchRejection::WrongStage)
            }
        }
    }

    pub fn stir(&mut self) -> Result<StirLevel, WorkbenchRejection> {
        match &mut self.stage {
            WorkbenchStage::Stir(draft) => {
                draft.stir();
                Ok(draft.stir_level())
            }
            WorkbenchStage::Pouring { .. } => Err(WorkbenchRejection::Pouring),
            WorkbenchStage::SelectBase | WorkbenchStage::Accents(_) => {
                Err(WorkbenchRejection::WrongStage)
            }
        }
    }

    #[must_use]
    pub fn can_finish(&self) -> bool {
        matches!(&self.stage, WorkbenchStage::Stir(draft) if !draft.stir_level().is_zero())
    }

    /// The finished draft to send for interpretation. The workbench stays in
    /// the stir stage so a failed request can be retried.
    pub fn finished_draft(&self) -> Result<Draft, WorkbenchRejection> {
        match &self.stage {
            WorkbenchStage::Stir(draft) if draft.stir_level().is_zero() => {
                Err(WorkbenchRejection::NotStirred)
            }
            WorkbenchStage::Stir(draft) => Ok(draft.clone()),
            WorkbenchStage::Pouring { .. } => Err(WorkbenchRejection::Pouring),
            WorkbenchStage::SelectBase | WorkbenchStage::Accents(_) => {
                Err(WorkbenchRejection::WrongStage)
            }
        }
    }

    #[must_use]
    pub fn glass(&self) -> GlassParams {
        match &self.stage {
            WorkbenchStage::SelectBase => GlassParams::empty(),
            WorkbenchStage::Pouring { base, .. } => GlassParams::pouring(*base),
            WorkbenchStage::Accents(draft) => draft.glass(false),
            WorkbenchStage::Stir(draft) => draft.glass(true),
        }
    }

    /// Pour progress in `[0.0, 1.0]` while pouring.
    #[must_use]
    pub fn pour_progress(&self) -> Option<f32> {
        match &self.stage {
            WorkbenchStage::Pouring { timer, .. } => Some(timer.progress()),
            _ => None,
        }
    }

    /// Index of the highlighted shelf item (bases in step 1, accents in step 2).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = match self.stage {
            WorkbenchStage::SelectBase => BASES.len(),
            WorkbenchStage::Accents(_) => ACCENTS.len(),
            WorkbenchStage::Pouring { .. } | WorkbenchStage::Stir(_) => return,
        };
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use soulbar_types::{Accent, Base};

    use super::{Workbench, WorkbenchRejection, WorkbenchStage};

    const POUR: Duration = Duration::from_millis(1500);

    fn poured(base: &str) -> Workbench {
        let mut bench = Workbench::new(POUR);
        bench.choose_base(Base::by_name(base).unwrap()).unwrap();
        bench.advance(POUR);
        bench
    }

    fn accent(name: &str) -> Accent {
        Accent::by_name(name).unwrap()
    }

    #[test]
    fn pour_blocks_everything_until_it_completes() {
        let mut bench = Workbench::new(POUR);
        let red = Base::by_name("Fiery Red").unwrap();
        bench.choose_base(red).unwrap();
        assert!(bench.is_pouring());
        assert_eq!(bench.step(), 1);

        assert_eq!(
            bench.choose_base(Base::by_name("Deep Blue").unwrap()),
            Err(WorkbenchRejection::Pouring)
        );
        assert_eq!(
            bench.toggle_accent(accent("Rosemary")),
            Err(WorkbenchRejection::Pouring)
        );

        bench.advance(Duration::from_millis(1000));
        assert!(bench.is_pouring());
        bench.advance(Duration::from_millis(500));

        assert_eq!(bench.step(), 2);
        assert_eq!(bench.title(), "ADD ACCENTS");
        assert_eq!(bench.draft().unwrap().base(), red);
    }

    #[test]
    fn zero_pour_skips_straight_to_accents() {
        let mut bench = Workbench::new(Duration::ZERO);
        bench
            .choose_base(Base::by_name("Soft Pink").unwrap())
            .unwrap();
        assert!(matches!(bench.stage(), WorkbenchStage::Accents(_)));
    }

    #[test]
    fn base_is_immutable_once_poured() {
        let mut bench = poured("Forest Green");
        assert_eq!(
            bench.choose_base(Base::by_name("Deep Blue").unwrap()),
            Err(WorkbenchRejection::WrongStage)
        );
        assert_eq!(bench.draft().unwrap().base().name, "Forest Green");
    }

    #[test]
    fn accents_only_change_in_step_two() {
        let mut bench = poured("Fiery Red");
        assert_eq!(bench.toggle_accent(accent("Bitters")), Ok(true));
        assert_eq!(bench.toggle_accent(accent("Bitters")), Ok(false));
        assert_eq!(bench.toggle_accent(accent("Rosemary")), Ok(true));
        bench.advance_to_stir().unwrap();

        assert_eq!(
            bench.toggle_accent(accent("Gold Leaf")),
            Err(WorkbenchRejection::WrongStage)
        );
        let names: Vec<_> = bench.draft().unwrap().accents().names().collect();
        assert_eq!(names, vec!["Rosemary"]);
    }

    #[test]
    fn stirring_is_only_possible_in_step_three() {
        let mut bench = poured("Deep Blue");
        assert_eq!(bench.stir(), Err(WorkbenchRejection::WrongStage));
        bench.advance_to_stir().unwrap();
        assert_eq!(bench.stir().unwrap().value(), 5);
        assert_eq!(bench.title(), "STIR TO FUSE");
    }

    #[test]
    fn finish_requires_a_stir() {
        let mut bench = poured("Deep Blue");
        bench.advance_to_stir().unwrap();
        assert!(!bench.can_finish());
        assert_eq!(
            bench.finished_draft().unwrap_err(),
            WorkbenchRejection::NotStirred
        );

        bench.stir().unwrap();
        assert!(bench.can_finish());
        let draft = bench.finished_draft().unwrap();
        assert_eq!(draft.stir_level().value(), 5);
        assert!(matches!(bench.stage(), WorkbenchStage::Stir(_)));
    }

    #[test]
    fn advance_to_stir_works_without_accents() {
        let mut bench = poured("Midnight Violet");
        assert!(bench.advance_to_stir().is_ok());
        assert_eq!(bench.advance_to_stir(), Err(WorkbenchRejection::WrongStage));
    }

    #[test]
    fn glass_follows_the_stage() {
        let mut bench = Workbench::new(POUR);
        assert_eq!(bench.glass().fill_percent, 0);

        bench.choose_base(Base::by_name("Deep Blue").unwrap()).unwrap();
        assert!(bench.glass().pouring);
        assert!(bench.pour_progress().is_some());

        bench.advance(POUR);
        bench.advance_to_stir().unwrap();
        for _ in 0..4 {
            bench.stir().unwrap();
        }
        let glass = bench.glass();
        assert_eq!(glass.fill_percent, 80);
        assert_eq!(glass.hue_rotate_deg, 20);
        assert!(glass.spin_period.is_some());
    }

    #[test]
    fn cursor_stays_on_the_shelf() {
        let mut bench = Workbench::new(POUR);
        bench.move_cursor(-3);
        assert_eq!(bench.cursor(), 0);
        bench.move_cursor(10);
        assert_eq!(bench.cursor(), 4);

        let mut bench = poured("Deep Blue");
        assert_eq!(bench.cursor(), 0);
        bench.move_cursor(10);
        assert_eq!(bench.cursor(), 3);
    }
}
