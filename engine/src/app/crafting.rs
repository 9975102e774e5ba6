//! Manual workbench view.

use std::time::Duration;

use soulbar_providers::DraftDescription;
use soulbar_types::{ACCENTS, Accent, BASES, Base, Craft, StirLevel};

use super::{App, CraftState, MANUAL_FAILURE_NOTICE, Screen, Settled};
use crate::pending::PendingGeneration;
use crate::workbench::{Workbench, WorkbenchRejection, WorkbenchStage};

/// Manual drinks are revealed as soon as the analysis arrives.
const MANUAL_MIX: Duration = Duration::ZERO;

/// A workbench request and the craft it will be served as.
#[derive(Debug)]
pub(crate) struct ManualRequest {
    pub(super) generation: PendingGeneration,
    craft: Craft,
}

impl CraftState {
    pub(super) fn settle(&mut self, elapsed: Duration) -> Option<Settled> {
        let request = self.pending.as_mut()?;
        request.generation.advance(elapsed);
        let outcome = request.generation.poll()?;
        let request = self.pending.take()?;

        Some(match outcome {
            Ok(result) => Settled::Served(result, request.craft),
            Err(error) => Settled::Failed {
                notice: MANUAL_FAILURE_NOTICE,
                error,
            },
        })
    }
}

impl App {
    /// The workbench while the manual view is showing.
    #[must_use]
    pub fn workbench(&self) -> Option<&Workbench> {
        match &self.screen {
            Screen::Workbench(state) => Some(&state.bench),
            _ => None,
        }
    }

    fn idle_bench(&mut self) -> Result<&mut Workbench, WorkbenchRejection> {
        match &mut self.screen {
            Screen::Workbench(state) if state.pending.is_some() => Err(WorkbenchRejection::Busy),
            Screen::Workbench(state) => Ok(&mut state.bench),
            _ => Err(WorkbenchRejection::WrongStage),
        }
    }

    fn log_rejection<T>(result: Result<T, WorkbenchRejection>) -> Result<T, WorkbenchRejection> {
        if let Err(rejection) = &result {
            tracing::debug!(%rejection, "Workbench action ignored");
        }
        result
    }

    pub fn choose_base(&mut self, base: Base) -> Result<(), WorkbenchRejection> {
        Self::log_rejection(self.idle_bench().and_then(|bench| bench.choose_base(base)))
    }

    /// Returns whether the accent is selected afterwards.
    pub fn toggle_accent(&mut self, accent: Accent) -> Result<bool, WorkbenchRejection> {
        Self::log_rejection(self.idle_bench().and_then(|bench| bench.toggle_accent(accent)))
    }

    pub fn advance_to_stir(&mut self) -> Result<(), WorkbenchRejection> {
        Self::log_rejection(self.idle_bench().and_then(Workbench::advance_to_stir))
    }

    pub fn stir(&mut self) -> Result<StirLevel, WorkbenchRejection> {
        Self::log_rejection(self.idle_bench().and_then(Workbench::stir))
    }

    pub fn move_shelf_cursor(&mut self, delta: isize) {
        if let Ok(bench) = self.idle_bench() {
            bench.move_cursor(delta);
        }
    }

    /// Picks the highlighted base or toggles the highlighted accent.
    pub fn select_on_shelf(&mut self) -> Result<(), WorkbenchRejection> {
        let (stage_is_base, cursor) = {
            let bench = self.idle_bench()?;
            let is_base = match bench.stage() {
                WorkbenchStage::SelectBase => true,
                WorkbenchStage::Accents(_) => false,
                WorkbenchStage::Pouring { .. } => {
                    return Self::log_rejection(Err(WorkbenchRejection::Pouring));
                }
                WorkbenchStage::Stir(_) => {
                    return Self::log_rejection(Err(WorkbenchRejection::WrongStage));
                }
            };
            (is_base, bench.cursor())
        };

        if stage_is_base {
            match BASES.get(cursor) {
                Some(base) => self.choose_base(*base),
                None => Err(WorkbenchRejection::WrongStage),
            }
        } else {
            match ACCENTS.get(cursor) {
                Some(accent) => self.toggle_accent(*accent).map(|_| ()),
                None => Err(WorkbenchRejection::WrongStage),
            }
        }
    }

    /// Sends the stirred draft for interpretation.
    ///
    /// The workbench stays on the stir step until the result arrives, and
    /// again after a failure so the user can retry.
    pub fn finish_craft(&mut self) -> Result<(), WorkbenchRejection> {
        let client = self.client.clone();
        let draft = Self::log_rejection(self.idle_bench().and_then(|bench| bench.finished_draft()))?;

        let Screen::Workbench(state) = &mut self.screen else {
            return Err(WorkbenchRejection::WrongStage);
        };
        let description = DraftDescription::from(&draft);
        tracing::info!(
            base = %description.base_name,
            accents = description.accents.len(),
            stir = draft.stir_level().value(),
            "Mixing from workbench"
        );
        state.pending = Some(ManualRequest {
            generation: PendingGeneration::spawn(
                client.generate_from_draft(description),
                MANUAL_MIX,
            ),
            craft: Craft::Manual {
                base: draft.base(),
                accents: draft.accents().clone(),
            },
        });
        Ok(())
    }
}
