//! Result and cellar views.

use std::path::PathBuf;

use soulbar_types::ui::View;
use soulbar_types::{Artifact, ArtifactId, SipGauge, SipOutcome};

use super::{App, CellarState, Screen};
use crate::export::{ExportError, RECEIPT_BACKGROUND, ReceiptCard};
use crate::notices::NoticeLevel;

impl App {
    /// Enters the result view for the current artifact, or home if there is none.
    pub fn show_result(&mut self) {
        self.navigate(View::Result);
    }

    /// The sip gauge while the result view is showing.
    #[must_use]
    pub fn sip_gauge(&self) -> Option<&SipGauge> {
        match &self.screen {
            Screen::Result(state) => Some(&state.sip),
            _ => None,
        }
    }

    /// Whether the closing quote is visible.
    #[must_use]
    pub fn quote_revealed(&self) -> bool {
        self.sip_gauge().is_some_and(SipGauge::is_finished)
    }

    /// One tap on the glass. The finishing sip marks the drink consumed.
    pub fn sip(&mut self) -> Option<SipOutcome> {
        let Screen::Result(state) = &mut self.screen else {
            return None;
        };
        let outcome = state.sip.sip();
        if outcome == SipOutcome::Finished
            && let Some(id) = self.cellar.current().map(Artifact::id)
        {
            self.cellar.mark_consumed(id);
            tracing::info!(%id, "Drink finished");
        }
        Some(outcome)
    }

    /// Writes the receipt of the drink on screen and reports the outcome as a notice.
    pub fn export_receipt(&mut self) -> Result<PathBuf, ExportError> {
        let card = match (&self.screen, self.cellar.current()) {
            (Screen::Result(_), Some(artifact)) => Some(ReceiptCard::from_artifact(artifact)),
            _ => None,
        };
        let result = card
            .ok_or(ExportError::RegionNotFound)
            .and_then(|card| self.exporter.export(&card, RECEIPT_BACKGROUND));

        match &result {
            Ok(path) => {
                self.push_notice(
                    format!("Receipt saved to {}", path.display()),
                    NoticeLevel::Info,
                );
            }
            Err(error) => {
                tracing::warn!(%error, "Receipt export failed");
                self.push_notice(format!("Couldn't save receipt: {error}"), NoticeLevel::Error);
            }
        }
        result
    }

    /// Result to cellar.
    pub fn open_cellar(&mut self) {
        if self.view() == View::Result {
            self.navigate(View::Cellar);
        } else {
            tracing::debug!(view = ?self.view(), "Cellar is reached from the result view");
        }
    }

    /// Cellar to home, ready for another drink.
    pub fn new_mix(&mut self) {
        if self.view() == View::Cellar {
            self.navigate(View::Home);
        }
    }

    /// Opens an artifact from the cellar. An unknown id goes home.
    pub fn select_artifact(&mut self, id: ArtifactId) {
        if self.view() != View::Cellar {
            return;
        }
        match self.cellar.select(id) {
            Ok(_) => self.navigate(View::Result),
            Err(error) => {
                tracing::warn!(%error, "Cellar selection failed");
                self.navigate(View::Home);
            }
        }
    }

    /// Highlighted shelf slot, counting newest first.
    #[must_use]
    pub fn cellar_cursor(&self) -> Option<usize> {
        match &self.screen {
            Screen::Cellar(state) => Some(state.cursor),
            _ => None,
        }
    }

    pub fn move_cellar_cursor(&mut self, delta: isize) {
        let last = self.cellar.len().saturating_sub(1);
        if let Screen::Cellar(CellarState { cursor }) = &mut self.screen {
            *cursor = cursor.saturating_add_signed(delta).min(last);
        }
    }

    /// Opens the highlighted artifact.
    pub fn open_highlighted(&mut self) {
        let Some(cursor) = self.cellar_cursor() else {
            return;
        };
        let id = self.cellar.newest_first().nth(cursor).map(Artifact::id);
        if let Some(id) = id {
            self.select_artifact(id);
        }
    }
}
