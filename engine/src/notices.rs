//! Transient user-facing notices (failures, saved receipts).

use std::time::{Duration, Instant};

const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    level: NoticeLevel,
    shown_at: Instant,
}

impl Notice {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn level(&self) -> NoticeLevel {
        self.level
    }
}

/// The latest notice, kept until it expires or is replaced.
#[derive(Debug, Default)]
pub(crate) struct Notices {
    current: Option<Notice>,
}

impl Notices {
    pub(crate) fn push(&mut self, text: impl Into<String>, level: NoticeLevel, now: Instant) {
        self.current = Some(Notice {
            text: text.into(),
            level,
            shown_at: now,
        });
    }

    pub(crate) fn expire(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= NOTICE_TTL)
        {
            self.current = None;
        }
    }

    pub(crate) fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub(crate) fn dismiss(&mut self) {
        self.current = None;
    }
}
