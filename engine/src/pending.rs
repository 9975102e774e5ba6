//! An in-flight generation request joined with its cosmetic delay.

use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::task::JoinHandle;

use soulbar_providers::{GenerationError, ServiceError};
use soulbar_types::{GenerationResult, ui::EffectTimer};

type Outcome = Result<GenerationResult, GenerationError>;

#[derive(Debug)]
enum Stage {
    Running(JoinHandle<Outcome>),
    Resolved(Outcome),
    Delivered,
}

/// A spawned generation task.
///
/// A success is held back until the minimum delay has run out; a failure is
/// released as soon as it arrives. The outcome is handed out once. Dropping
/// the value aborts the task, so a view that is left never receives a late
/// result.
#[derive(Debug)]
pub(crate) struct PendingGeneration {
    stage: Stage,
    min_delay: EffectTimer,
}

impl PendingGeneration {
    pub(crate) fn spawn(request: BoxFuture<'static, Outcome>, min_delay: Duration) -> Self {
        Self {
            stage: Stage::Running(tokio::spawn(request)),
            min_delay: EffectTimer::new(min_delay),
        }
    }

    pub(crate) fn advance(&mut self, elapsed: Duration) {
        self.min_delay.advance(elapsed);
    }

    /// Mixing animation progress in `[0.0, 1.0]`.
    pub(crate) fn progress(&self) -> f32 {
        self.min_delay.progress()
    }

    /// Returns the outcome once it may be shown, and `None` ever after.
    pub(crate) fn poll(&mut self) -> Option<Outcome> {
        if let Stage::Running(handle) = &mut self.stage
            && handle.is_finished()
            && let Some(joined) = handle.now_or_never()
        {
            self.stage = Stage::Resolved(joined.unwrap_or_else(|e| {
                Err(GenerationError::Service(ServiceError::Transport(format!(
                    "generation task failed: {e}"
                ))))
            }));
        }

        let ready = match &self.stage {
            Stage::Resolved(Ok(_)) => self.min_delay.is_finished(),
            Stage::Resolved(Err(_)) => true,
            Stage::Running(_) | Stage::Delivered => false,
        };
        if !ready {
            return None;
        }
        match std::mem::replace(&mut self.stage, Stage::Delivered) {
            Stage::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl Drop for PendingGeneration {
    fn drop(&mut self) {
        if let Stage::Running(handle) = &self.stage {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::future::BoxFuture;
    use soulbar_providers::{GenerationError, ServiceError};
    use soulbar_types::GenerationResult;

    use super::{PendingGeneration, Stage};

    fn success() -> BoxFuture<'static, Result<GenerationResult, GenerationError>> {
        Box::pin(async {
            let result =
                GenerationResult::new("Calm", "#1e3a8a", vec!["Ice".into()], "Still.", 70.0)
                    .unwrap();
            Ok::<_, GenerationError>(result)
        })
    }

    fn offline() -> BoxFuture<'static, Result<GenerationResult, GenerationError>> {
        Box::pin(async {
            Err::<GenerationResult, _>(GenerationError::from(ServiceError::Transport(
                "offline".into(),
            )))
        })
    }

    async fn settle(pending: &PendingGeneration) {
        for _ in 0..100 {
            match &pending.stage {
                Stage::Running(handle) if !handle.is_finished() => {}
                _ => return,
            }
            tokio::task::yield_now().await;
        }
        panic!("generation task never finished");
    }

    #[tokio::test]
    async fn success_waits_for_the_minimum_delay() {
        let mut pending = PendingGeneration::spawn(success(), Duration::from_secs(3));
        settle(&pending).await;

        assert!(pending.poll().is_none());
        pending.advance(Duration::from_secs(2));
        assert!(pending.poll().is_none());
        pending.advance(Duration::from_secs(1));
        assert!(matches!(pending.poll(), Some(Ok(_))));
        assert!(pending.poll().is_none());
    }

    #[tokio::test]
    async fn delivered_outcome_is_never_handed_out_twice() {
        let mut pending = PendingGeneration::spawn(success(), Duration::ZERO);
        settle(&pending).await;
        assert!(matches!(pending.poll(), Some(Ok(_))));
        for _ in 0..5 {
            pending.advance(Duration::from_secs(1));
            assert!(pending.poll().is_none());
        }
        assert!(matches!(pending.stage, Stage::Delivered));

        let mut pending = PendingGeneration::spawn(offline(), Duration::from_secs(3));
        settle(&pending).await;
        assert!(matches!(pending.poll(), Some(Err(_))));
        assert!(pending.poll().is_none());
        assert!(pending.poll().is_none());
    }

    #[tokio::test]
    async fn delay_alone_reveals_nothing() {
        let mut pending = PendingGeneration::spawn(
            Box::pin(futures_util::future::pending()),
            Duration::from_millis(10),
        );
        pending.advance(Duration::from_secs(10));
        tokio::task::yield_now().await;
        assert!(pending.poll().is_none());
    }

    #[tokio::test]
    async fn failure_is_released_immediately() {
        let mut pending = PendingGeneration::spawn(offline(), Duration::from_secs(3));
        settle(&pending).await;
        assert!(matches!(
            pending.poll(),
            Some(Err(GenerationError::Service(ServiceError::Transport(_))))
        ));
    }
}
