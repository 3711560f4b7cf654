use futures_util::future::BoxFuture;
use std::time::Duration;

/// Pacing delays for client animations. Outcomes never depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosmeticDelays {
    /// Between pairing (or a `newRound` request) and the round starting.
    pub match_start: Duration,
    /// Between the last player finishing and `gameOver` going out.
    pub round_over: Duration,
}

impl CosmeticDelays {
    pub fn none() -> Self {
        Self {
            match_start: Duration::ZERO,
            round_over: Duration::ZERO,
        }
    }
}

impl Default for CosmeticDelays {
    fn default() -> Self {
        Self {
            match_start: Duration::from_millis(1000),
            round_over: Duration::from_millis(1500),
        }
    }
}

/// Runs work later, off the caller's task.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>);
}

pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) {
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            task.await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_zero_delay_runs_task() {
        let (tx, rx) = oneshot::channel();
        TokioScheduler.schedule(
            Duration::ZERO,
            async move {
                let _ = tx.send(42);
            }
            .boxed(),
        );

        assert_eq!(rx.await.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_honoured() {
        let (tx, mut rx) = oneshot::channel();
        TokioScheduler.schedule(
            Duration::from_millis(1500),
            async move {
                let _ = tx.send(());
            }
            .boxed(),
        );

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(rx.try_recv().is_ok());
    }
}
