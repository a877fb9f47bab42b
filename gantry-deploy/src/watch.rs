//! Observation state machine
//!
//! Shared polling core for the deploy and run paths: a fixed-interval poll
//! loop racing a hard wall-clock deadline. The deadline is realized as a
//! single cancellation-aware future; when it fires, the loop future is
//! dropped immediately, even mid-poll, and no further control-plane calls
//! are made.
//!
//! The machine is generic over the failure detail `D` each path attaches to
//! a terminal-but-unsuccessful observation: a rollout failure reason on the
//! deploy path, a container exit code on the run path.

use std::future::Future;
use std::time::Duration;

use gantry_client::ClientError;
use tokio::time;
use tracing::warn;

/// Fixed spacing between polls. Deliberately constant, no backoff or
/// jitter.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// What one poll concluded about the observed entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PollVerdict<D> {
    /// Not every entity is terminal yet, or evaluation was inconclusive
    Pending,
    /// All entities terminal and every success predicate held
    Succeeded,
    /// All entities terminal and at least one failed evaluation
    Failed(D),
}

/// Terminal result of an observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WatchOutcome<D> {
    Succeeded,
    Failed(D),
    TimedOut,
}

/// Poll `poll` every [`POLL_INTERVAL`] until it reaches a terminal verdict
/// or `deadline` elapses
///
/// A poll that returns `Err` is a transient read of an eventually-consistent
/// control plane: it is logged and retried on the next tick, never surfaced.
pub(crate) async fn observe<D, F, Fut>(deadline: Duration, mut poll: F) -> WatchOutcome<D>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollVerdict<D>, ClientError>>,
{
    let cycle = async {
        loop {
            time::sleep(POLL_INTERVAL).await;

            match poll().await {
                Ok(PollVerdict::Pending) => {}
                Ok(PollVerdict::Succeeded) => return WatchOutcome::Succeeded,
                Ok(PollVerdict::Failed(detail)) => return WatchOutcome::Failed(detail),
                Err(error) => warn!(%error, "status poll failed, retrying on next tick"),
            }
        }
    };

    match time::timeout(deadline, cycle).await {
        Ok(outcome) => outcome,
        Err(_) => WatchOutcome::TimedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn scripted(
        polls: Vec<Result<PollVerdict<i64>, ClientError>>,
    ) -> impl FnMut() -> std::future::Ready<Result<PollVerdict<i64>, ClientError>> {
        let polls = Arc::new(Mutex::new(VecDeque::from(polls)));
        move || {
            let next = polls
                .lock()
                .unwrap()
                .pop_front()
                .expect("observation polled more often than scripted");
            std::future::ready(next)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_once_all_entities_converge() {
        let outcome = observe(
            Duration::from_secs(60),
            scripted(vec![
                Ok(PollVerdict::Pending),
                Ok(PollVerdict::Pending),
                Ok(PollVerdict::Succeeded),
            ]),
        )
        .await;

        assert_eq!(outcome, WatchOutcome::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_failure_stops_polling() {
        let outcome = observe(
            Duration::from_secs(60),
            scripted(vec![
                Ok(PollVerdict::Pending),
                Ok(PollVerdict::Failed(1)),
            ]),
        )
        .await;

        assert_eq!(outcome, WatchOutcome::Failed(1));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_poll_error_is_retried() {
        let outcome = observe(
            Duration::from_secs(60),
            scripted(vec![
                Err(ClientError::api_error(503, "backend flake")),
                Ok(PollVerdict::Pending),
                Ok(PollVerdict::Succeeded),
            ]),
        )
        .await;

        assert_eq!(outcome, WatchOutcome::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_wins_over_a_pending_poll() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);

        let outcome: WatchOutcome<i64> = observe(Duration::from_secs(12), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(PollVerdict::Pending))
        })
        .await;

        assert_eq!(outcome, WatchOutcome::TimedOut);
        // Polls at t=5 and t=10; the deadline at t=12 fires before the next.
        assert_eq!(polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn no_polls_are_issued_after_the_deadline() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);

        let outcome: WatchOutcome<i64> = observe(Duration::from_secs(3), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(PollVerdict::Pending))
        })
        .await;

        assert_eq!(outcome, WatchOutcome::TimedOut);
        // The deadline fired during the first sleep.
        assert_eq!(polls.load(Ordering::SeqCst), 0);
    }
}
