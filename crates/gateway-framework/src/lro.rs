//! # Long-Running Operations
//!
//! A backend that cannot finish an operation synchronously hands back a
//! [`Poller`]. [`LroWaiter`] drives that handle until it reaches a terminal
//! state:
//!
//! ```text
//!              poll() -> InProgress
//!               ┌──────────┐
//!               ▼          │
//!   begin ──► InProgress ──┘
//!               │    │
//!   Succeeded(T)│    │Failed(err)
//!               ▼    ▼
//!        Succeeded  Failed
//! ```
//!
//! Terminal states are never left: the waiter returns as soon as it sees one.

use crate::error::{BackendError, GatewayError};
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What a single poll of an in-flight operation reported.
#[derive(Debug, Clone, PartialEq)]
pub enum PollResponse<T> {
    /// Still running; poll again later.
    InProgress,
    /// Finished successfully with the operation's result.
    Succeeded(T),
    /// Finished with a failure.
    Failed(BackendError),
}

impl<T> PollResponse<T> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollResponse::InProgress)
    }
}

/// A pollable handle to an in-flight backend operation.
#[async_trait]
pub trait Poller: Send {
    /// The value produced when the operation succeeds.
    type Output: Send;

    /// Queries the operation once.
    async fn poll(&mut self) -> PollResponse<Self::Output>;
}

/// States of the polling state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LroState {
    InProgress,
    Succeeded,
    Failed,
}

/// Polls a [`Poller`] to completion.
#[derive(Debug, Clone, Copy)]
pub struct LroWaiter {
    poll_interval: Duration,
}

impl Default for LroWaiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl LroWaiter {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Blocks until the operation is terminal or `cancel` fires.
    ///
    /// The token is checked before each poll and interrupts the wait between polls.
    pub async fn wait<P>(
        &self,
        cancel: &CancellationToken,
        poller: &mut P,
    ) -> Result<P::Output, GatewayError>
    where
        P: Poller + ?Sized,
    {
        let mut state = LroState::InProgress;
        let mut polls: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                warn!(polls, ?state, "Cancelled while polling");
                return Err(GatewayError::Cancelled);
            }

            polls += 1;
            match poller.poll().await {
                PollResponse::InProgress => {
                    debug!(polls, ?state, "Operation in progress");
                    self.pause(cancel).await?;
                }
                PollResponse::Succeeded(output) => {
                    state = LroState::Succeeded;
                    info!(polls, ?state, "Operation finished");
                    return Ok(output);
                }
                PollResponse::Failed(e) => {
                    state = LroState::Failed;
                    warn!(polls, ?state, error = %e, "Operation failed");
                    return Err(e.into());
                }
            }
        }
    }

    async fn pause(&self, cancel: &CancellationToken) -> Result<(), GatewayError> {
        if self.poll_interval.is_zero() {
            return Ok(());
        }
        tokio::select! {
            _ = cancel.cancelled() => Err(GatewayError::Cancelled),
            _ = tokio::time::sleep(self.poll_interval) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedPoller;

    #[tokio::test]
    async fn test_in_progress_then_success() {
        let mut poller =
            ScriptedPoller::new(vec![PollResponse::InProgress, PollResponse::Succeeded(7)]);
        let polls = poller.polls();

        let result = LroWaiter::new(Duration::ZERO)
            .wait(&CancellationToken::new(), &mut poller)
            .await;

        assert_eq!(result, Ok(7));
        assert_eq!(polls.get(), 2);
    }

    #[tokio::test]
    async fn test_terminal_failure_is_returned() {
        let err = BackendError::internal("delete rejected");
        let mut poller = ScriptedPoller::<()>::new(vec![
            PollResponse::InProgress,
            PollResponse::Failed(err.clone()),
        ]);

        let result = LroWaiter::new(Duration::ZERO)
            .wait(&CancellationToken::new(), &mut poller)
            .await;

        assert_eq!(result, Err(GatewayError::Backend(err)));
        assert!(poller.is_drained());
    }

    #[tokio::test]
    async fn test_stops_at_first_terminal_response() {
        let mut poller = ScriptedPoller::new(vec![
            PollResponse::Succeeded("done"),
            PollResponse::InProgress,
        ]);
        let polls = poller.polls();

        let result = LroWaiter::new(Duration::ZERO)
            .wait(&CancellationToken::new(), &mut poller)
            .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(polls.get(), 1);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_wait_between_polls() {
        let mut poller = ScriptedPoller::<()>::new(vec![PollResponse::InProgress]);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = LroWaiter::new(Duration::from_secs(60))
            .wait(&cancel, &mut poller)
            .await;

        assert_eq!(result, Err(GatewayError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancelled_before_first_poll() {
        let mut poller = ScriptedPoller::new(vec![PollResponse::Succeeded(())]);
        let polls = poller.polls();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = LroWaiter::default().wait(&cancel, &mut poller).await;

        assert_eq!(result, Err(GatewayError::Cancelled));
        assert_eq!(polls.get(), 0);
    }
}
