//! # Bounded Retry
//!
//! [`RetryPolicy`] wraps one backend call and re-issues it while the backend
//! keeps reporting a transient failure, up to a fixed number of attempts.
//!
//! Classification lives in [`classify`] and nowhere else: a call site never
//! inspects codes itself to decide whether to try again.

use crate::error::{BackendError, Code, GatewayError};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Whether a failed call may be re-issued unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retriability {
    Transient,
    Permanent,
}

/// Sorts a backend failure into [`Retriability::Transient`] or
/// [`Retriability::Permanent`]. Only `Unavailable` is transient.
pub fn classify(err: &BackendError) -> Retriability {
    match err.code {
        Code::Unavailable => Retriability::Transient,
        _ => Retriability::Permanent,
    }
}

/// Retries a call on transient failures, at most `max_attempts` times in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// One initial attempt plus two retries.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Creates a policy with the given ceiling. A ceiling of zero still makes one attempt.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Runs `call` until it succeeds, fails permanently, or the attempts run out.
    ///
    /// The token is checked before every attempt. When the attempts are
    /// exhausted the last transient error is returned.
    pub async fn run<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut call: F,
    ) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let mut last_err = None;
        for attempt in 1..=self.max_attempts {
            if cancel.is_cancelled() {
                debug!(attempt, "Cancelled before attempt");
                return Err(GatewayError::Cancelled);
            }

            match call().await {
                Ok(value) => return Ok(value),
                Err(e) => match classify(&e) {
                    Retriability::Transient => {
                        warn!(attempt, max_attempts = self.max_attempts, error = %e, "Transient failure");
                        last_err = Some(e);
                    }
                    Retriability::Permanent => {
                        debug!(attempt, error = %e, "Permanent failure, not retrying");
                        return Err(e.into());
                    }
                },
            }
        }

        match last_err {
            Some(e) => {
                warn!(max_attempts = self.max_attempts, "Retries exhausted");
                Err(e.into())
            }
            None => Err(GatewayError::InvalidArgument(
                "retry policy made no attempts".to_string(),
            )),
        }
    }
}
