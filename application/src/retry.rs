//! Bounded exponential-backoff retry
//!
//! [`RetryExecutor`] wraps any fallible async operation. It never looks at
//! the error: every `Err` is retried until the policy runs out, and the last
//! error is what the caller gets back.

use debate_domain::RetryPolicy;
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

/// Runs operations under a [`RetryPolicy`]
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Invoke `operation` until it succeeds or `max_attempts` is reached.
    ///
    /// Sleeps `min(base * 2^i, max)` after the failed attempt `i`, except
    /// after the final one. Earlier errors are discarded.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("{} succeeded on attempt {}/{}", label, attempt + 1, max_attempts);
                    }
                    return Ok(value);
                }
                Err(e) if self.policy.has_attempt_after(attempt) => {
                    let delay = self.policy.delay_after(attempt);
                    warn!(
                        "{} failed (attempt {}/{}): {}; retrying in {:?}",
                        label,
                        attempt + 1,
                        max_attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("{} failed after {} attempt(s): {}", label, max_attempts, e);
                    return Err(e);
                }
            }
        }
    }
}
