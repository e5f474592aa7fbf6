//! Retry policy value object
//!
//! Bounded exponential backoff for collaborator calls. The policy is pure
//! data; the executor that applies it lives in the application layer.

use crate::core::error::DomainError;
use std::num::NonZeroU32;
use std::time::Duration;

/// Bounded exponential backoff (Value Object)
///
/// `max_attempts` is at least 1 by construction. The wait after the
/// zero-based failed attempt `i` is `min(base_delay * 2^i, max_delay)`.
///
/// # Examples
///
/// ```
/// use debate_domain::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_secs(1), Duration::from_secs(10)).unwrap();
/// assert_eq!(policy.delay_after(0), Duration::from_secs(1));
/// assert_eq!(policy.delay_after(1), Duration::from_secs(2));
/// assert_eq!(policy.delay_after(4), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: NonZeroU32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

    /// Create a policy, rejecting `max_attempts == 0`.
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
    ) -> Result<Self, DomainError> {
        let max_attempts = NonZeroU32::new(max_attempts).ok_or_else(|| {
            DomainError::InvalidRetryPolicy("max_attempts must be at least 1".to_string())
        })?;
        Ok(Self {
            max_attempts,
            base_delay,
            max_delay,
        })
    }

    /// Try once, propagate the first failure.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: NonZeroU32::MIN,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.get()
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Backoff after the zero-based failed attempt `attempt_index`.
    ///
    /// Saturates at `max_delay` instead of overflowing for large indices.
    pub fn delay_after(&self, attempt_index: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt_index);
        factor
            .and_then(|f| self.base_delay.checked_mul(f))
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Backoff waited before the zero-based attempt `attempt` (`attempt >= 1`).
    ///
    /// The first attempt never waits.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        match attempt {
            0 => Duration::ZERO,
            n => self.delay_after(n - 1),
        }
    }

    /// Whether another attempt follows the zero-based attempt `attempt_index`.
    pub fn has_attempt_after(&self, attempt_index: u32) -> bool {
        attempt_index + 1 < self.max_attempts.get()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: NonZeroU32::new(Self::DEFAULT_MAX_ATTEMPTS).unwrap_or(NonZeroU32::MIN),
            base_delay: Self::DEFAULT_BASE_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
        }
    }
}
