//! Retry configuration from TOML (`[retry]` section)

use super::ConfigValidationError;
use debate_domain::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw retry configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: RetryPolicy::DEFAULT_BASE_DELAY.as_millis() as u64,
            max_delay_ms: RetryPolicy::DEFAULT_MAX_DELAY.as_millis() as u64,
        }
    }
}

impl FileRetryConfig {
    /// Build the policy, falling back to the default when the values are unusable.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
        .unwrap_or_default()
    }

    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        if self.max_attempts == 0 {
            issues.push(ConfigValidationError::ZeroAttempts);
        }
        if self.base_delay_ms > self.max_delay_ms {
            issues.push(ConfigValidationError::BaseDelayExceedsMax {
                base_ms: self.base_delay_ms,
                max_ms: self.max_delay_ms,
            });
        }
        issues
    }
}
