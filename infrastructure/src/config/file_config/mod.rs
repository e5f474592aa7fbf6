//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod debate;
mod memory;
mod output;
mod providers;
mod retry;

pub use debate::FileDebateConfig;
pub use memory::FileMemoryConfig;
pub use output::FileOutputConfig;
pub use providers::{FileBedrockConfig, FileProvidersConfig};
pub use retry::FileRetryConfig;

use debate_application::DebateConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A problem found in an otherwise parseable config file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("retry.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("retry.base_delay_ms ({base_ms}) exceeds retry.max_delay_ms ({max_ms})")]
    BaseDelayExceedsMax { base_ms: u64, max_ms: u64 },

    #[error("{field}: model name cannot be empty")]
    EmptyModel { field: String },

    #[error("debate.personas: unknown persona '{0}'")]
    UnknownPersona(String),

    #[error("memory.backend: unknown value '{0}' (expected 'memory' or 'jsonl')")]
    UnknownBackend(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Panel models and pacing
    pub debate: FileDebateConfig,
    /// Backoff around every collaborator call
    pub retry: FileRetryConfig,
    /// Session memory store
    pub memory: FileMemoryConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Provider settings (e.g. Bedrock credentials)
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        issues.extend(self.debate.validate());
        issues.extend(self.retry.validate());
        issues.extend(self.memory.validate());
        issues
    }

    /// Use case configuration derived from the file.
    pub fn debate_config(&self) -> DebateConfig {
        DebateConfig::default()
            .with_panel(self.debate.panel())
            .with_synthesis_model(self.debate.synthesis_model())
            .with_retry(self.retry.policy())
            .with_pacing(self.debate.pacing())
    }
}
