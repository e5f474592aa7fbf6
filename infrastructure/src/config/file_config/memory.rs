//! Memory configuration from TOML (`[memory]` section)

use super::ConfigValidationError;
use crate::memory::MemoryBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw memory configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMemoryConfig {
    /// `memory` (process-local) or `jsonl` (one file per session)
    pub backend: String,
    /// Directory for `jsonl` sessions
    pub dir: Option<PathBuf>,
}

impl Default for FileMemoryConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            dir: None,
        }
    }
}

impl FileMemoryConfig {
    pub fn parse_backend(&self) -> Option<MemoryBackend> {
        self.backend.parse().ok()
    }

    /// Session directory, defaulting to the platform data dir.
    pub fn session_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|d| d.join("disagree-commit").join("sessions"))
                .unwrap_or_else(|| PathBuf::from(".disagree-commit/sessions"))
        })
    }

    pub fn validate(&self) -> Vec<ConfigValidationError> {
        match self.parse_backend() {
            Some(_) => Vec::new(),
            None => vec![ConfigValidationError::UnknownBackend(self.backend.clone())],
        }
    }
}
