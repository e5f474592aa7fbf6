//! Configuration file loading for disagree-commit
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DISAGREE_COMMIT_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./debate.toml` or `./.debate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/disagree-commit/config.toml`
//! 5. Fallback: `~/.config/disagree-commit/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBedrockConfig, FileConfig, FileDebateConfig, FileMemoryConfig,
    FileOutputConfig, FileProvidersConfig, FileRetryConfig,
};
pub use loader::ConfigLoader;
