//! Infrastructure layer for disagree-commit
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod memory;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDebateConfig, FileMemoryConfig,
    FileOutputConfig, FileProvidersConfig, FileRetryConfig,
};
pub use memory::{InMemoryDebateMemory, JsonlDebateMemory, MemoryBackend, MemoryEntry};
pub use providers::offline::OfflineGateway;

#[cfg(feature = "bedrock")]
pub use providers::bedrock::BedrockGateway;
