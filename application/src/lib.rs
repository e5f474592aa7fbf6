//! Application layer for disagree-commit
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod retry;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DebateConfig, PanelModels};
pub use ports::{
    debate_memory::{DebateMemory, MemoryError},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, response_text},
    progress::{DebateProgressNotifier, NoProgress},
};
pub use retry::RetryExecutor;
pub use use_cases::run_debate::{ProblemSource, RunDebateError, RunDebateInput, RunDebateUseCase};
