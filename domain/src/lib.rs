//! Domain layer for disagree-commit
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Panel Debate
//!
//! Three personas argue about a problem statement over a fixed sequence of
//! rounds, then a synthesis step folds the whole transcript into a single
//! architecture document:
//!
//! ```text
//! Created → Round 1 → Round 2 → Round 3 (consensus) → Synthesizing → Complete
//!    │                                                      │
//!    └──────────────────────── Failed ◄─────────────────────┘
//! ```
//!
//! ## Retry Policy
//!
//! Every collaborator call (persona, memory, synthesis) runs under a bounded
//! exponential backoff described by [`RetryPolicy`].

pub mod catalog;
pub mod config;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod providers;
pub mod retry;
pub mod session;
pub mod synthesis;

// Re-export commonly used types
pub use catalog::{CannedProblem, ProblemCatalog};
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model, persona::Persona, problem::ProblemStatement};
pub use debate::{
    entities::{DebateSession, DebateState, FailureReason},
    value_objects::{
        Contribution, DebateReport, DebateStatus, RoundNumber, RoundRecord, RoundType, SessionId,
        SynthesisRecord, TurnOutcome,
    },
};
pub use prompt::PromptTemplate;
pub use providers::BedrockProviderConfig;
pub use retry::RetryPolicy;
pub use session::response::{LlmResponse, StopReason};
pub use synthesis::{
    ArchitectureDocument, Component, TradeOff, derive_feature_name, extract_diagram,
    missing_sections, parse_architecture,
};
