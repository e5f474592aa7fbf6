//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Problem statement cannot be empty")]
    EmptyProblem,

    #[error("Problem not found: {0}")]
    UnknownProblem(String),

    #[error("Invalid retry policy: {0}")]
    InvalidRetryPolicy(String),

    #[error("Invalid debate transition: cannot {action} while {state}")]
    InvalidTransition { action: String, state: String },
}

impl DomainError {
    pub(crate) fn transition(action: impl Into<String>, state: impl std::fmt::Display) -> Self {
        DomainError::InvalidTransition {
            action: action.into(),
            state: state.to_string(),
        }
    }
}
