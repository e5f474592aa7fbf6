//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: LLM models a persona can be bound to
//! - [`persona::Persona`]: the fixed panel of debaters
//! - [`problem::ProblemStatement`]: a validated problem to debate
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod persona;
pub mod problem;
