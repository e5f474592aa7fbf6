//! LLM session domain.
//!
//! - [`response::LlmResponse`]: the single response shape every gateway returns

pub mod response;
