//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use debate_domain::{LlmResponse, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The call succeeded but the response carried no usable text.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session with a system prompt
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;

    /// Get available models
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError>;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a response
    async fn send(&self, content: &str) -> Result<LlmResponse, GatewayError>;
}

/// Text of a response, or [`GatewayError::MalformedResponse`] when it has none.
pub fn response_text(response: LlmResponse) -> Result<String, GatewayError> {
    let model = response.model.clone();
    response.into_text().ok_or_else(|| {
        GatewayError::MalformedResponse(format!(
            "no text content in response{}",
            model.map(|m| format!(" from {}", m)).unwrap_or_default()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_present() {
        let text = response_text(LlmResponse::from_text("Ship it")).unwrap();
        assert_eq!(text, "Ship it");
    }

    #[test]
    fn test_response_text_missing_is_malformed() {
        let err = response_text(LlmResponse::empty().with_model("claude-sonnet-4")).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
        assert!(err.to_string().contains("claude-sonnet-4"));
    }
}
