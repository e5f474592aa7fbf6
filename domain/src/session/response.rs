//! LLM response type.
//!
//! Every gateway returns the same explicit shape. A response without usable
//! text is a distinct condition ([`LlmResponse::text`] returns `None`), kept
//! apart from transport failures which never produce a response at all.

use serde::{Deserialize, Serialize};

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// Hit the token limit; the response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// A response from an LLM
///
/// # Examples
///
/// ```
/// use debate_domain::LlmResponse;
///
/// let response = LlmResponse::from_text("Here's the simple approach...");
/// assert_eq!(response.text().as_deref(), Some("Here's the simple approach..."));
///
/// let empty = LlmResponse::empty();
/// assert_eq!(empty.text(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LlmResponse {
    /// Text blocks in the order the provider returned them.
    pub text_blocks: Vec<String>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

impl LlmResponse {
    /// Create a single-block text response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text_blocks: vec![text.into()],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// A response that carried no text at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Concatenated text, or `None` when there is nothing but whitespace.
    pub fn text(&self) -> Option<String> {
        self.clone().into_text()
    }

    /// Take the concatenated text, or `None` when there is nothing but whitespace.
    pub fn into_text(self) -> Option<String> {
        let joined = self.text_blocks.concat();
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.stop_reason == Some(StopReason::MaxTokens)
    }
}
