//! Bedrock LLM session implementation
//!
//! Wraps the AWS Bedrock Converse API to implement the `LlmSession` trait.
//! Manages conversation history locally since the Converse API is stateless.

use super::types;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types as bedrock;
use debate_application::{GatewayError, LlmSession};
use debate_domain::{LlmResponse, Model};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub struct BedrockSession {
    client: Arc<BedrockClient>,
    model: Model,
    bedrock_model_id: String,
    system_prompt: Option<String>,
    max_tokens: i32,
    /// Conversation history (stateless API requires full history each call)
    messages: Mutex<Vec<bedrock::Message>>,
}

impl BedrockSession {
    pub fn new(
        client: Arc<BedrockClient>,
        model: Model,
        bedrock_model_id: String,
        system_prompt: Option<String>,
        max_tokens: i32,
    ) -> Self {
        Self {
            client,
            model,
            bedrock_model_id,
            system_prompt,
            max_tokens,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Build the system prompt as a SystemContentBlock list.
    fn system_blocks(&self) -> Vec<bedrock::SystemContentBlock> {
        match &self.system_prompt {
            Some(prompt) if !prompt.is_empty() => {
                vec![bedrock::SystemContentBlock::Text(prompt.clone())]
            }
            _ => vec![],
        }
    }

    /// Execute a Converse API call with the current message history.
    async fn converse(&self, messages: &[bedrock::Message]) -> Result<LlmResponse, GatewayError> {
        debug!(
            model = %self.bedrock_model_id,
            messages = messages.len(),
            "Calling Bedrock Converse API"
        );

        let response = self
            .client
            .converse()
            .model_id(&self.bedrock_model_id)
            .set_system(Some(self.system_blocks()))
            .set_messages(Some(messages.to_vec()))
            .inference_config(
                bedrock::InferenceConfiguration::builder()
                    .max_tokens(self.max_tokens)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        let stop_reason = response.stop_reason();
        let output = response.output().ok_or_else(|| {
            GatewayError::MalformedResponse("No output in Bedrock response".to_string())
        })?;

        Ok(types::convert_converse_output(
            output,
            stop_reason,
            &self.bedrock_model_id,
        ))
    }

    fn text_message(
        role: bedrock::ConversationRole,
        text: String,
    ) -> Result<bedrock::Message, GatewayError> {
        bedrock::Message::builder()
            .role(role)
            .content(bedrock::ContentBlock::Text(text))
            .build()
            .map_err(|e| GatewayError::RequestFailed(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl LlmSession for BedrockSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<LlmResponse, GatewayError> {
        let mut messages = self.messages.lock().await;
        messages.push(Self::text_message(
            bedrock::ConversationRole::User,
            content.to_string(),
        )?);

        let response = match self.converse(&messages).await {
            Ok(response) => response,
            Err(e) => {
                // Keep history alternating user/assistant for the next attempt
                messages.pop();
                return Err(e);
            }
        };

        if let Some(text) = response.text() {
            messages.push(Self::text_message(
                bedrock::ConversationRole::Assistant,
                text,
            )?);
        } else {
            messages.pop();
        }

        Ok(response)
    }
}
