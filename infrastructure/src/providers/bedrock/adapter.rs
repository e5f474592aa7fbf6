//! Bedrock gateway
//!
//! Implements `LlmGateway` directly. Handles AWS credential initialization
//! and session creation.

use super::model_map;
use super::session::BedrockSession;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use debate_application::{GatewayError, LlmGateway, LlmSession};
use debate_domain::{BedrockProviderConfig, Model};
use std::sync::Arc;
use tracing::{info, warn};

pub struct BedrockGateway {
    client: Arc<BedrockClient>,
    region: String,
    max_tokens: i32,
    cross_region: bool,
}

impl BedrockGateway {
    /// Create a new Bedrock gateway.
    ///
    /// Loads AWS credentials from the default chain (optionally a named
    /// profile) and creates a Bedrock Runtime client.
    pub async fn new(config: &BedrockProviderConfig) -> Result<Self, GatewayError> {
        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref profile) = config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        let aws_config = aws_config_loader.load().await;
        if aws_config.credentials_provider().is_none() {
            return Err(GatewayError::ConnectionError(
                "no AWS credentials provider configured".to_string(),
            ));
        }
        let client = BedrockClient::new(&aws_config);

        Ok(Self {
            client: Arc::new(client),
            region: config.region.clone(),
            max_tokens: i32::try_from(config.max_tokens).unwrap_or(i32::MAX),
            cross_region: config.cross_region.unwrap_or(false),
        })
    }

    /// Try to create a new Bedrock gateway.
    ///
    /// Returns `None` if AWS credential initialization fails.
    pub async fn try_new(config: &BedrockProviderConfig) -> Option<Self> {
        match Self::new(config).await {
            Ok(gateway) => {
                info!(region = %gateway.region, "Bedrock provider initialized");
                Some(gateway)
            }
            Err(e) => {
                warn!("Bedrock provider not available: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl LlmGateway for BedrockGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let bedrock_model_id =
            model_map::to_bedrock_model_id(model, self.cross_region, &self.region);

        Ok(Box::new(BedrockSession::new(
            self.client.clone(),
            model.clone(),
            bedrock_model_id,
            Some(system_prompt.to_string()),
            self.max_tokens,
        )))
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(Model::known_models())
    }
}
