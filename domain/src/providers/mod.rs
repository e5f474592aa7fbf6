//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.).

/// AWS Bedrock provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedrockProviderConfig {
    /// AWS region (default: "us-east-1").
    pub region: String,
    /// AWS profile name for credentials.
    pub profile: Option<String>,
    /// Max tokens per response (default: 2048; a turn is ~200 words).
    pub max_tokens: u32,
    /// Enable cross-region inference.
    pub cross_region: Option<bool>,
}

impl Default for BedrockProviderConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
            max_tokens: 2048,
            cross_region: None,
        }
    }
}
