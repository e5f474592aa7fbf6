//! Provider configuration from TOML (`[providers]` section)

use debate_domain::BedrockProviderConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// AWS region for Bedrock models (default: "us-east-1")
    pub region: String,
    /// AWS profile name for credentials
    pub profile: Option<String>,
    /// Max Tokens per response (default: 2048)
    pub max_tokens: u32,
    /// Route every model through a cross-region inference profile
    pub cross_region: bool,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        let defaults = BedrockProviderConfig::default();
        Self {
            region: defaults.region,
            profile: defaults.profile,
            max_tokens: defaults.max_tokens,
            cross_region: false,
        }
    }
}

impl FileBedrockConfig {
    pub fn to_provider_config(&self) -> BedrockProviderConfig {
        BedrockProviderConfig {
            region: self.region.clone(),
            profile: self.profile.clone(),
            max_tokens: self.max_tokens,
            cross_region: Some(self.cross_region),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// AWS Bedrock settings.
    pub bedrock: FileBedrockConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bedrock_section() {
        let toml_str = r#"
[bedrock]
region = "eu-west-1"
profile = "panel"
"#;
        let config: FileProvidersConfig = toml::from_str(toml_str).unwrap();
        let provider = config.bedrock.to_provider_config();
        assert_eq!(provider.region, "eu-west-1");
        assert_eq!(provider.profile.as_deref(), Some("panel"));
        assert_eq!(provider.max_tokens, 2048);
        assert_eq!(provider.cross_region, Some(false));
    }
}
