//! Bedrock model ID mapping
//!
//! Maps domain `Model` variants to Bedrock model identifiers,
//! with optional cross-region inference prefix.

use debate_domain::Model;

/// Convert a domain Model to a Bedrock model ID string.
///
/// - Models that require inference profiles (e.g. Claude 4.6) always use
///   the region-group prefix (`us.`, `eu.`, etc.) regardless of `cross_region`.
/// - When `cross_region` is true, other models get the same prefix so
///   requests can be served from any region in the group.
pub fn to_bedrock_model_id(model: &Model, cross_region: bool, region: &str) -> String {
    let base_id = match model {
        Model::ClaudeSonnet46 => "anthropic.claude-sonnet-4-6",
        Model::ClaudeOpus46 => "anthropic.claude-opus-4-6-v1",
        Model::ClaudeSonnet45 => "anthropic.claude-sonnet-4-5-20250929-v1:0",
        Model::ClaudeHaiku45 => "anthropic.claude-haiku-4-5-20250929-v1:0",
        Model::ClaudeOpus45 => "anthropic.claude-opus-4-20250514-v1:0",
        Model::ClaudeSonnet4 => "anthropic.claude-sonnet-4-20250514-v1:0",
        Model::Custom(id) => return id.clone(),
    };

    if cross_region || requires_inference_profile(model) {
        let prefix = inference_profile_prefix(region);
        format!("{prefix}.{base_id}")
    } else {
        base_id.to_string()
    }
}

/// Whether a model requires an inference profile (cannot use on-demand throughput).
fn requires_inference_profile(model: &Model) -> bool {
    matches!(model, Model::ClaudeSonnet46 | Model::ClaudeOpus46)
}

/// Derive the inference profile region group from an AWS region string.
///
/// Cross-region inference profiles use continent-level prefixes:
/// `us-east-1` → `us`, `eu-west-1` → `eu`, `ap-northeast-1` → `ap`, etc.
fn inference_profile_prefix(region: &str) -> &str {
    match region.split('-').next() {
        Some(prefix @ ("us" | "eu" | "ap" | "me" | "sa" | "ca" | "af")) => prefix,
        _ => "us",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_demand_ids() {
        let cases = [
            (Model::ClaudeSonnet45, "anthropic.claude-sonnet-4-5-20250929-v1:0"),
            (Model::ClaudeHaiku45, "anthropic.claude-haiku-4-5-20250929-v1:0"),
            (Model::ClaudeOpus45, "anthropic.claude-opus-4-20250514-v1:0"),
            (Model::ClaudeSonnet4, "anthropic.claude-sonnet-4-20250514-v1:0"),
        ];
        for (model, expected) in cases {
            assert_eq!(to_bedrock_model_id(&model, false, "us-east-1"), expected);
        }
    }

    #[test]
    fn test_inference_profile_models_always_prefixed() {
        assert_eq!(
            to_bedrock_model_id(&Model::ClaudeSonnet46, false, "us-east-1"),
            "us.anthropic.claude-sonnet-4-6"
        );
        assert_eq!(
            to_bedrock_model_id(&Model::ClaudeSonnet46, false, "eu-west-1"),
            "eu.anthropic.claude-sonnet-4-6"
        );
        assert_eq!(
            to_bedrock_model_id(&Model::ClaudeOpus46, false, "ap-northeast-1"),
            "ap.anthropic.claude-opus-4-6-v1"
        );
    }

    #[test]
    fn test_cross_region_prefix() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet45, true, "us-west-2");
        assert_eq!(id, "us.anthropic.claude-sonnet-4-5-20250929-v1:0");

        let id = to_bedrock_model_id(&Model::ClaudeHaiku45, true, "eu-central-1");
        assert_eq!(id, "eu.anthropic.claude-haiku-4-5-20250929-v1:0");
    }

    #[test]
    fn test_custom_model_passthrough() {
        let model = Model::Custom("my-model".to_string());
        assert_eq!(to_bedrock_model_id(&model, false, "us-east-1"), "my-model");
        assert_eq!(to_bedrock_model_id(&model, true, "us-west-2"), "my-model");
    }

    #[test]
    fn test_unknown_region_group_falls_back_to_us() {
        let id = to_bedrock_model_id(&Model::ClaudeOpus46, false, "local");
        assert_eq!(id, "us.anthropic.claude-opus-4-6-v1");
    }
}
