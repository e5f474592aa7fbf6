//! LLM gateway implementations
//!
//! - [`offline::OfflineGateway`]: deterministic canned replies, no network
//! - `bedrock::BedrockGateway`: AWS Bedrock Converse API (feature `bedrock`)

pub mod offline;

#[cfg(feature = "bedrock")]
pub mod bedrock;
