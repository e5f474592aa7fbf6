//! Output format value object

use serde::{Deserialize, Serialize};

/// How a debate report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every round, then the synthesis (default)
    #[default]
    Full,
    /// Only the final synthesis
    Synthesis,
    /// JSON output
    Json,
}
