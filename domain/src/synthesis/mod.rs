//! Synthesis document scanning.
//!
//! The synthesis step returns free-form markdown. These helpers pull out the
//! pieces the presentation layer shows separately. They are heuristics over
//! natural-language text: a missing section yields an empty value, never an
//! error.

mod parsing;

pub use parsing::{
    DIAGRAM_LANGUAGE, derive_feature_name, extract_diagram, extract_fenced_block,
    missing_sections, parse_architecture,
};

use serde::{Deserialize, Serialize};

/// A service or module named in the "Core Components" section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    /// Coarse category, e.g. "Compute", "Storage", "Service"
    pub service_type: String,
    pub responsibility: String,
}

/// A bullet from the "Trade-offs" section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOff {
    pub aspect: String,
    pub description: String,
}

/// Structured view of a synthesis document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArchitectureDocument {
    pub overview: String,
    pub components: Vec<Component>,
    pub diagram: String,
    pub trade_offs: Vec<TradeOff>,
    /// Kebab-case name derived from the problem statement
    pub feature_name: String,
}
