//! Persona value object: the fixed panel of debaters

use serde::{Deserialize, Serialize};

/// A debater on the panel (Value Object)
///
/// Each persona is an LLM invocation target bound to a fixed character
/// prompt (see [`crate::PromptTemplate::persona_system`]). The panel order is
/// part of the debate contract: every round walks [`Persona::panel`] front to
/// back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Serverless and simplicity advocate
    JeffBarr,
    /// Time-to-market and AI/ML advocate
    Swami,
    /// Distributed systems and operational rigor
    WernerVogels,
}

impl Persona {
    /// The panel in speaking order.
    pub const fn panel() -> [Persona; 3] {
        [Persona::JeffBarr, Persona::Swami, Persona::WernerVogels]
    }

    /// Stable actor id used as the memory key.
    pub fn id(&self) -> &'static str {
        match self {
            Persona::JeffBarr => "jeff_barr",
            Persona::Swami => "swami",
            Persona::WernerVogels => "werner_vogels",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::JeffBarr => "Jeff Barr",
            Persona::Swami => "Swami Sivasubramanian",
            Persona::WernerVogels => "Werner Vogels",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jeff_barr" | "jeff" => Ok(Persona::JeffBarr),
            "swami" => Ok(Persona::Swami),
            "werner_vogels" | "werner" => Ok(Persona::WernerVogels),
            other => Err(format!("unknown persona: {}", other)),
        }
    }
}
