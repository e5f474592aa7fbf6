//! Debate value objects - immutable records produced as a debate advances.
//!
//! - [`SessionId`] - opaque identifier, stable for the debate's lifetime
//! - [`RoundNumber`] / [`RoundType`] - which pass over the panel is running
//! - [`TurnOutcome`] / [`Contribution`] - one persona's turn within a round
//! - [`RoundRecord`] - every turn of one round
//! - [`SynthesisRecord`] - the final document and its diagram
//! - [`DebateReport`] - what the caller gets back

use crate::core::persona::Persona;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Recorded in place of a persona's response when the turn failed.
pub const PERSONA_FAILURE_SENTINEL: &str = "[Response unavailable]";

/// Prompt context used when a persona's memory read fails or is empty.
pub const NO_CONTEXT_SENTINEL: &str = "[No previous context]";

/// Synthesis input used when the transcript read fails or is empty.
pub const NO_TRANSCRIPT_SENTINEL: &str = "[No debate context available]";

/// Identifier of a debate session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from the problem text and a creation instant.
    ///
    /// Format: `debate_{first 8 hex chars of sha256(problem)}_{rfc3339 timestamp}`.
    pub fn derive(problem: &str, created_at: DateTime<Utc>) -> Self {
        let digest = Sha256::digest(problem.as_bytes());
        let hash: String = digest
            .iter()
            .take(4)
            .map(|b| format!("{:02x}", b))
            .collect();
        let timestamp = created_at.to_rfc3339_opts(SecondsFormat::Micros, true);
        Self(format!("debate_{}_{}", hash, timestamp))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Label attached to a round, used only in prompt text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundType {
    Debate,
    Consensus,
}

impl RoundType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundType::Debate => "debate",
            RoundType::Consensus => "consensus",
        }
    }
}

impl std::fmt::Display for RoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the three fixed rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RoundNumber {
    One,
    Two,
    Three,
}

impl RoundNumber {
    pub const fn all() -> [RoundNumber; 3] {
        [RoundNumber::One, RoundNumber::Two, RoundNumber::Three]
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            RoundNumber::One => 1,
            RoundNumber::Two => 2,
            RoundNumber::Three => 3,
        }
    }

    /// The last round is where the panel is asked to converge.
    pub fn round_type(&self) -> RoundType {
        match self {
            RoundNumber::Three => RoundType::Consensus,
            _ => RoundType::Debate,
        }
    }

    pub fn next(&self) -> Option<RoundNumber> {
        match self {
            RoundNumber::One => Some(RoundNumber::Two),
            RoundNumber::Two => Some(RoundNumber::Three),
            RoundNumber::Three => None,
        }
    }
}

impl std::fmt::Display for RoundNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl From<RoundNumber> for u8 {
    fn from(r: RoundNumber) -> Self {
        r.as_u8()
    }
}

impl TryFrom<u8> for RoundNumber {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(RoundNumber::One),
            2 => Ok(RoundNumber::Two),
            3 => Ok(RoundNumber::Three),
            other => Err(format!("round must be 1-3, got {}", other)),
        }
    }
}

/// Result of a single persona turn.
///
/// Persona failures never escalate: a degraded turn still produces a
/// contribution, carrying [`PERSONA_FAILURE_SENTINEL`] as its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The persona answered with usable text.
    Delivered(String),
    /// The call failed or the response had no text; the round continues.
    Degraded { reason: String },
}

/// One persona's turn within a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub persona: Persona,
    /// Memory context the prompt was built from.
    pub context: String,
    /// Response text, or the failure sentinel.
    pub response: String,
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl Contribution {
    pub fn new(persona: Persona, context: impl Into<String>, outcome: TurnOutcome) -> Self {
        let context = context.into();
        match outcome {
            TurnOutcome::Delivered(text) => Self {
                persona,
                context,
                response: text,
                failed: false,
                failure_reason: None,
            },
            TurnOutcome::Degraded { reason } => Self {
                persona,
                context,
                response: PERSONA_FAILURE_SENTINEL.to_string(),
                failed: true,
                failure_reason: Some(reason),
            },
        }
    }
}

/// Every contribution of one round, in panel order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: RoundNumber,
    pub round_type: RoundType,
    pub contributions: Vec<Contribution>,
}

impl RoundRecord {
    pub fn new(round: RoundNumber) -> Self {
        Self {
            round,
            round_type: round.round_type(),
            contributions: Vec::with_capacity(Persona::panel().len()),
        }
    }

    /// The persona expected to speak next, or `None` once everyone has.
    pub fn next_speaker(&self) -> Option<Persona> {
        Persona::panel().get(self.contributions.len()).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.next_speaker().is_none()
    }

    pub fn failed_count(&self) -> usize {
        self.contributions.iter().filter(|c| c.failed).count()
    }
}

/// Output of the synthesis step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRecord {
    pub text: String,
    /// Mermaid source extracted from the text, empty when none was found.
    pub diagram: String,
}

/// Overall outcome seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebateStatus {
    Complete,
    Error,
}

impl DebateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateStatus::Complete => "complete",
            DebateStatus::Error => "error",
        }
    }
}

/// Final result of a debate
///
/// Either complete (possibly with degraded persona turns) or an error with
/// a message. There is no partial status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    pub status: DebateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<RoundRecord>,
}

impl DebateReport {
    /// An error report for input that was rejected before the debate began.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            session_id: None,
            status: DebateStatus::Error,
            problem: None,
            synthesis: None,
            diagram: None,
            error: Some(error.into()),
            rounds: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == DebateStatus::Complete
    }

    /// Total number of persona turns that fell back to the sentinel.
    pub fn degraded_turns(&self) -> usize {
        self.rounds.iter().map(|r| r.failed_count()).sum()
    }
}
