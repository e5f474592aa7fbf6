//! Debate memory stores
//!
//! Two implementations of the [`DebateMemory`](debate_application::DebateMemory)
//! port. Both render the same transcript shape:
//!
//! ```text
//! [jeff_barr - Round 1]: Here's the simple approach...
//!
//! [swami - Round 1]: We can ship this in weeks...
//! ```

mod in_memory;
mod jsonl;

pub use in_memory::InMemoryDebateMemory;
pub use jsonl::JsonlDebateMemory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most recent entries included in a transcript read.
pub const TRANSCRIPT_LIMIT: usize = 50;

/// Which store backs the debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryBackend {
    /// Process-local, gone when the run ends
    #[default]
    InMemory,
    /// One JSONL file per session
    Jsonl,
}

impl std::str::FromStr for MemoryBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "in_memory" => Ok(MemoryBackend::InMemory),
            "jsonl" | "file" => Ok(MemoryBackend::Jsonl),
            other => Err(format!("unknown memory backend: {}", other)),
        }
    }
}

/// One stored contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub actor: String,
    pub round: u8,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl MemoryEntry {
    pub fn new(actor: impl Into<String>, round: u8, content: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            round,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Render the last [`TRANSCRIPT_LIMIT`] entries, oldest first.
pub fn format_transcript(entries: &[MemoryEntry]) -> String {
    let start = entries.len().saturating_sub(TRANSCRIPT_LIMIT);
    entries[start..]
        .iter()
        .map(|e| format!("[{} - Round {}]: {}", e.actor, e.round, e.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
