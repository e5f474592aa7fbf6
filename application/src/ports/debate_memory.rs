//! Debate memory port
//!
//! Session-scoped storage for what each persona has said. The debate reads
//! from it to build every prompt and writes each contribution back.

use async_trait::async_trait;
use debate_domain::{ProblemStatement, RoundNumber, SessionId};
use thiserror::Error;

/// Errors that can occur during memory operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Memory store unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt memory record: {0}")]
    Corrupt(String),
}

/// Session memory for a debate
///
/// `actor` is the persona id (see [`debate_domain::Persona::id`]).
#[async_trait]
pub trait DebateMemory: Send + Sync {
    /// Open a new session for a problem and return its id.
    async fn create_session(&self, problem: &ProblemStatement) -> Result<SessionId, MemoryError>;

    /// Record one contribution.
    async fn append(
        &self,
        session: &SessionId,
        actor: &str,
        round: RoundNumber,
        content: &str,
    ) -> Result<(), MemoryError>;

    /// Context visible to `actor`. May be empty.
    async fn read(&self, session: &SessionId, actor: &str) -> Result<String, MemoryError>;

    /// The whole session transcript. May be empty.
    async fn read_all(&self, session: &SessionId) -> Result<String, MemoryError>;
}
