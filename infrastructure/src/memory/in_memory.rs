//! Process-local debate memory

use super::{MemoryEntry, format_transcript};
use async_trait::async_trait;
use chrono::Utc;
use debate_application::{DebateMemory, MemoryError};
use debate_domain::{ProblemStatement, RoundNumber, SessionId};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Keeps every session in a map for the lifetime of the process.
#[derive(Default)]
pub struct InMemoryDebateMemory {
    sessions: Mutex<HashMap<SessionId, Vec<MemoryEntry>>>,
}

impl InMemoryDebateMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored entries of a session, oldest first.
    pub async fn entries(&self, session: &SessionId) -> Option<Vec<MemoryEntry>> {
        self.sessions.lock().await.get(session).cloned()
    }

    async fn transcript(&self, session: &SessionId) -> Result<String, MemoryError> {
        let sessions = self.sessions.lock().await;
        let entries = sessions
            .get(session)
            .ok_or_else(|| MemoryError::UnknownSession(session.to_string()))?;
        Ok(format_transcript(entries))
    }
}

#[async_trait]
impl DebateMemory for InMemoryDebateMemory {
    async fn create_session(&self, problem: &ProblemStatement) -> Result<SessionId, MemoryError> {
        let mut sessions = self.sessions.lock().await;
        let base = SessionId::derive(problem.content(), Utc::now());
        let mut id = base.clone();
        let mut n = 1;
        while sessions.contains_key(&id) {
            n += 1;
            id = SessionId::new(format!("{}_{}", base, n));
        }
        sessions.insert(id.clone(), Vec::new());
        debug!("Created in-memory session {}", id);
        Ok(id)
    }

    async fn append(
        &self,
        session: &SessionId,
        actor: &str,
        round: RoundNumber,
        content: &str,
    ) -> Result<(), MemoryError> {
        let mut sessions = self.sessions.lock().await;
        let entries = sessions
            .get_mut(session)
            .ok_or_else(|| MemoryError::UnknownSession(session.to_string()))?;
        entries.push(MemoryEntry::new(actor, round.as_u8(), content));
        Ok(())
    }

    async fn read(&self, session: &SessionId, _actor: &str) -> Result<String, MemoryError> {
        self.transcript(session).await
    }

    async fn read_all(&self, session: &SessionId) -> Result<String, MemoryError> {
        self.transcript(session).await
    }
}
