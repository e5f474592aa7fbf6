//! JSONL-backed debate memory.
//!
//! Each session is one file, `{dir}/{session_id}.jsonl`. Every line is a
//! JSON object with a `type` field and `timestamp`:
//!
//! ```text
//! {"type":"session_created","timestamp":"...","session_id":"debate_...","problem":"..."}
//! {"type":"contribution","timestamp":"...","actor":"jeff_barr","round":1,"content":"..."}
//! ```

use super::{MemoryEntry, format_transcript};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use debate_application::{DebateMemory, MemoryError};
use debate_domain::{ProblemStatement, RoundNumber, SessionId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record {
    SessionCreated {
        timestamp: DateTime<Utc>,
        session_id: SessionId,
        problem: String,
    },
    Contribution {
        timestamp: DateTime<Utc>,
        actor: String,
        round: u8,
        content: String,
    },
}

/// Debate memory persisted as one JSONL file per session.
///
/// Writes are serialized through a lock so lines never interleave.
pub struct JsonlDebateMemory {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlDebateMemory {
    /// Create a store rooted at `dir`. The directory is created lazily.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a session. `:` from the timestamp is replaced so the
    /// name is valid on every platform.
    pub fn session_path(&self, session: &SessionId) -> PathBuf {
        let name: String = session
            .as_str()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || "-_.".contains(c) { c } else { '-' })
            .collect();
        self.dir.join(format!("{}.jsonl", name))
    }

    /// Stored contributions of a session, oldest first.
    pub async fn entries(&self, session: &SessionId) -> Result<Vec<MemoryEntry>, MemoryError> {
        let path = self.session_path(session);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MemoryError::UnknownSession(session.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(line) {
                Ok(Record::Contribution {
                    timestamp,
                    actor,
                    round,
                    content,
                }) => entries.push(MemoryEntry {
                    actor,
                    round,
                    content,
                    timestamp,
                }),
                Ok(Record::SessionCreated { .. }) => {}
                Err(e) => warn!("Skipping line {} of {}: {}", i + 1, path.display(), e),
            }
        }
        Ok(entries)
    }

    async fn write_record(
        &self,
        path: &Path,
        record: &Record,
        create_new: bool,
    ) -> Result<(), MemoryError> {
        let line = serde_json::to_string(record)
            .map_err(|e| MemoryError::Corrupt(format!("cannot encode record: {}", e)))?;

        let _guard = self.write_lock.lock().await;
        let mut options = tokio::fs::OpenOptions::new();
        if create_new {
            options.write(true).create_new(true);
        } else {
            options.append(true);
        }
        let mut file = options.open(path).await.map_err(|e| {
            if !create_new && e.kind() == std::io::ErrorKind::NotFound {
                MemoryError::UnknownSession(path.display().to_string())
            } else {
                MemoryError::Io(e)
            }
        })?;
        file.write_all(format!("{}\n", line).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn transcript(&self, session: &SessionId) -> Result<String, MemoryError> {
        Ok(format_transcript(&self.entries(session).await?))
    }
}

#[async_trait]
impl DebateMemory for JsonlDebateMemory {
    async fn create_session(&self, problem: &ProblemStatement) -> Result<SessionId, MemoryError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let now = Utc::now();
        let base = SessionId::derive(problem.content(), now);
        let mut id = base.clone();
        let mut n = 1;
        while tokio::fs::try_exists(self.session_path(&id)).await? {
            n += 1;
            id = SessionId::new(format!("{}_{}", base, n));
        }

        let path = self.session_path(&id);
        self.write_record(
            &path,
            &Record::SessionCreated {
                timestamp: now,
                session_id: id.clone(),
                problem: problem.content().to_string(),
            },
            true,
        )
        .await?;
        debug!("Created session file {}", path.display());
        Ok(id)
    }

    async fn append(
        &self,
        session: &SessionId,
        actor: &str,
        round: RoundNumber,
        content: &str,
    ) -> Result<(), MemoryError> {
        let record = Record::Contribution {
            timestamp: Utc::now(),
            actor: actor.to_string(),
            round: round.as_u8(),
            content: content.to_string(),
        };
        self.write_record(&self.session_path(session), &record, false)
            .await
    }

    async fn read(&self, session: &SessionId, _actor: &str) -> Result<String, MemoryError> {
        self.transcript(session).await
    }

    async fn read_all(&self, session: &SessionId) -> Result<String, MemoryError> {
        self.transcript(session).await
    }
}
