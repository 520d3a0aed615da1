use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use rehearse_core::model::{ArchiveRecord, RecordId};

/// Errors surfaced by archive storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the session archive.
///
/// The archive is append-only from the caller's point of view: records are
/// immutable once stored and there is no update-in-place operation.
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// All records, most recent first (`created_at` descending; insertion
    /// order breaks ties). Underlying storage keeps insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn list(&self) -> Result<Vec<ArchiveRecord>, StorageError>;

    /// Adds a record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append(&self, record: &ArchiveRecord) -> Result<(), StorageError>;

    /// Deletes the record with the given id. A missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    async fn remove(&self, id: RecordId) -> Result<(), StorageError>;
}

/// Returns records most-recent-first without disturbing insertion order.
pub(crate) fn most_recent_first(records: &[ArchiveRecord]) -> Vec<ArchiveRecord> {
    let mut out: Vec<ArchiveRecord> = records.to_vec();
    out.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    out
}

/// Simple in-memory archive for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryArchive {
    records: Arc<Mutex<Vec<ArchiveRecord>>>,
}

impl InMemoryArchive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArchiveRepository for InMemoryArchive {
    async fn list(&self) -> Result<Vec<ArchiveRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(most_recent_first(&guard))
    }

    async fn append(&self, record: &ArchiveRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.push(record.clone());
        Ok(())
    }

    async fn remove(&self, id: RecordId) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.retain(|record| record.id() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rehearse_core::model::{
        ConversationTurn, Difficulty, PracticeSettings, Score, SessionDocument, SessionKind,
        SessionResult, SessionSettings, Speaker, TurnId,
    };
    use rehearse_core::time::fixed_now;

    fn build_record(offset_secs: i64) -> ArchiveRecord {
        let created_at = fixed_now() + Duration::seconds(offset_secs);
        let turn = ConversationTurn::new(TurnId::new(1), Speaker::Ai, "Nice.", created_at)
            .unwrap()
            .with_score(Score::new(85).unwrap());
        ArchiveRecord::new(
            RecordId::generate(),
            created_at,
            SessionKind::Practice,
            SessionDocument::text("notes").unwrap(),
            SessionSettings::Practice(PracticeSettings::new(1, Difficulty::Easy).unwrap()),
            SessionResult::from_turns(vec![turn]),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn list_returns_most_recent_first() {
        let repo = InMemoryArchive::new();
        let oldest = build_record(0);
        let middle = build_record(60);
        let newest = build_record(120);

        repo.append(&oldest).await.unwrap();
        repo.append(&middle).await.unwrap();
        repo.append(&newest).await.unwrap();

        let listed = repo.list().await.unwrap();
        let ids: Vec<_> = listed.iter().map(ArchiveRecord::id).collect();
        assert_eq!(ids, vec![newest.id(), middle.id(), oldest.id()]);
    }

    #[tokio::test]
    async fn remove_deletes_only_the_given_id() {
        let repo = InMemoryArchive::new();
        let keep = build_record(0);
        let gone = build_record(60);
        repo.append(&keep).await.unwrap();
        repo.append(&gone).await.unwrap();

        repo.remove(gone.id()).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), keep.id());
    }

    #[tokio::test]
    async fn remove_missing_id_is_a_noop() {
        let repo = InMemoryArchive::new();
        let record = build_record(0);
        repo.append(&record).await.unwrap();

        repo.remove(RecordId::generate()).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
