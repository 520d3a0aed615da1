use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Duration;
use log::{info, warn};

use rehearse_core::Clock;
use rehearse_core::model::{
    AnswerMode, ArchiveRecord, ConversationTurn, Difficulty, InterviewSettings, PracticeSettings,
    RecordId, Score, SessionDocument, SessionKind, SessionResult, SessionSettings, Speaker,
    SpeakingStyle, TurnId,
};
use storage::ArchiveRepository;

use crate::error::ArchiveServiceError;
use crate::flow::CompletedSession;

/// Application-facing wrapper around the archive repository.
///
/// Owns the clock, so ids and timestamps are assigned here when a completed
/// session becomes a record. Constructed once at startup and shared by
/// reference; nothing else touches the repository directly.
pub struct ArchiveService {
    clock: Clock,
    repository: Arc<dyn ArchiveRepository>,
    seed_demo: bool,
    seeded: AtomicBool,
}

impl ArchiveService {
    #[must_use]
    pub fn new(clock: Clock, repository: Arc<dyn ArchiveRepository>) -> Self {
        Self {
            clock,
            repository,
            seed_demo: false,
            seeded: AtomicBool::new(false),
        }
    }

    /// Enables first-run demo records. Off by default: demo content only
    /// ever enters storage when explicitly asked for.
    #[must_use]
    pub fn with_demo_seed(mut self, enabled: bool) -> Self {
        self.seed_demo = enabled;
        self
    }

    /// Archives a completed session, assigning its id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveServiceError` if the record cannot be built or stored.
    pub async fn save(
        &self,
        session: CompletedSession,
    ) -> Result<ArchiveRecord, ArchiveServiceError> {
        let record = ArchiveRecord::new(
            RecordId::generate(),
            self.clock.now(),
            session.kind,
            session.document,
            session.settings,
            session.result,
        )?;
        self.repository.append(&record).await?;
        info!(
            "archived {:?} session {} (score {})",
            record.kind(),
            record.id(),
            record.result().average_score()
        );
        Ok(record)
    }

    /// All records, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveServiceError` for storage failures.
    pub async fn list(&self) -> Result<Vec<ArchiveRecord>, ArchiveServiceError> {
        self.ensure_seeded().await?;
        Ok(self.repository.list().await?)
    }

    /// Interview records only, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveServiceError` for storage failures.
    pub async fn interview_records(&self) -> Result<Vec<ArchiveRecord>, ArchiveServiceError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|record| record.kind() == SessionKind::Interview)
            .collect())
    }

    /// Practice records only, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveServiceError` for storage failures.
    pub async fn practice_records(&self) -> Result<Vec<ArchiveRecord>, ArchiveServiceError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|record| record.kind() == SessionKind::Practice)
            .collect())
    }

    /// Deletes a record; missing ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveServiceError` for storage failures.
    pub async fn remove(&self, id: RecordId) -> Result<(), ArchiveServiceError> {
        self.repository.remove(id).await?;
        Ok(())
    }

    async fn ensure_seeded(&self) -> Result<(), ArchiveServiceError> {
        if !self.seed_demo || self.seeded.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        if !self.repository.list().await?.is_empty() {
            return Ok(());
        }
        info!("seeding demo archive records");
        for record in demo_records(self.clock) {
            match record {
                Ok(record) => self.repository.append(&record).await?,
                Err(e) => warn!("skipping malformed demo record: {e}"),
            }
        }
        Ok(())
    }
}

type DemoRecord = Result<ArchiveRecord, ArchiveServiceError>;

/// Two illustrative records so a first-run archive is not empty when the
/// demo flag is set.
fn demo_records(clock: Clock) -> Vec<DemoRecord> {
    let now = clock.now();
    vec![
        demo_interview(now - Duration::days(3)),
        demo_practice(now - Duration::days(1)),
    ]
}

fn demo_interview(created_at: chrono::DateTime<chrono::Utc>) -> DemoRecord {
    let turns = vec![
        demo_turn(1, Speaker::Ai, "Please walk me through your most significant project experience.", created_at, None)?,
        demo_turn(2, Speaker::User, "I led the migration of our billing service to an event-driven design.", created_at, None)?,
        demo_turn(3, Speaker::Ai, "Excellent answer (93 points). Your technical understanding and hands-on experience come through clearly.", created_at, Some(93))?,
    ];
    let settings =
        InterviewSettings::new(600, SpeakingStyle::Interviewer, AnswerMode::Chat, None)
            .map_err(|e| ArchiveServiceError::Demo(e.to_string()))?;
    Ok(ArchiveRecord::new(
        RecordId::generate(),
        created_at,
        SessionKind::Interview,
        SessionDocument::text("Demo: event-driven billing migration notes")
            .map_err(|e| ArchiveServiceError::Demo(e.to_string()))?,
        SessionSettings::Interview(settings),
        SessionResult::from_turns(turns),
    )?)
}

fn demo_practice(created_at: chrono::DateTime<chrono::Utc>) -> DemoRecord {
    let turns = vec![
        demo_turn(1, Speaker::Ai, "What is a REST API?", created_at, None)?,
        demo_turn(2, Speaker::User, "An HTTP interface organized around resources and verbs.", created_at, None)?,
        demo_turn(3, Speaker::Ai, "Score: 88. What went well: You identified the core concept accurately.", created_at, Some(88))?,
        demo_turn(4, Speaker::Ai, "How have you applied that in a real project?", created_at, None)?,
        demo_turn(5, Speaker::User, "I designed the public API for our inventory system.", created_at, None)?,
        demo_turn(6, Speaker::Ai, "Score: 90. What went well: Your practical experience shows in this answer.", created_at, Some(90))?,
    ];
    let settings = PracticeSettings::new(1, Difficulty::Easy)
        .map_err(|e| ArchiveServiceError::Demo(e.to_string()))?;
    Ok(ArchiveRecord::new(
        RecordId::generate(),
        created_at,
        SessionKind::Practice,
        SessionDocument::text("Demo: web fundamentals study notes")
            .map_err(|e| ArchiveServiceError::Demo(e.to_string()))?,
        SessionSettings::Practice(settings),
        SessionResult::from_turns(turns),
    )?)
}

fn demo_turn(
    id: u64,
    speaker: Speaker,
    text: &str,
    created_at: chrono::DateTime<chrono::Utc>,
    score: Option<u8>,
) -> Result<ConversationTurn, ArchiveServiceError> {
    let turn = ConversationTurn::new(TurnId::new(id), speaker, text, created_at)
        .map_err(|e| ArchiveServiceError::Demo(e.to_string()))?;
    Ok(match score {
        Some(value) => {
            turn.with_score(Score::new(value).map_err(|e| ArchiveServiceError::Demo(e.to_string()))?)
        }
        None => turn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::time::fixed_clock;
    use storage::InMemoryArchive;

    fn completed_practice() -> CompletedSession {
        let feedback =
            ConversationTurn::new(TurnId::new(1), Speaker::Ai, "Score: 85.", rehearse_core::time::fixed_now())
                .unwrap()
                .with_score(Score::new(85).unwrap());
        CompletedSession {
            kind: SessionKind::Practice,
            document: SessionDocument::text("notes").unwrap(),
            settings: SessionSettings::Practice(
                PracticeSettings::new(1, Difficulty::Easy).unwrap(),
            ),
            result: SessionResult::from_turns(vec![feedback]),
        }
    }

    #[tokio::test]
    async fn save_assigns_id_and_timestamp() {
        let service = ArchiveService::new(fixed_clock(), Arc::new(InMemoryArchive::new()));
        let record = service.save(completed_practice()).await.unwrap();
        assert_eq!(record.created_at(), rehearse_core::time::fixed_now());
        assert_eq!(record.kind(), SessionKind::Practice);

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), record.id());
    }

    #[tokio::test]
    async fn kind_filters_split_the_archive() {
        let service = ArchiveService::new(fixed_clock(), Arc::new(InMemoryArchive::new()));
        service.save(completed_practice()).await.unwrap();

        assert_eq!(service.practice_records().await.unwrap().len(), 1);
        assert!(service.interview_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn seeding_is_off_by_default() {
        let service = ArchiveService::new(fixed_clock(), Arc::new(InMemoryArchive::new()));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn seeding_fills_an_empty_archive_once() {
        let service = ArchiveService::new(fixed_clock(), Arc::new(InMemoryArchive::new()))
            .with_demo_seed(true);

        let first = service.list().await.unwrap();
        assert_eq!(first.len(), 2);

        // A second list does not duplicate the seeds.
        let second = service.list().await.unwrap();
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn seeding_skips_a_non_empty_archive() {
        let repository: Arc<dyn ArchiveRepository> = Arc::new(InMemoryArchive::new());
        let unseeded = ArchiveService::new(fixed_clock(), Arc::clone(&repository));
        unseeded.save(completed_practice()).await.unwrap();

        let seeded = ArchiveService::new(fixed_clock(), repository).with_demo_seed(true);
        assert_eq!(seeded.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_deletes_the_record() {
        let service = ArchiveService::new(fixed_clock(), Arc::new(InMemoryArchive::new()));
        let record = service.save(completed_practice()).await.unwrap();
        service.remove(record.id()).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
