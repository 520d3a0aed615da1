use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{RecordId, SessionDocument, SessionKind, SessionResult, SessionSettings};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArchiveRecordError {
    #[error("record kind {kind:?} does not match its settings variant")]
    SettingsMismatch { kind: SessionKind },
}

/// A persisted, immutable summary of one completed session.
///
/// Owned exclusively by the archive store: created on explicit save, never
/// mutated, removable by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRecord {
    id: RecordId,
    created_at: DateTime<Utc>,
    kind: SessionKind,
    source_document: SessionDocument,
    settings: SessionSettings,
    result: SessionResult,
}

impl ArchiveRecord {
    /// Builds a record, checking that the kind tag and settings variant agree.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveRecordError::SettingsMismatch` when they do not.
    pub fn new(
        id: RecordId,
        created_at: DateTime<Utc>,
        kind: SessionKind,
        source_document: SessionDocument,
        settings: SessionSettings,
        result: SessionResult,
    ) -> Result<Self, ArchiveRecordError> {
        if settings.kind() != kind {
            return Err(ArchiveRecordError::SettingsMismatch { kind });
        }
        Ok(Self {
            id,
            created_at,
            kind,
            source_document,
            settings,
            result,
        })
    }

    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn source_document(&self) -> &SessionDocument {
        &self.source_document
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    #[must_use]
    pub fn result(&self) -> &SessionResult {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AnswerMode, ConversationTurn, InterviewSettings, Score, Speaker, SpeakingStyle, TurnId,
    };
    use crate::time::fixed_now;

    fn interview_settings() -> SessionSettings {
        SessionSettings::Interview(
            InterviewSettings::new(300, SpeakingStyle::Interviewer, AnswerMode::Chat, None)
                .unwrap(),
        )
    }

    fn result() -> SessionResult {
        let turn = ConversationTurn::new(TurnId::new(1), Speaker::Ai, "Well done.", fixed_now())
            .unwrap()
            .with_score(Score::new(88).unwrap());
        SessionResult::from_turns(vec![turn])
    }

    #[test]
    fn record_requires_matching_kind_and_settings() {
        let doc = SessionDocument::text("My project notes").unwrap();

        let ok = ArchiveRecord::new(
            RecordId::generate(),
            fixed_now(),
            SessionKind::Interview,
            doc.clone(),
            interview_settings(),
            result(),
        );
        assert!(ok.is_ok());

        let err = ArchiveRecord::new(
            RecordId::generate(),
            fixed_now(),
            SessionKind::Practice,
            doc,
            interview_settings(),
            result(),
        )
        .unwrap_err();
        assert!(matches!(err, ArchiveRecordError::SettingsMismatch { .. }));
    }
}
