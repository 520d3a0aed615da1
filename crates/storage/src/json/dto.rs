//! Persisted shapes for the archive file.
//!
//! These mirror the domain types so the JSON layout stays stable while the
//! domain keeps its validating constructors. Optional fields added after the
//! first release (`generated_document`, `max_answer_secs`, per-turn `score`)
//! default to absent so legacy records keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rehearse_core::model::{
    AnswerMode, ArchiveRecord, ConversationTurn, Difficulty, DocumentKind, InterviewSettings,
    PracticeSettings, RecordId, Score, SessionDocument, SessionKind, SessionResult,
    SessionSettings, Speaker, SpeakingStyle, TurnId,
};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DocumentDto {
    kind: DocumentKind,
    content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum SettingsDto {
    Interview {
        duration_secs: u32,
        style: SpeakingStyle,
        mode: AnswerMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_answer_secs: Option<u32>,
    },
    Practice {
        question_count: u8,
        difficulty: Difficulty,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TurnDto {
    id: u64,
    speaker: Speaker,
    text: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ResultDto {
    average_score: u8,
    turns: Vec<TurnDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generated_document: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RecordDto {
    id: Uuid,
    created_at: DateTime<Utc>,
    kind: SessionKind,
    source_document: DocumentDto,
    settings: SettingsDto,
    result: ResultDto,
}

impl RecordDto {
    pub(crate) fn from_record(record: &ArchiveRecord) -> Self {
        let settings = match record.settings() {
            SessionSettings::Interview(s) => SettingsDto::Interview {
                duration_secs: s.duration_secs(),
                style: s.style(),
                mode: s.mode(),
                max_answer_secs: s.max_answer_secs(),
            },
            SessionSettings::Practice(s) => SettingsDto::Practice {
                question_count: s.question_count(),
                difficulty: s.difficulty(),
            },
        };
        let result = record.result();
        Self {
            id: record.id().value(),
            created_at: record.created_at(),
            kind: record.kind(),
            source_document: DocumentDto {
                kind: record.source_document().kind(),
                content: record.source_document().content().to_string(),
            },
            settings,
            result: ResultDto {
                average_score: result.average_score().value(),
                turns: result
                    .turns()
                    .iter()
                    .map(|turn| TurnDto {
                        id: turn.id().value(),
                        speaker: turn.speaker(),
                        text: turn.text().to_string(),
                        created_at: turn.created_at(),
                        score: turn.score().map(|s| s.value()),
                    })
                    .collect(),
                generated_document: result.generated_document().map(ToString::to_string),
            },
        }
    }

    /// Convert the persisted shape back into a domain record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when any field fails domain
    /// validation.
    pub(crate) fn into_record(self) -> Result<ArchiveRecord, StorageError> {
        let document =
            SessionDocument::from_persisted(self.source_document.kind, self.source_document.content)
                .map_err(ser)?;

        let settings = match self.settings {
            SettingsDto::Interview {
                duration_secs,
                style,
                mode,
                max_answer_secs,
            } => SessionSettings::Interview(
                InterviewSettings::new(duration_secs, style, mode, max_answer_secs).map_err(ser)?,
            ),
            SettingsDto::Practice {
                question_count,
                difficulty,
            } => SessionSettings::Practice(
                PracticeSettings::new(question_count, difficulty).map_err(ser)?,
            ),
        };

        let mut turns = Vec::with_capacity(self.result.turns.len());
        for dto in self.result.turns {
            let mut turn =
                ConversationTurn::new(TurnId::new(dto.id), dto.speaker, dto.text, dto.created_at)
                    .map_err(ser)?;
            if let Some(value) = dto.score {
                turn = turn.with_score(Score::new(value).map_err(ser)?);
            }
            turns.push(turn);
        }

        let result = SessionResult::from_persisted(
            Score::new(self.result.average_score).map_err(ser)?,
            turns,
            self.result.generated_document,
        )
        .map_err(ser)?;

        ArchiveRecord::new(
            RecordId::new(self.id),
            self.created_at,
            self.kind,
            document,
            settings,
            result,
        )
        .map_err(ser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::time::fixed_now;

    fn build_record() -> ArchiveRecord {
        let turn = ConversationTurn::new(TurnId::new(1), Speaker::Ai, "Solid answer.", fixed_now())
            .unwrap()
            .with_score(Score::new(91).unwrap());
        ArchiveRecord::new(
            RecordId::generate(),
            fixed_now(),
            SessionKind::Interview,
            SessionDocument::link("https://example.com/resume").unwrap(),
            SessionSettings::Interview(
                InterviewSettings::new(600, SpeakingStyle::Friend, AnswerMode::Voice, Some(120))
                    .unwrap(),
            ),
            SessionResult::from_turns(vec![turn]).with_document("# Report"),
        )
        .unwrap()
    }

    #[test]
    fn record_roundtrips_through_dto() {
        let record = build_record();
        let restored = RecordDto::from_record(&record).into_record().unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn legacy_record_without_optional_fields_loads() {
        let raw = r#"{
            "id": "4f2d9cba-0000-4000-8000-000000000001",
            "created_at": "2023-11-14T22:13:20Z",
            "kind": "practice",
            "source_document": { "kind": "text", "content": "old notes" },
            "settings": { "kind": "practice", "question_count": 2, "difficulty": "medium" },
            "result": {
                "average_score": 0,
                "turns": [
                    { "id": 1, "speaker": "ai", "text": "Q1", "created_at": "2023-11-14T22:13:20Z" }
                ]
            }
        }"#;
        let dto: RecordDto = serde_json::from_str(raw).unwrap();
        let record = dto.into_record().unwrap();
        assert!(record.result().generated_document().is_none());
        assert_eq!(record.result().average_score().value(), 0);
    }

    #[test]
    fn invalid_score_fails_validation() {
        let mut dto = RecordDto::from_record(&build_record());
        dto.result.average_score = 250;
        let err = dto.into_record().unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
