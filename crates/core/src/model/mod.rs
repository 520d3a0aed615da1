mod document;
mod ids;
mod record;
mod result;
mod settings;
mod turn;

pub use document::{DocumentError, DocumentKind, SessionDocument};
pub use ids::{ParseIdError, RecordId, TurnId};
pub use record::{ArchiveRecord, ArchiveRecordError};
pub use result::{SessionResult, SessionResultError};
pub use settings::{
    AnswerMode, Difficulty, InterviewSettings, MAX_QUESTION_COUNT, PracticeSettings, SessionKind,
    SessionSettings, SettingsError, SpeakingStyle,
};
pub use turn::{ConversationTurn, Score, ScoreError, Speaker, TurnError};
