use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which flow produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Interview,
    Practice,
}

/// Persona the simulated interviewer speaks with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakingStyle {
    Friend,
    Interviewer,
}

/// How the user delivers answers during an interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    Voice,
    Chat,
}

/// Difficulty tier for practice questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Upper bound on questions in a single practice session.
pub const MAX_QUESTION_COUNT: u8 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("interview duration must be greater than zero")]
    ZeroDuration,

    #[error("voice mode requires a per-answer time limit")]
    MissingAnswerLimit,

    #[error("per-answer time limit must be greater than zero")]
    ZeroAnswerLimit,

    #[error("chat mode does not take a per-answer time limit")]
    UnexpectedAnswerLimit,

    #[error("question count must be between 1 and {MAX_QUESTION_COUNT}, got {got}")]
    QuestionCountRange { got: u8 },
}

/// Configuration for a timed interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewSettings {
    duration_secs: u32,
    style: SpeakingStyle,
    mode: AnswerMode,
    max_answer_secs: Option<u32>,
}

impl InterviewSettings {
    /// Validates and builds interview settings.
    ///
    /// `max_answer_secs` is required (and must be nonzero) exactly when
    /// `mode` is `Voice`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when any field is out of range or the
    /// voice/chat limit rule is violated.
    pub fn new(
        duration_secs: u32,
        style: SpeakingStyle,
        mode: AnswerMode,
        max_answer_secs: Option<u32>,
    ) -> Result<Self, SettingsError> {
        if duration_secs == 0 {
            return Err(SettingsError::ZeroDuration);
        }
        match (mode, max_answer_secs) {
            (AnswerMode::Voice, None) => return Err(SettingsError::MissingAnswerLimit),
            (AnswerMode::Voice, Some(0)) => return Err(SettingsError::ZeroAnswerLimit),
            (AnswerMode::Chat, Some(_)) => return Err(SettingsError::UnexpectedAnswerLimit),
            _ => {}
        }
        Ok(Self {
            duration_secs,
            style,
            mode,
            max_answer_secs,
        })
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn style(&self) -> SpeakingStyle {
        self.style
    }

    #[must_use]
    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    #[must_use]
    pub fn max_answer_secs(&self) -> Option<u32> {
        self.max_answer_secs
    }
}

/// Configuration for an untimed practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeSettings {
    question_count: u8,
    difficulty: Difficulty,
}

impl PracticeSettings {
    /// Validates and builds practice settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::QuestionCountRange` outside 1..=10.
    pub fn new(question_count: u8, difficulty: Difficulty) -> Result<Self, SettingsError> {
        if question_count == 0 || question_count > MAX_QUESTION_COUNT {
            return Err(SettingsError::QuestionCountRange {
                got: question_count,
            });
        }
        Ok(Self {
            question_count,
            difficulty,
        })
    }

    #[must_use]
    pub fn question_count(&self) -> u8 {
        self.question_count
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

/// Tagged union of the two session configurations.
///
/// Every consumer matches exhaustively; there is no optional-field merging
/// of the two shapes anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSettings {
    Interview(InterviewSettings),
    Practice(PracticeSettings),
}

impl SessionSettings {
    #[must_use]
    pub fn kind(&self) -> SessionKind {
        match self {
            SessionSettings::Interview(_) => SessionKind::Interview,
            SessionSettings::Practice(_) => SessionKind::Practice,
        }
    }

    #[must_use]
    pub fn as_interview(&self) -> Option<&InterviewSettings> {
        match self {
            SessionSettings::Interview(settings) => Some(settings),
            SessionSettings::Practice(_) => None,
        }
    }

    #[must_use]
    pub fn as_practice(&self) -> Option<&PracticeSettings> {
        match self {
            SessionSettings::Practice(settings) => Some(settings),
            SessionSettings::Interview(_) => None,
        }
    }
}
