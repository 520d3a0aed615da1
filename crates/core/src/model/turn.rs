use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::TurnId;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Ai,
    User,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score must be between 0 and 100, got {got}")]
    OutOfRange { got: u8 },
}

/// A mock score in 0..=100.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(u8);

impl Score {
    /// Validates and builds a score.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfRange` above 100.
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > 100 {
            return Err(ScoreError::OutOfRange { got: value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Rounded mean of the given scores; zero for an empty slice.
    #[must_use]
    pub fn average(scores: &[Score]) -> Score {
        if scores.is_empty() {
            return Score(0);
        }
        let sum: u32 = scores.iter().map(|s| u32::from(s.0)).sum();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mean = (f64::from(sum) / scores.len() as f64).round() as u8;
        Score(mean)
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TurnError {
    #[error("turn text is empty")]
    EmptyText,
}

/// One message exchanged during a session.
///
/// Turns are append-only while a session runs; feedback turns carry the
/// score that was generated for the answer they respond to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    id: TurnId,
    speaker: Speaker,
    text: String,
    created_at: DateTime<Utc>,
    score: Option<Score>,
}

impl ConversationTurn {
    /// Builds an unscored turn.
    ///
    /// # Errors
    ///
    /// Returns `TurnError::EmptyText` for blank text.
    pub fn new(
        id: TurnId,
        speaker: Speaker,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TurnError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TurnError::EmptyText);
        }
        Ok(Self {
            id,
            speaker,
            text,
            created_at,
            score: None,
        })
    }

    /// Attaches a score, for AI feedback turns.
    #[must_use]
    pub fn with_score(mut self, score: Score) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn id(&self) -> TurnId {
        self.id
    }

    #[must_use]
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn score(&self) -> Option<Score> {
        self.score
    }
}
