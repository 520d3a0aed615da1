use thiserror::Error;

use crate::model::{ConversationTurn, Score};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionResultError {
    #[error("stored average {stored} does not match recomputed average {computed}")]
    AverageMismatch { stored: Score, computed: Score },
}

/// The outcome of one completed session.
///
/// Built exactly once at completion; the average is always derived from the
/// scored turns, never stored independently by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    average_score: Score,
    turns: Vec<ConversationTurn>,
    generated_document: Option<String>,
}

impl SessionResult {
    /// Builds a result from the full turn history, deriving the average
    /// from every turn that carries a score (zero when none do).
    #[must_use]
    pub fn from_turns(turns: Vec<ConversationTurn>) -> Self {
        let scores: Vec<Score> = turns.iter().filter_map(ConversationTurn::score).collect();
        Self {
            average_score: Score::average(&scores),
            turns,
            generated_document: None,
        }
    }

    /// Attaches a synthesized summary document.
    #[must_use]
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.generated_document = Some(document.into());
        self
    }

    /// Rehydrate a result from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionResultError::AverageMismatch` if the stored average
    /// disagrees with the turns it was saved with.
    pub fn from_persisted(
        average_score: Score,
        turns: Vec<ConversationTurn>,
        generated_document: Option<String>,
    ) -> Result<Self, SessionResultError> {
        let scores: Vec<Score> = turns.iter().filter_map(ConversationTurn::score).collect();
        let computed = Score::average(&scores);
        if computed != average_score {
            return Err(SessionResultError::AverageMismatch {
                stored: average_score,
                computed,
            });
        }
        Ok(Self {
            average_score,
            turns,
            generated_document,
        })
    }

    #[must_use]
    pub fn average_score(&self) -> Score {
        self.average_score
    }

    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    #[must_use]
    pub fn generated_document(&self) -> Option<&str> {
        self.generated_document.as_deref()
    }

    /// Number of turns that carry a score.
    #[must_use]
    pub fn scored_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.score().is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Speaker, TurnId};
    use crate::time::fixed_now;

    fn turn(id: u64, speaker: Speaker, score: Option<u8>) -> ConversationTurn {
        let turn = ConversationTurn::new(TurnId::new(id), speaker, "text", fixed_now()).unwrap();
        match score {
            Some(value) => turn.with_score(Score::new(value).unwrap()),
            None => turn,
        }
    }

    #[test]
    fn average_is_derived_from_scored_turns_only() {
        let turns = vec![
            turn(1, Speaker::Ai, None),
            turn(2, Speaker::User, None),
            turn(3, Speaker::Ai, Some(84)),
            turn(4, Speaker::Ai, Some(95)),
        ];
        let result = SessionResult::from_turns(turns);
        assert_eq!(result.average_score().value(), 90);
        assert_eq!(result.scored_turn_count(), 2);
    }

    #[test]
    fn no_scored_turns_yields_zero() {
        let turns = vec![turn(1, Speaker::Ai, None)];
        let result = SessionResult::from_turns(turns);
        assert_eq!(result.average_score().value(), 0);
    }

    #[test]
    fn from_persisted_rejects_mismatched_average() {
        let turns = vec![turn(1, Speaker::Ai, Some(80))];
        let err =
            SessionResult::from_persisted(Score::new(90).unwrap(), turns, None).unwrap_err();
        assert!(matches!(err, SessionResultError::AverageMismatch { .. }));
    }

    #[test]
    fn from_persisted_accepts_consistent_average() {
        let turns = vec![turn(1, Speaker::Ai, Some(80)), turn(2, Speaker::Ai, Some(90))];
        let result = SessionResult::from_persisted(
            Score::new(85).unwrap(),
            turns,
            Some("## Summary".to_string()),
        )
        .unwrap();
        assert_eq!(result.generated_document(), Some("## Summary"));
    }
}
