use std::fmt;
use std::sync::Arc;

use rehearse_core::Clock;
use rehearse_core::model::{
    AnswerMode, ConversationTurn, InterviewSettings, Score, SessionDocument, SessionResult,
    Speaker, TurnId,
};

use crate::error::EngineError;
use crate::feedback::FeedbackGenerator;
use crate::scripts::{VOICE_TRANSCRIPT_PLACEHOLDER, interview_questions};

/// Simulated "thinking" pause between an answer and its feedback.
pub const THINKING_DELAY_MS: u64 = 1500;
/// Pause between feedback and the next scripted question.
pub const NEXT_QUESTION_DELAY_MS: u64 = 1000;

/// Where the engine is in the answer/feedback cycle.
///
/// Each phase has exactly one pending timer concern in the UI: the session
/// countdown always, plus the thinking delay in `Scoring`, the question
/// delay in `AwaitingNextQuestion`, and the recording countdown while a
/// voice answer is being captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterviewPhase {
    AwaitingAnswer,
    Scoring,
    AwaitingNextQuestion,
    Complete,
}

impl InterviewPhase {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            InterviewPhase::AwaitingAnswer => "awaiting_answer",
            InterviewPhase::Scoring => "scoring",
            InterviewPhase::AwaitingNextQuestion => "awaiting_next_question",
            InterviewPhase::Complete => "complete",
        }
    }
}

/// Result of one second elapsing on the session countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_secs: u32 },
    Expired,
}

/// Result of one second elapsing on the recording countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordingTick {
    Running { remaining_secs: u32 },
    Finished,
}

/// State machine for a timed interview session.
///
/// The engine owns the turn log and the countdown values; scheduling lives
/// with the caller, which ticks the countdowns and applies the delayed
/// transitions (`deliver_feedback`, `advance_question`) when their timers
/// fire. A transition arriving after completion is rejected with a phase
/// error, which is how a pending feedback gets abandoned when the clock
/// runs out.
pub struct InterviewEngine {
    document: SessionDocument,
    settings: InterviewSettings,
    questions: &'static [&'static str],
    question_index: usize,
    turns: Vec<ConversationTurn>,
    phase: InterviewPhase,
    remaining_secs: u32,
    recording_remaining: Option<u32>,
    next_turn_id: u64,
    clock: Clock,
    feedback: Arc<dyn FeedbackGenerator>,
}

impl InterviewEngine {
    /// Starts a session: emits the first scripted question and arms the
    /// countdown at the configured duration.
    #[must_use]
    pub fn new(
        document: SessionDocument,
        settings: InterviewSettings,
        feedback: Arc<dyn FeedbackGenerator>,
        clock: Clock,
    ) -> Self {
        let questions = interview_questions(settings.style());
        let mut engine = Self {
            document,
            settings,
            questions,
            question_index: 0,
            turns: Vec::new(),
            phase: InterviewPhase::AwaitingAnswer,
            remaining_secs: settings.duration_secs(),
            recording_remaining: None,
            next_turn_id: 1,
            clock,
            feedback,
        };
        engine.push_question();
        engine
    }

    #[must_use]
    pub fn document(&self) -> &SessionDocument {
        &self.document
    }

    #[must_use]
    pub fn settings(&self) -> &InterviewSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn recording_remaining(&self) -> Option<u32> {
        self.recording_remaining
    }

    /// 1-based number of the question currently on the table.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.question_index + 1
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == InterviewPhase::Complete
    }

    /// Records the user's answer and moves to scoring.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyAnswer` for blank input (no turn is
    /// created) and `EngineError::InvalidPhase` outside `AwaitingAnswer`.
    pub fn submit_answer(&mut self, text: &str) -> Result<(), EngineError> {
        if self.phase != InterviewPhase::AwaitingAnswer {
            return Err(EngineError::InvalidPhase {
                operation: "submit_answer",
            });
        }
        if text.trim().is_empty() {
            return Err(EngineError::EmptyAnswer);
        }
        self.recording_remaining = None;
        self.push_turn(Speaker::User, text.to_string(), None);
        self.phase = InterviewPhase::Scoring;
        Ok(())
    }

    /// Scores the pending answer and appends the feedback turn. Call once
    /// the thinking delay has elapsed.
    ///
    /// After the last scripted question this completes the session;
    /// otherwise the engine waits for `advance_question`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPhase` unless a feedback is pending —
    /// in particular after a timeout already completed the session, which
    /// is how abandoned feedback stays abandoned.
    pub fn deliver_feedback(&mut self) -> Result<&ConversationTurn, EngineError> {
        if self.phase != InterviewPhase::Scoring {
            return Err(EngineError::InvalidPhase {
                operation: "deliver_feedback",
            });
        }
        let answer = self
            .turns
            .iter()
            .rev()
            .find(|turn| turn.speaker() == Speaker::User)
            .map(|turn| turn.text().to_string())
            .unwrap_or_default();
        let score = self.feedback.score(&answer);
        let text = self.feedback.interview_feedback(score, self.settings.style());
        self.push_turn(Speaker::Ai, text, Some(score));

        if self.question_index + 1 < self.questions.len() {
            self.phase = InterviewPhase::AwaitingNextQuestion;
        } else {
            self.phase = InterviewPhase::Complete;
        }
        Ok(self.turns.last().ok_or(EngineError::AlreadyComplete)?)
    }

    /// Appends the next scripted question. Call once the question delay has
    /// elapsed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPhase` unless a question is pending.
    pub fn advance_question(&mut self) -> Result<&ConversationTurn, EngineError> {
        if self.phase != InterviewPhase::AwaitingNextQuestion {
            return Err(EngineError::InvalidPhase {
                operation: "advance_question",
            });
        }
        self.question_index += 1;
        self.push_question();
        self.phase = InterviewPhase::AwaitingAnswer;
        Ok(self.turns.last().ok_or(EngineError::AlreadyComplete)?)
    }

    /// One second of session time elapses. Reaching zero completes the
    /// session from any phase; whatever was pending is discarded.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == InterviewPhase::Complete {
            return TickOutcome::Expired;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.complete_now();
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Opens the voice-recording sub-dialog countdown.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotVoiceMode` in chat mode and
    /// `EngineError::InvalidPhase` outside `AwaitingAnswer`.
    pub fn start_recording(&mut self) -> Result<u32, EngineError> {
        if self.settings.mode() != AnswerMode::Voice {
            return Err(EngineError::NotVoiceMode);
        }
        if self.phase != InterviewPhase::AwaitingAnswer {
            return Err(EngineError::InvalidPhase {
                operation: "start_recording",
            });
        }
        // Settings validation guarantees the limit exists in voice mode.
        let limit = self.settings.max_answer_secs().unwrap_or(1);
        self.recording_remaining = Some(limit);
        Ok(limit)
    }

    /// One second of recording time elapses; at zero the recording stops
    /// and the placeholder transcript is auto-submitted.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoRecording` when no recording is active.
    pub fn tick_recording(&mut self) -> Result<RecordingTick, EngineError> {
        let remaining = self.recording_remaining.ok_or(EngineError::NoRecording)?;
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.stop_recording()?;
            return Ok(RecordingTick::Finished);
        }
        self.recording_remaining = Some(remaining);
        Ok(RecordingTick::Running {
            remaining_secs: remaining,
        })
    }

    /// Ends the recording and submits the placeholder transcript through
    /// the normal answer path.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoRecording` when no recording is active.
    pub fn stop_recording(&mut self) -> Result<(), EngineError> {
        if self.recording_remaining.take().is_none() {
            return Err(EngineError::NoRecording);
        }
        self.submit_answer(VOICE_TRANSCRIPT_PLACEHOLDER)
    }

    /// The session outcome, available once the session is complete.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPhase` while the session is running.
    pub fn result(&self) -> Result<SessionResult, EngineError> {
        if self.phase != InterviewPhase::Complete {
            return Err(EngineError::InvalidPhase { operation: "result" });
        }
        Ok(SessionResult::from_turns(self.turns.clone()))
    }

    fn complete_now(&mut self) {
        self.phase = InterviewPhase::Complete;
        self.recording_remaining = None;
        self.remaining_secs = 0;
    }

    fn push_question(&mut self) {
        let text = self.questions[self.question_index.min(self.questions.len() - 1)];
        self.push_turn(Speaker::Ai, text.to_string(), None);
    }

    fn push_turn(&mut self, speaker: Speaker, text: String, score: Option<Score>) {
        let id = TurnId::new(self.next_turn_id);
        self.next_turn_id += 1;
        // Turn text is never empty here: questions and feedback come from
        // non-empty templates and answers are validated on submit.
        if let Ok(turn) = ConversationTurn::new(id, speaker, text, self.clock.now()) {
            let turn = match score {
                Some(score) => turn.with_score(score),
                None => turn,
            };
            self.turns.push(turn);
        }
    }
}

impl fmt::Debug for InterviewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterviewEngine")
            .field("phase", &self.phase)
            .field("question_index", &self.question_index)
            .field("turns_len", &self.turns.len())
            .field("remaining_secs", &self.remaining_secs)
            .field("recording_remaining", &self.recording_remaining)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FixedFeedback;
    use rehearse_core::model::SpeakingStyle;
    use rehearse_core::time::fixed_clock;

    fn chat_engine(duration_secs: u32, score: u8) -> InterviewEngine {
        let settings = InterviewSettings::new(
            duration_secs,
            SpeakingStyle::Interviewer,
            AnswerMode::Chat,
            None,
        )
        .unwrap();
        InterviewEngine::new(
            SessionDocument::text("my notes").unwrap(),
            settings,
            Arc::new(FixedFeedback::new(score)),
            fixed_clock(),
        )
    }

    fn voice_engine(max_answer_secs: u32) -> InterviewEngine {
        let settings = InterviewSettings::new(
            300,
            SpeakingStyle::Friend,
            AnswerMode::Voice,
            Some(max_answer_secs),
        )
        .unwrap();
        InterviewEngine::new(
            SessionDocument::text("my notes").unwrap(),
            settings,
            Arc::new(FixedFeedback::new(90)),
            fixed_clock(),
        )
    }

    #[test]
    fn first_question_is_emitted_on_start() {
        let engine = chat_engine(300, 85);
        assert_eq!(engine.turns().len(), 1);
        assert_eq!(engine.turns()[0].speaker(), Speaker::Ai);
        assert_eq!(engine.phase(), InterviewPhase::AwaitingAnswer);
        assert_eq!(engine.remaining_secs(), 300);
    }

    #[test]
    fn empty_answer_is_rejected_without_a_turn() {
        let mut engine = chat_engine(300, 85);
        let err = engine.submit_answer("   ").unwrap_err();
        assert_eq!(err, EngineError::EmptyAnswer);
        assert_eq!(engine.turns().len(), 1);
        assert_eq!(engine.phase(), InterviewPhase::AwaitingAnswer);
    }

    #[test]
    fn answer_feedback_question_sequence() {
        // The scenario from the chat flow: answer question one, get scored
        // feedback, see question two appear.
        let mut engine = chat_engine(300, 85);

        engine.submit_answer("I built a worker pool in Rust.").unwrap();
        assert_eq!(engine.phase(), InterviewPhase::Scoring);

        let feedback = engine.deliver_feedback().unwrap();
        let score = feedback.score().unwrap().value();
        assert!((80..=100).contains(&score));
        assert_eq!(engine.phase(), InterviewPhase::AwaitingNextQuestion);

        engine.advance_question().unwrap();
        assert_eq!(engine.phase(), InterviewPhase::AwaitingAnswer);
        assert_eq!(engine.question_number(), 2);

        // Turn log: Q1, answer, feedback, Q2 - strictly in event order.
        let speakers: Vec<Speaker> = engine.turns().iter().map(ConversationTurn::speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::Ai, Speaker::User, Speaker::Ai, Speaker::Ai]
        );
    }

    #[test]
    fn timeout_completes_with_recorded_scores() {
        let mut engine = chat_engine(3, 85);
        engine.submit_answer("answer one").unwrap();
        engine.deliver_feedback().unwrap();

        assert_eq!(
            engine.tick(),
            TickOutcome::Running { remaining_secs: 2 }
        );
        assert_eq!(
            engine.tick(),
            TickOutcome::Running { remaining_secs: 1 }
        );
        assert_eq!(engine.tick(), TickOutcome::Expired);

        let result = engine.result().unwrap();
        assert_eq!(result.average_score().value(), 85);
        assert_eq!(result.scored_turn_count(), 1);
    }

    #[test]
    fn timeout_with_no_scores_averages_zero() {
        let mut engine = chat_engine(1, 85);
        assert_eq!(engine.tick(), TickOutcome::Expired);
        assert_eq!(engine.result().unwrap().average_score().value(), 0);
    }

    #[test]
    fn pending_feedback_is_abandoned_on_timeout() {
        let mut engine = chat_engine(1, 85);
        engine.submit_answer("an answer").unwrap();
        assert_eq!(engine.phase(), InterviewPhase::Scoring);

        assert_eq!(engine.tick(), TickOutcome::Expired);

        // The thinking-delay callback fires late; it must not score anything.
        let err = engine.deliver_feedback().unwrap_err();
        assert!(matches!(err, EngineError::InvalidPhase { .. }));
        assert_eq!(engine.result().unwrap().scored_turn_count(), 0);
    }

    #[test]
    fn exhausting_the_script_completes_the_session() {
        let mut engine = chat_engine(3600, 92);
        for question in 0..engine.question_count() {
            engine.submit_answer("a detailed answer").unwrap();
            engine.deliver_feedback().unwrap();
            if question + 1 < engine.question_count() {
                engine.advance_question().unwrap();
            }
        }
        assert!(engine.is_complete());
        let result = engine.result().unwrap();
        assert_eq!(result.scored_turn_count(), engine.question_count());
        assert_eq!(result.average_score().value(), 92);
    }

    #[test]
    fn recording_requires_voice_mode() {
        let mut engine = chat_engine(300, 85);
        assert_eq!(engine.start_recording().unwrap_err(), EngineError::NotVoiceMode);
    }

    #[test]
    fn recording_timeout_auto_submits_placeholder() {
        let mut engine = voice_engine(2);
        assert_eq!(engine.start_recording().unwrap(), 2);

        assert_eq!(
            engine.tick_recording().unwrap(),
            RecordingTick::Running { remaining_secs: 1 }
        );
        assert_eq!(engine.tick_recording().unwrap(), RecordingTick::Finished);

        assert_eq!(engine.phase(), InterviewPhase::Scoring);
        let answer = &engine.turns()[1];
        assert_eq!(answer.speaker(), Speaker::User);
        assert_eq!(answer.text(), VOICE_TRANSCRIPT_PLACEHOLDER);
    }

    #[test]
    fn stop_recording_submits_immediately() {
        let mut engine = voice_engine(120);
        engine.start_recording().unwrap();
        engine.stop_recording().unwrap();
        assert_eq!(engine.phase(), InterviewPhase::Scoring);
        assert!(engine.recording_remaining().is_none());
    }
}
