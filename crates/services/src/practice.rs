use std::fmt;
use std::sync::Arc;

use rehearse_core::Clock;
use rehearse_core::model::{
    ConversationTurn, PracticeSettings, Score, SessionDocument, SessionResult, Speaker, TurnId,
};

use crate::error::EngineError;
use crate::feedback::FeedbackGenerator;
use crate::scripts::{FOLLOW_UP_QUESTIONS, practice_questions};

/// Where the engine is within the current question's two-phase sub-flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticePhase {
    AwaitingAnswer,
    PrimaryFeedback,
    AwaitingFollowUp,
    FollowUpFeedback,
    SavePrompt,
    Complete,
}

/// State machine for an untimed practice session.
///
/// Progression is entirely user-paced: a step counter, no wall clock. Each
/// primary question runs answer -> feedback -> follow-up -> answer ->
/// feedback, recording one score per feedback, so a session with N
/// questions always finishes with exactly 2N scored turns.
///
/// The question bank cycles when the configured count exceeds its length,
/// so every requested question exists.
pub struct PracticeEngine {
    document: SessionDocument,
    settings: PracticeSettings,
    questions: &'static [&'static str],
    current_question: usize,
    follow_up: &'static str,
    turns: Vec<ConversationTurn>,
    phase: PracticePhase,
    next_turn_id: u64,
    clock: Clock,
    feedback: Arc<dyn FeedbackGenerator>,
}

impl PracticeEngine {
    /// Starts a session: emits the first primary question and draws its
    /// follow-up from the pool.
    #[must_use]
    pub fn new(
        document: SessionDocument,
        settings: PracticeSettings,
        feedback: Arc<dyn FeedbackGenerator>,
        clock: Clock,
    ) -> Self {
        let questions = practice_questions(settings.difficulty());
        let follow_up = FOLLOW_UP_QUESTIONS[feedback.pick_follow_up(FOLLOW_UP_QUESTIONS.len())];
        let mut engine = Self {
            document,
            settings,
            questions,
            current_question: 0,
            follow_up,
            turns: Vec::new(),
            phase: PracticePhase::AwaitingAnswer,
            next_turn_id: 1,
            clock,
            feedback,
        };
        let first_question = questions[0].to_string();
        engine.push_turn(Speaker::Ai, first_question, None);
        engine
    }

    #[must_use]
    pub fn document(&self) -> &SessionDocument {
        &self.document
    }

    #[must_use]
    pub fn settings(&self) -> &PracticeSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> PracticePhase {
        self.phase
    }

    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// 1-based number of the question currently on the table.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.current_question + 1
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        usize::from(self.settings.question_count())
    }

    /// Text of the current primary question.
    #[must_use]
    pub fn current_question(&self) -> &'static str {
        self.questions[self.current_question % self.questions.len()]
    }

    /// The follow-up drawn for the current primary question.
    #[must_use]
    pub fn follow_up_question(&self) -> &'static str {
        self.follow_up
    }

    /// The most recent feedback turn, if any.
    #[must_use]
    pub fn last_feedback(&self) -> Option<&ConversationTurn> {
        self.turns.iter().rev().find(|turn| turn.score().is_some())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == PracticePhase::Complete
    }

    /// Records the primary answer; feedback and score land synchronously.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyAnswer` for blank input and
    /// `EngineError::InvalidPhase` outside `AwaitingAnswer`.
    pub fn submit_answer(&mut self, text: &str) -> Result<(), EngineError> {
        if self.phase != PracticePhase::AwaitingAnswer {
            return Err(EngineError::InvalidPhase {
                operation: "submit_answer",
            });
        }
        self.record_answer_with_feedback(text)?;
        self.phase = PracticePhase::PrimaryFeedback;
        Ok(())
    }

    /// Presents the follow-up question. Only legal after the primary
    /// feedback, which keeps the ordering guarantee that a follow-up never
    /// precedes its primary's feedback.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPhase` outside `PrimaryFeedback`.
    pub fn begin_follow_up(&mut self) -> Result<&ConversationTurn, EngineError> {
        if self.phase != PracticePhase::PrimaryFeedback {
            return Err(EngineError::InvalidPhase {
                operation: "begin_follow_up",
            });
        }
        self.push_turn(Speaker::Ai, self.follow_up.to_string(), None);
        self.phase = PracticePhase::AwaitingFollowUp;
        Ok(self.turns.last().ok_or(EngineError::AlreadyComplete)?)
    }

    /// Records the follow-up answer; the second score lands synchronously.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyAnswer` for blank input and
    /// `EngineError::InvalidPhase` outside `AwaitingFollowUp`.
    pub fn submit_follow_up(&mut self, text: &str) -> Result<(), EngineError> {
        if self.phase != PracticePhase::AwaitingFollowUp {
            return Err(EngineError::InvalidPhase {
                operation: "submit_follow_up",
            });
        }
        self.record_answer_with_feedback(text)?;
        self.phase = PracticePhase::FollowUpFeedback;
        Ok(())
    }

    /// Moves on after the follow-up feedback: either the next primary
    /// question (with a freshly drawn follow-up) or the save prompt.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPhase` outside `FollowUpFeedback`.
    pub fn advance(&mut self) -> Result<(), EngineError> {
        if self.phase != PracticePhase::FollowUpFeedback {
            return Err(EngineError::InvalidPhase { operation: "advance" });
        }
        if self.current_question + 1 < self.question_count() {
            self.current_question += 1;
            self.follow_up =
                FOLLOW_UP_QUESTIONS[self.feedback.pick_follow_up(FOLLOW_UP_QUESTIONS.len())];
            let question = self.current_question().to_string();
            self.push_turn(Speaker::Ai, question, None);
            self.phase = PracticePhase::AwaitingAnswer;
        } else {
            self.phase = PracticePhase::SavePrompt;
        }
        Ok(())
    }

    /// Discards the session from the save prompt; nothing is archived.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPhase` outside `SavePrompt`.
    pub fn skip(&mut self) -> Result<(), EngineError> {
        if self.phase != PracticePhase::SavePrompt {
            return Err(EngineError::InvalidPhase { operation: "skip" });
        }
        self.phase = PracticePhase::Complete;
        Ok(())
    }

    /// Completes the session with a result for archiving. The caller runs
    /// the simulated document-generation delay and attaches the summary.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPhase` outside `SavePrompt`.
    pub fn save(&mut self) -> Result<SessionResult, EngineError> {
        if self.phase != PracticePhase::SavePrompt {
            return Err(EngineError::InvalidPhase { operation: "save" });
        }
        self.phase = PracticePhase::Complete;
        Ok(SessionResult::from_turns(self.turns.clone()))
    }

    fn record_answer_with_feedback(&mut self, text: &str) -> Result<(), EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyAnswer);
        }
        self.push_turn(Speaker::User, text.to_string(), None);
        let score = self.feedback.score(text);
        let feedback_text = self.feedback.practice_feedback(score);
        self.push_turn(Speaker::Ai, feedback_text, Some(score));
        Ok(())
    }

    fn push_turn(&mut self, speaker: Speaker, text: String, score: Option<Score>) {
        let id = TurnId::new(self.next_turn_id);
        self.next_turn_id += 1;
        // Text is validated before it gets here; see record_answer_with_feedback.
        if let Ok(turn) = ConversationTurn::new(id, speaker, text, self.clock.now()) {
            let turn = match score {
                Some(score) => turn.with_score(score),
                None => turn,
            };
            self.turns.push(turn);
        }
    }
}

impl fmt::Debug for PracticeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeEngine")
            .field("phase", &self.phase)
            .field("current_question", &self.current_question)
            .field("turns_len", &self.turns.len())
            .finish_non_exhaustive()
    }
}
