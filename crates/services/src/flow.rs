use rehearse_core::model::{
    InterviewSettings, PracticeSettings, SessionDocument, SessionKind, SessionResult,
    SessionSettings,
};

use crate::error::FlowError;

/// Every screen the app can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    DocumentInput,
    PracticeSettings,
    InterviewSettings,
    PracticeSession,
    InterviewSession,
    InterviewComplete,
    Archive,
    Documents,
}

impl View {
    /// True while a session is actively running, which is when global
    /// navigation needs the exit confirmation.
    #[must_use]
    pub fn is_session(self) -> bool {
        matches!(self, View::PracticeSession | View::InterviewSession)
    }
}

/// What happened to a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Moved,
    NeedsConfirmation,
}

/// Everything the archive needs about a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSession {
    pub kind: SessionKind,
    pub document: SessionDocument,
    pub settings: SessionSettings,
    pub result: SessionResult,
}

/// The single state machine behind the whole UI.
///
/// Holds the current view plus the data accumulated on the way to a
/// session (mode, document, settings, last result) and mediates every
/// transition. Session views never reach into ambient state: they ask for
/// their inputs here, and a missing input is a typed error, not a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowController {
    view: View,
    mode: Option<SessionKind>,
    document: Option<SessionDocument>,
    settings: Option<SessionSettings>,
    last_result: Option<SessionResult>,
    pending_view: Option<View>,
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: View::Home,
            mode: None,
            document: None,
            settings: None,
            last_result: None,
            pending_view: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn mode(&self) -> Option<SessionKind> {
        self.mode
    }

    #[must_use]
    pub fn document(&self) -> Option<&SessionDocument> {
        self.document.as_ref()
    }

    #[must_use]
    pub fn settings(&self) -> Option<&SessionSettings> {
        self.settings.as_ref()
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    /// True while the exit-confirmation dialog should be showing.
    #[must_use]
    pub fn exit_prompt_open(&self) -> bool {
        self.pending_view.is_some()
    }

    /// Picks a mode on the home screen and moves to document input.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` off the home view.
    pub fn select_mode(&mut self, kind: SessionKind) -> Result<(), FlowError> {
        self.expect_view(View::Home)?;
        self.mode = Some(kind);
        self.view = View::DocumentInput;
        Ok(())
    }

    /// Captures the source document and moves to the mode's settings form.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` off the document-input view
    /// and `FlowError::MissingMode` if no mode was selected.
    pub fn submit_document(&mut self, document: SessionDocument) -> Result<(), FlowError> {
        self.expect_view(View::DocumentInput)?;
        let mode = self.mode.ok_or(FlowError::MissingMode)?;
        self.document = Some(document);
        self.view = match mode {
            SessionKind::Practice => View::PracticeSettings,
            SessionKind::Interview => View::InterviewSettings,
        };
        Ok(())
    }

    /// One step back: settings forms return to document input (document
    /// retained), document input returns home (mode cleared).
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` anywhere else.
    pub fn back(&mut self) -> Result<(), FlowError> {
        match self.view {
            View::DocumentInput => {
                self.mode = None;
                self.view = View::Home;
                Ok(())
            }
            View::PracticeSettings | View::InterviewSettings => {
                self.view = View::DocumentInput;
                Ok(())
            }
            view => Err(FlowError::InvalidTransition { view }),
        }
    }

    /// Starts the interview session with the given settings.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` off the interview settings
    /// form and `FlowError::MissingDocument` if none was captured.
    pub fn start_interview(&mut self, settings: InterviewSettings) -> Result<(), FlowError> {
        self.expect_view(View::InterviewSettings)?;
        if self.document.is_none() {
            return Err(FlowError::MissingDocument);
        }
        self.settings = Some(SessionSettings::Interview(settings));
        self.view = View::InterviewSession;
        Ok(())
    }

    /// Starts the practice session with the given settings.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` off the practice settings
    /// form and `FlowError::MissingDocument` if none was captured.
    pub fn start_practice(&mut self, settings: PracticeSettings) -> Result<(), FlowError> {
        self.expect_view(View::PracticeSettings)?;
        if self.document.is_none() {
            return Err(FlowError::MissingDocument);
        }
        self.settings = Some(SessionSettings::Practice(settings));
        self.view = View::PracticeSession;
        Ok(())
    }

    /// The inputs the interview session view builds its engine from.
    ///
    /// # Errors
    ///
    /// Returns a `FlowError` if the view was reached without them, which
    /// the transition guards are supposed to make impossible.
    pub fn interview_inputs(&self) -> Result<(&SessionDocument, &InterviewSettings), FlowError> {
        let document = self.document.as_ref().ok_or(FlowError::MissingDocument)?;
        let settings = self
            .settings
            .as_ref()
            .and_then(SessionSettings::as_interview)
            .ok_or(FlowError::MissingSettings)?;
        Ok((document, settings))
    }

    /// The inputs the practice session view builds its engine from.
    ///
    /// # Errors
    ///
    /// Same contract as `interview_inputs`.
    pub fn practice_inputs(&self) -> Result<(&SessionDocument, &PracticeSettings), FlowError> {
        let document = self.document.as_ref().ok_or(FlowError::MissingDocument)?;
        let settings = self
            .settings
            .as_ref()
            .and_then(SessionSettings::as_practice)
            .ok_or(FlowError::MissingSettings)?;
        Ok((document, settings))
    }

    /// An interview finished (timeout or script exhausted); show the
    /// completion screen.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` off the interview session.
    pub fn complete_interview(&mut self, result: SessionResult) -> Result<(), FlowError> {
        self.expect_view(View::InterviewSession)?;
        self.last_result = Some(result);
        self.view = View::InterviewComplete;
        Ok(())
    }

    /// Saves the completed interview: hands back the bundle to archive and
    /// moves to the archive view. `generated_document` carries the
    /// synthesized summary when the user waited for one.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` off the completion screen, or
    /// a missing-state error if the accumulated data is gone.
    pub fn save_interview(
        &mut self,
        generated_document: Option<String>,
    ) -> Result<CompletedSession, FlowError> {
        self.expect_view(View::InterviewComplete)?;
        let document = self.document.clone().ok_or(FlowError::MissingDocument)?;
        let settings = self.settings.ok_or(FlowError::MissingSettings)?;
        let mut result = self.last_result.clone().ok_or(FlowError::MissingResult)?;
        if let Some(summary) = generated_document {
            result = result.with_document(summary);
        }
        let completed = CompletedSession {
            kind: SessionKind::Interview,
            document,
            settings,
            result,
        };
        self.reset_accumulated();
        self.view = View::Archive;
        Ok(completed)
    }

    /// Leaves the completion screen without saving.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` off the completion screen.
    pub fn skip_interview_save(&mut self) -> Result<(), FlowError> {
        self.expect_view(View::InterviewComplete)?;
        self.reset_accumulated();
        self.view = View::Home;
        Ok(())
    }

    /// A practice session ended. `None` means the user skipped saving:
    /// straight home with everything reset. `Some` hands back the bundle to
    /// archive and moves to the archive view.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` off the practice session, or
    /// a missing-state error if the accumulated data is gone.
    pub fn complete_practice(
        &mut self,
        result: Option<SessionResult>,
    ) -> Result<Option<CompletedSession>, FlowError> {
        self.expect_view(View::PracticeSession)?;
        let Some(result) = result else {
            self.reset_accumulated();
            self.view = View::Home;
            return Ok(None);
        };
        let document = self.document.clone().ok_or(FlowError::MissingDocument)?;
        let settings = self.settings.ok_or(FlowError::MissingSettings)?;
        let completed = CompletedSession {
            kind: SessionKind::Practice,
            document,
            settings,
            result,
        };
        self.reset_accumulated();
        self.view = View::Archive;
        Ok(Some(completed))
    }

    /// Global navigation (header links). Mid-session this parks the target
    /// and asks for confirmation; otherwise it moves, resetting all
    /// accumulated state when the target is home.
    pub fn request_view(&mut self, target: View) -> NavOutcome {
        if self.view.is_session() {
            self.pending_view = Some(target);
            return NavOutcome::NeedsConfirmation;
        }
        self.apply_navigation(target);
        NavOutcome::Moved
    }

    /// Confirms leaving a running session: the in-progress turn data is
    /// discarded and every accumulated field is cleared.
    pub fn confirm_exit(&mut self) {
        if let Some(target) = self.pending_view.take() {
            self.reset_accumulated();
            self.view = target;
        }
    }

    /// Declines leaving; state stays untouched.
    pub fn cancel_exit(&mut self) {
        self.pending_view = None;
    }

    fn apply_navigation(&mut self, target: View) {
        if target == View::Home {
            self.reset_accumulated();
        }
        self.view = target;
    }

    fn reset_accumulated(&mut self) {
        self.mode = None;
        self.document = None;
        self.settings = None;
        self.last_result = None;
    }

    fn expect_view(&self, expected: View) -> Result<(), FlowError> {
        if self.view == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition { view: self.view })
        }
    }
}
