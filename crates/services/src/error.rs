//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

use crate::flow::View;

/// Errors emitted by the session engines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("answer text is empty")]
    EmptyAnswer,

    #[error("{operation} is not valid in the current phase")]
    InvalidPhase { operation: &'static str },

    #[error("session is already complete")]
    AlreadyComplete,

    #[error("recording is only available in voice mode")]
    NotVoiceMode,

    #[error("no recording in progress")]
    NoRecording,
}

/// Errors emitted by the flow controller.
///
/// Reaching a session view without its inputs is a programming invariant
/// violation; it surfaces as `MissingDocument`/`MissingSettings` instead of
/// panicking so the UI can fall back to the home view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    #[error("event is not valid while viewing {view:?}")]
    InvalidTransition { view: View },

    #[error("no mode selected")]
    MissingMode,

    #[error("no source document captured")]
    MissingDocument,

    #[error("no session settings captured")]
    MissingSettings,

    #[error("no completed result to save")]
    MissingResult,
}

/// Errors emitted by `ArchiveService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Record(#[from] rehearse_core::model::ArchiveRecordError),

    #[error("invalid demo content: {0}")]
    Demo(String),
}
