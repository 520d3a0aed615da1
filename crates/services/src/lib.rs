#![forbid(unsafe_code)]

pub mod archive_service;
pub mod error;
pub mod feedback;
pub mod flow;
pub mod interview;
pub mod practice;
pub mod scripts;
pub mod summary;

pub use rehearse_core::Clock;

pub use archive_service::ArchiveService;
pub use error::{ArchiveServiceError, EngineError, FlowError};
pub use feedback::{FeedbackGenerator, FixedFeedback, RandomFeedback};
pub use flow::{CompletedSession, FlowController, NavOutcome, View};
pub use interview::{
    InterviewEngine, InterviewPhase, NEXT_QUESTION_DELAY_MS, RecordingTick, THINKING_DELAY_MS,
    TickOutcome,
};
pub use practice::{PracticeEngine, PracticePhase};
pub use summary::{SUMMARY_DELAY_MS, synthesize_summary};
