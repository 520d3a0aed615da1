mod archive;
mod completion;
mod document_input;
mod documents;
mod home;
mod interview_session;
mod interview_settings;
mod practice_session;
mod practice_settings;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use archive::ArchiveView;
pub use completion::InterviewCompleteView;
pub use document_input::DocumentInputView;
pub use documents::DocumentsView;
pub use home::HomeView;
pub use interview_session::InterviewSessionView;
pub use interview_settings::InterviewSettingsView;
pub use practice_session::PracticeSessionView;
pub use practice_settings::PracticeSettingsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
