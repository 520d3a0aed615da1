use std::sync::Arc;

use rehearse_core::Clock;
use services::{ArchiveService, FeedbackGenerator};

/// What the composition root (the `app` binary, or a test harness) must
/// provide for the UI to run.
pub trait UiApp: Send + Sync {
    fn archive(&self) -> Arc<ArchiveService>;
    fn feedback(&self) -> Arc<dyn FeedbackGenerator>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    archive: Arc<ArchiveService>,
    feedback: Arc<dyn FeedbackGenerator>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            archive: app.archive(),
            feedback: app.feedback(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn archive(&self) -> Arc<ArchiveService> {
        Arc::clone(&self.archive)
    }

    #[must_use]
    pub fn feedback(&self) -> Arc<dyn FeedbackGenerator> {
        Arc::clone(&self.feedback)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
