use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;

use rehearse_core::Clock;
use rehearse_core::time::fixed_now;
use services::{ArchiveService, FeedbackGenerator, FixedFeedback, FlowController};
use storage::{ArchiveRepository, InMemoryArchive};

use crate::app::Workspace;
use crate::context::{UiApp, build_app_context};

struct TestApp {
    archive: Arc<ArchiveService>,
    feedback: Arc<dyn FeedbackGenerator>,
    clock: Clock,
}

impl UiApp for TestApp {
    fn archive(&self) -> Arc<ArchiveService> {
        Arc::clone(&self.archive)
    }

    fn feedback(&self) -> Arc<dyn FeedbackGenerator> {
        Arc::clone(&self.feedback)
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    flow: FlowController,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let flow_value = props.flow.clone();
    let flow = use_signal(move || flow_value.clone());
    use_context_provider(|| flow);
    rsx! { Workspace {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repository: Arc<InMemoryArchive>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Builds a harness rendering the whole workspace with the given flow
/// state, an in-memory archive, and deterministic scoring.
pub fn setup_view_harness(flow: FlowController) -> ViewHarness {
    let repository = Arc::new(InMemoryArchive::new());
    let repository_dyn: Arc<dyn ArchiveRepository> = Arc::clone(&repository) as _;
    setup_view_harness_with_repository(flow, repository, repository_dyn)
}

/// Variant for injecting a misbehaving repository while keeping an
/// in-memory one around for assertions.
pub fn setup_view_harness_with_repository(
    flow: FlowController,
    repository: Arc<InMemoryArchive>,
    backing: Arc<dyn ArchiveRepository>,
) -> ViewHarness {
    let archive = Arc::new(ArchiveService::new(Clock::fixed(fixed_now()), backing));

    let app = Arc::new(TestApp {
        archive,
        feedback: Arc::new(FixedFeedback::new(88)),
        clock: Clock::fixed(fixed_now()),
    });

    let dom = VirtualDom::new_with_props(HarnessRoot, HarnessProps { app, flow });

    ViewHarness { dom, repository }
}
