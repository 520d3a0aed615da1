use dioxus::prelude::*;

use services::{FlowController, View};

use crate::views::{
    ArchiveView, DocumentInputView, DocumentsView, HomeView, InterviewCompleteView,
    InterviewSessionView, InterviewSettingsView, PracticeSessionView, PracticeSettingsView,
};

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title; screen headings live inside the views.
        document::Title { "Rehearse" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Shell {}
            }
        }
    }
}

/// Owns the flow-controller signal for the production app.
#[component]
fn Shell() -> Element {
    let flow = use_signal(FlowController::new);
    use_context_provider(|| flow);
    rsx! {
        Workspace {}
    }
}

/// Header, current view, and the exit-confirmation dialog. Expects a
/// `Signal<FlowController>` in context; the test harness provides its own.
#[component]
pub(crate) fn Workspace() -> Element {
    let flow = use_context::<Signal<FlowController>>();
    let current = flow.read().view();
    rsx! {
        div { class: "app",
            Header { active: current }
            main { class: "content",
                match current {
                    View::Home => rsx! { HomeView {} },
                    View::DocumentInput => rsx! { DocumentInputView {} },
                    View::PracticeSettings => rsx! { PracticeSettingsView {} },
                    View::InterviewSettings => rsx! { InterviewSettingsView {} },
                    View::PracticeSession => rsx! { PracticeSessionView {} },
                    View::InterviewSession => rsx! { InterviewSessionView {} },
                    View::InterviewComplete => rsx! { InterviewCompleteView {} },
                    View::Archive => rsx! { ArchiveView {} },
                    View::Documents => rsx! { DocumentsView {} },
                }
            }
            ExitConfirmDialog {}
        }
    }
}

#[component]
fn Header(active: View) -> Element {
    let mut flow = use_context::<Signal<FlowController>>();
    let nav_items = [
        ("Home", View::Home),
        ("Documents", View::Documents),
        ("Archive", View::Archive),
    ];
    rsx! {
        header { class: "topbar",
            h1 { class: "topbar-brand", "Rehearse" }
            nav { class: "topbar-nav",
                for (label, target) in nav_items {
                    button {
                        class: if active == target { "topbar-link topbar-link--active" } else { "topbar-link" },
                        r#type: "button",
                        onclick: move |_| {
                            // Mid-session this just opens the confirmation.
                            let _ = flow.write().request_view(target);
                        },
                        "{label}"
                    }
                }
            }
        }
    }
}

#[component]
fn ExitConfirmDialog() -> Element {
    let mut flow = use_context::<Signal<FlowController>>();
    if !flow.read().exit_prompt_open() {
        return rsx! {};
    }
    rsx! {
        div { class: "modal-overlay",
            div { class: "modal", role: "dialog", aria_modal: "true",
                h3 { class: "modal-title", "A session is in progress" }
                p { class: "modal-body",
                    "Leaving now ends the current session. Your progress will not be saved. Leave anyway?"
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| flow.write().cancel_exit(),
                        "Stay"
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| flow.write().confirm_exit(),
                        "Leave"
                    }
                }
            }
        }
    }
}
