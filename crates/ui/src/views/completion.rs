use std::time::Duration;

use dioxus::prelude::*;

use rehearse_core::model::SessionKind;
use services::{FlowController, SUMMARY_DELAY_MS, synthesize_summary};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::score_comment;

#[component]
pub fn InterviewCompleteView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut flow = use_context::<Signal<FlowController>>();
    let mut saving = use_signal(|| false);
    let mut save_error = use_signal(|| None::<ViewError>);

    let score = flow
        .read()
        .last_result()
        .map(|result| result.average_score().value());
    let Some(score) = score else {
        return rsx! {
            div { class: "page",
                p { "No completed session to show. Start again from the home screen." }
            }
        };
    };
    let verdict = score_comment(score);
    let score_class = crate::vm::score_class(score);

    let archive = ctx.archive();
    let on_save = move |_| {
        if saving() {
            return;
        }
        saving.set(true);
        let archive = archive.clone();
        spawn(async move {
            // Simulated summary synthesis before the archive write.
            tokio::time::sleep(Duration::from_millis(SUMMARY_DELAY_MS)).await;
            let completed = {
                let mut guard = flow.write();
                let summary = match (guard.document(), guard.settings(), guard.last_result()) {
                    (Some(document), Some(settings), Some(result)) => Some(synthesize_summary(
                        SessionKind::Interview,
                        document,
                        settings,
                        result,
                    )),
                    _ => None,
                };
                guard.save_interview(summary).ok()
            };
            let Some(completed) = completed else {
                saving.set(false);
                save_error.set(Some(ViewError::Unknown));
                return;
            };
            if let Err(e) = archive.save(completed).await {
                log::warn!("failed to archive interview session: {e}");
            }
        });
    };

    rsx! {
        div { class: "page completion-page",
            header { class: "view-header",
                h2 { class: "view-title", "Interview Complete!" }
            }
            div { class: "completion-card",
                p { class: "completion-label", "Average score" }
                p { class: "completion-score {score_class}", "{score}" }
                p { class: "completion-verdict {score_class}", "{verdict}" }

                if saving() {
                    p { class: "completion-hint", "Generating your summary document..." }
                } else {
                    p { class: "completion-hint",
                        "Save this interview to the archive to review it later?"
                    }
                }
                if let Some(err) = save_error() {
                    p { class: "field-error", "{err.message()}" }
                }

                div { class: "button-row button-row--center",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: saving(),
                        onclick: on_save,
                        "Save to archive"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: saving(),
                        onclick: move |_| {
                            let _ = flow.write().skip_interview_save();
                        },
                        "Back to home"
                    }
                }
            }
        }
    }
}
