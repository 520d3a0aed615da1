use std::time::Duration;

use dioxus::prelude::*;

use rehearse_core::model::SessionKind;
use services::{
    FlowController, PracticeEngine, PracticePhase, SUMMARY_DELAY_MS, View, synthesize_summary,
};

use crate::context::AppContext;
use crate::views::ViewError;

#[component]
pub fn PracticeSessionView() -> Element {
    let ctx = use_context::<AppContext>();
    let flow = use_context::<Signal<FlowController>>();

    let feedback = ctx.feedback();
    let clock = ctx.clock();
    let mut engine = use_signal(move || {
        let guard = flow.peek();
        guard.practice_inputs().ok().map(|(document, settings)| {
            PracticeEngine::new(document.clone(), *settings, feedback.clone(), clock)
        })
    });

    let mut answer = use_signal(String::new);
    let mut follow_up_answer = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut save_error = use_signal(|| None::<ViewError>);

    let guard = engine.read();
    let Some(session) = guard.as_ref() else {
        let mut flow = flow;
        return rsx! {
            div { class: "page",
                p { "This session is missing its setup. Start again from the home screen." }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = flow.write().request_view(View::Home);
                    },
                    "Back to home"
                }
            }
        };
    };

    let phase = session.phase();
    let question = session.current_question();
    let follow_up = session.follow_up_question();
    let question_number = session.question_number();
    let question_count = session.question_count();
    let feedback_text = session
        .last_feedback()
        .map(|turn| turn.text().to_string())
        .unwrap_or_default();
    let is_last_question = question_number == question_count;
    #[allow(clippy::cast_precision_loss)]
    let progress_pct = (question_number.saturating_sub(1)) as f64 / question_count as f64 * 100.0;

    let on_submit = move |_| {
        let text = answer.peek().clone();
        if let Some(session) = engine.write().as_mut() {
            let _ = session.submit_answer(&text);
        }
    };

    let on_begin_follow_up = move |_| {
        if let Some(session) = engine.write().as_mut() {
            let _ = session.begin_follow_up();
        }
    };

    let on_submit_follow_up = move |_| {
        let text = follow_up_answer.peek().clone();
        if let Some(session) = engine.write().as_mut() {
            let _ = session.submit_follow_up(&text);
        }
    };

    let on_advance = move |_| {
        let advanced = engine
            .write()
            .as_mut()
            .is_some_and(|session| session.advance().is_ok());
        if advanced {
            answer.set(String::new());
            follow_up_answer.set(String::new());
        }
    };

    let on_skip = {
        let mut flow = flow;
        move |_| {
            let skipped = engine
                .write()
                .as_mut()
                .is_some_and(|session| session.skip().is_ok());
            if skipped {
                let _ = flow.write().complete_practice(None);
            }
        }
    };

    let archive = ctx.archive();
    let on_save = move |_| {
        if saving() {
            return;
        }
        saving.set(true);
        let archive = archive.clone();
        let mut flow = flow;
        spawn(async move {
            // The simulated document-generation delay, then the real write.
            tokio::time::sleep(Duration::from_millis(SUMMARY_DELAY_MS)).await;
            let saved = {
                let mut engine_guard = engine.write();
                let flow_guard = flow.peek();
                engine_guard.as_mut().and_then(|session| {
                    let result = session.save().ok()?;
                    let (document, settings) = flow_guard.practice_inputs().ok()?;
                    let summary = synthesize_summary(
                        SessionKind::Practice,
                        document,
                        &rehearse_core::model::SessionSettings::Practice(*settings),
                        &result,
                    );
                    Some(result.with_document(summary))
                })
            };
            let Some(result) = saved else {
                saving.set(false);
                save_error.set(Some(ViewError::Unknown));
                return;
            };
            let completed = flow.write().complete_practice(Some(result)).ok().flatten();
            if let Some(completed) = completed {
                if let Err(e) = archive.save(completed).await {
                    log::warn!("failed to archive practice session: {e}");
                }
            }
        });
    };

    rsx! {
        div { class: "page session-page",
            header { class: "session-header",
                h2 { class: "view-title", "Practice" }
                span { class: "badge", "{question_number} / {question_count}" }
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {progress_pct}%" }
            }

            div { class: "practice-card",
                h3 { class: "practice-question", "Question {question_number}" }
                p { class: "practice-question-text", "{question}" }

                match phase {
                    PracticePhase::AwaitingAnswer => rsx! {
                        textarea {
                            class: "field-textarea",
                            placeholder: "Write your answer...",
                            value: "{answer()}",
                            oninput: move |evt| answer.set(evt.value()),
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: answer.read().trim().is_empty(),
                            onclick: on_submit,
                            "Submit answer"
                        }
                    },
                    PracticePhase::PrimaryFeedback => rsx! {
                        div { class: "feedback-panel",
                            h4 { class: "feedback-title", "Feedback" }
                            p { class: "feedback-text", "{feedback_text}" }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: on_begin_follow_up,
                                "Continue to follow-up"
                            }
                        }
                    },
                    PracticePhase::AwaitingFollowUp => rsx! {
                        div { class: "follow-up-panel",
                            h4 { class: "follow-up-title", "Follow-up" }
                            p { class: "follow-up-question", "{follow_up}" }
                            textarea {
                                class: "field-textarea",
                                placeholder: "Answer the follow-up...",
                                value: "{follow_up_answer()}",
                                oninput: move |evt| follow_up_answer.set(evt.value()),
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: follow_up_answer.read().trim().is_empty(),
                                onclick: on_submit_follow_up,
                                "Submit follow-up answer"
                            }
                        }
                    },
                    PracticePhase::FollowUpFeedback => rsx! {
                        div { class: "feedback-panel",
                            h4 { class: "feedback-title", "Follow-up feedback" }
                            p { class: "feedback-text", "{feedback_text}" }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: on_advance,
                                if is_last_question { "Finish practice" } else { "Next question" }
                            }
                        }
                    },
                    PracticePhase::SavePrompt => rsx! {
                        div { class: "modal-overlay",
                            div { class: "modal", role: "dialog", aria_modal: "true",
                                h3 { class: "modal-title", "Practice complete!" }
                                if saving() {
                                    p { class: "modal-body", "Generating your summary document..." }
                                } else {
                                    p { class: "modal-body",
                                        "Save this session to the archive to review it later?"
                                    }
                                }
                                if let Some(err) = save_error() {
                                    p { class: "field-error", "{err.message()}" }
                                }
                                div { class: "modal-actions",
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        disabled: saving(),
                                        onclick: on_skip,
                                        "Don't save"
                                    }
                                    button {
                                        class: "btn btn-primary",
                                        r#type: "button",
                                        disabled: saving(),
                                        onclick: on_save,
                                        "Save to archive"
                                    }
                                }
                            }
                        }
                    },
                    PracticePhase::Complete => rsx! {},
                }
            }
        }
    }
}
