use dioxus::prelude::*;

use rehearse_core::model::{AnswerMode, InterviewSettings, SpeakingStyle};
use services::FlowController;

const DURATION_MINUTES: [u32; 3] = [5, 10, 15];
const ANSWER_LIMIT_MINUTES: [u32; 3] = [1, 2, 3];

#[component]
pub fn InterviewSettingsView() -> Element {
    let mut flow = use_context::<Signal<FlowController>>();
    let mut duration_min = use_signal(|| 10u32);
    let mut style = use_signal(|| SpeakingStyle::Interviewer);
    let mut mode = use_signal(|| AnswerMode::Chat);
    let mut answer_limit_min = use_signal(|| 2u32);
    let mut form_error = use_signal(|| None::<String>);

    let on_start = move |_| {
        let max_answer_secs = match mode() {
            AnswerMode::Voice => Some(answer_limit_min() * 60),
            AnswerMode::Chat => None,
        };
        match InterviewSettings::new(duration_min() * 60, style(), mode(), max_answer_secs) {
            Ok(settings) => {
                form_error.set(None);
                let _ = flow.write().start_interview(settings);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    };

    rsx! {
        div { class: "page settings-page",
            header { class: "view-header",
                h2 { class: "view-title", "Interview Setup" }
                p { class: "view-subtitle", "Choose how the mock interview runs." }
            }

            div { class: "field",
                span { class: "field-label", "Duration" }
                div { class: "choice-row",
                    for minutes in DURATION_MINUTES {
                        button {
                            class: if duration_min() == minutes { "choice choice--active" } else { "choice" },
                            r#type: "button",
                            onclick: move |_| duration_min.set(minutes),
                            "{minutes} min"
                        }
                    }
                }
            }

            div { class: "field",
                span { class: "field-label", "Interviewer persona" }
                div { class: "choice-row",
                    button {
                        class: if style() == SpeakingStyle::Friend { "choice choice--active" } else { "choice" },
                        r#type: "button",
                        title: "Casual questions, plain-language explanations expected",
                        onclick: move |_| style.set(SpeakingStyle::Friend),
                        "Non-developer friend"
                    }
                    button {
                        class: if style() == SpeakingStyle::Interviewer { "choice choice--active" } else { "choice" },
                        r#type: "button",
                        title: "Formal questions, structured answers expected",
                        onclick: move |_| style.set(SpeakingStyle::Interviewer),
                        "Interviewer"
                    }
                }
            }

            div { class: "field",
                span { class: "field-label", "Answer mode" }
                div { class: "choice-row",
                    button {
                        class: if mode() == AnswerMode::Chat { "choice choice--active" } else { "choice" },
                        r#type: "button",
                        onclick: move |_| mode.set(AnswerMode::Chat),
                        "Chat"
                    }
                    button {
                        class: if mode() == AnswerMode::Voice { "choice choice--active" } else { "choice" },
                        r#type: "button",
                        onclick: move |_| mode.set(AnswerMode::Voice),
                        "Voice"
                    }
                }
            }

            if mode() == AnswerMode::Voice {
                div { class: "field",
                    span { class: "field-label", "Max time per answer" }
                    div { class: "choice-row",
                        for minutes in ANSWER_LIMIT_MINUTES {
                            button {
                                class: if answer_limit_min() == minutes { "choice choice--active" } else { "choice" },
                                r#type: "button",
                                onclick: move |_| answer_limit_min.set(minutes),
                                "{minutes} min"
                            }
                        }
                    }
                }
            }

            if let Some(message) = form_error() {
                p { class: "field-error", "{message}" }
            }

            div { class: "button-row",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = flow.write().back();
                    },
                    "Back"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: on_start,
                    "Start Interview"
                }
            }
        }
    }
}
