use dioxus::prelude::*;

use rehearse_core::model::{Difficulty, MAX_QUESTION_COUNT, PracticeSettings};
use services::FlowController;

#[component]
pub fn PracticeSettingsView() -> Element {
    let mut flow = use_context::<Signal<FlowController>>();
    let mut question_count = use_signal(|| 5u8);
    let mut difficulty = use_signal(|| Difficulty::Medium);
    let mut form_error = use_signal(|| None::<String>);

    let on_start = move |_| match PracticeSettings::new(question_count(), difficulty()) {
        Ok(settings) => {
            form_error.set(None);
            let _ = flow.write().start_practice(settings);
        }
        Err(err) => form_error.set(Some(err.to_string())),
    };

    let difficulty_options = [
        (Difficulty::Easy, "Easy", "Fundamentals and simple implementations"),
        (Difficulty::Medium, "Medium", "Practical experience and deeper concepts"),
        (Difficulty::Hard, "Hard", "System design and advanced topics"),
    ];

    rsx! {
        div { class: "page settings-page",
            header { class: "view-header",
                h2 { class: "view-title", "Practice Setup" }
                p { class: "view-subtitle", "Pick how many questions and how hard." }
            }

            div { class: "field",
                label { class: "field-label", r#for: "question-count",
                    "Number of questions (up to {MAX_QUESTION_COUNT})"
                }
                input {
                    class: "field-input field-input--narrow",
                    id: "question-count",
                    r#type: "number",
                    min: "1",
                    max: "{MAX_QUESTION_COUNT}",
                    value: "{question_count()}",
                    oninput: move |evt| {
                        // Clamp keyboard input into range rather than erroring.
                        if let Ok(value) = evt.value().parse::<u8>() {
                            question_count.set(value.clamp(1, MAX_QUESTION_COUNT));
                        }
                    },
                }
            }

            div { class: "field",
                span { class: "field-label", "Difficulty" }
                div { class: "choice-row",
                    for (value, label, hint) in difficulty_options {
                        button {
                            class: if difficulty() == value { "choice choice--active" } else { "choice" },
                            r#type: "button",
                            title: "{hint}",
                            onclick: move |_| difficulty.set(value),
                            "{label}"
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
                    "Start Practice"
                }
            }
        }
    }
}
