use dioxus::prelude::*;

use rehearse_core::model::SessionKind;
use services::FlowController;

#[component]
pub fn HomeView() -> Element {
    let mut flow = use_context::<Signal<FlowController>>();

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Technical Interview Coach" }
                p { class: "view-subtitle", "Pick a mode to get started." }
            }
            div { class: "mode-grid",
                div { class: "mode-card",
                    h3 { class: "mode-card-title", "Practice Mode" }
                    p { class: "mode-card-blurb",
                        "Take questions seeded from your document and get feedback right away."
                    }
                    ul { class: "mode-card-points",
                        li { "Instant feedback after every answer" }
                        li { "One follow-up question per topic" }
                        li { "Pick your difficulty and pace" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = flow.write().select_mode(SessionKind::Practice);
                        },
                        "Start Practice"
                    }
                }
                div { class: "mode-card",
                    h3 { class: "mode-card-title", "Live Interview" }
                    p { class: "mode-card-blurb",
                        "A timed mock interview with a running conversation and a final score."
                    }
                    ul { class: "mode-card-points",
                        li { "Realistic countdown pressure" }
                        li { "Friendly or formal interviewer persona" }
                        li { "Chat or voice answers" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = flow.write().select_mode(SessionKind::Interview);
                        },
                        "Start Interview"
                    }
                }
            }
        }
    }
}
