use dioxus::prelude::*;

use rehearse_core::model::SessionDocument;
use services::FlowController;

#[derive(Clone, Copy, PartialEq, Eq)]
enum InputTab {
    Link,
    Text,
}

#[component]
pub fn DocumentInputView() -> Element {
    let mut flow = use_context::<Signal<FlowController>>();
    let mut tab = use_signal(|| InputTab::Link);
    let mut link_url = use_signal(String::new);
    let mut text_content = use_signal(String::new);
    let mut validation = use_signal(|| None::<String>);

    let can_continue = match tab() {
        InputTab::Link => !link_url.read().trim().is_empty(),
        InputTab::Text => !text_content.read().trim().is_empty(),
    };

    let on_continue = move |_| {
        let document = match tab() {
            InputTab::Link => SessionDocument::link(link_url.read().clone()),
            InputTab::Text => SessionDocument::text(text_content.read().clone()),
        };
        match document {
            Ok(document) => {
                validation.set(None);
                let _ = flow.write().submit_document(document);
            }
            Err(err) => validation.set(Some(err.to_string())),
        }
    };

    rsx! {
        div { class: "page document-page",
            header { class: "view-header",
                h2 { class: "view-title", "Source Document" }
                p { class: "view-subtitle",
                    "Questions are seeded from the material you provide here."
                }
            }
            div { class: "tab-row",
                button {
                    class: if tab() == InputTab::Link { "tab tab--active" } else { "tab" },
                    r#type: "button",
                    onclick: move |_| tab.set(InputTab::Link),
                    "Document link"
                }
                button {
                    class: if tab() == InputTab::Text { "tab tab--active" } else { "tab" },
                    r#type: "button",
                    onclick: move |_| tab.set(InputTab::Text),
                    "Paste text"
                }
            }
            match tab() {
                InputTab::Link => rsx! {
                    div { class: "field",
                        label { class: "field-label", r#for: "document-link",
                            "Link to your notes, blog post, or README"
                        }
                        input {
                            class: "field-input",
                            id: "document-link",
                            r#type: "text",
                            placeholder: "https://...",
                            value: "{link_url()}",
                            oninput: move |evt| link_url.set(evt.value()),
                        }
                    }
                },
                InputTab::Text => rsx! {
                    div { class: "field",
                        label { class: "field-label", r#for: "document-text",
                            "Paste the material your questions should come from"
                        }
                        textarea {
                            class: "field-textarea",
                            id: "document-text",
                            placeholder: "Tech stack, project experience, study notes...",
                            value: "{text_content()}",
                            oninput: move |evt| text_content.set(evt.value()),
                        }
                    }
                },
            }
            if let Some(message) = validation() {
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
                    disabled: !can_continue,
                    onclick: on_continue,
                    "Continue"
                }
            }
        }
    }
}
