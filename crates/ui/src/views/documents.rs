use dioxus::prelude::*;

/// Placeholder for the document library. Sessions currently take their
/// source material at flow start; saved documents come later.
#[component]
pub fn DocumentsView() -> Element {
    rsx! {
        div { class: "page documents-page",
            header { class: "view-header",
                h2 { class: "view-title", "Document Library" }
                p { class: "view-subtitle",
                    "A place to keep the documents you practice against."
                }
            }
            div { class: "mode-grid",
                div { class: "mode-card",
                    h3 { class: "mode-card-title", "Linked documents" }
                    p { class: "mode-card-blurb",
                        "Save links to your notes, blog posts, or READMEs and reuse them across sessions."
                    }
                }
                div { class: "mode-card",
                    h3 { class: "mode-card-title", "Text documents" }
                    p { class: "mode-card-blurb",
                        "Keep pasted project descriptions and study notes ready to go."
                    }
                }
            }
            p { class: "view-hint",
                "Not wired up yet. For now, each session asks for its document when it starts."
            }
        }
    }
}
