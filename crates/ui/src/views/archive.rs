use dioxus::prelude::*;

use rehearse_core::model::{ArchiveRecord, RecordId, SessionKind, Speaker};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{format_datetime, map_archive_cards, markdown_to_html};

#[derive(Clone, Debug, PartialEq)]
struct ArchiveData {
    records: Vec<ArchiveRecord>,
}

#[component]
pub fn ArchiveView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut tab = use_signal(|| SessionKind::Interview);
    let mut detail = use_signal(|| None::<RecordId>);

    let archive_for_resource = ctx.archive();
    let resource = use_resource(move || {
        let archive = archive_for_resource.clone();
        async move {
            let records = archive.list().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(ArchiveData { records })
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page archive-page",
            header { class: "view-header",
                h2 { class: "view-title", "Archive" }
                p { class: "view-subtitle", "Every saved session, newest first." }
            }
            div { class: "tab-row",
                button {
                    class: if tab() == SessionKind::Interview { "tab tab--active" } else { "tab" },
                    r#type: "button",
                    onclick: move |_| tab.set(SessionKind::Interview),
                    "Interviews"
                }
                button {
                    class: if tab() == SessionKind::Practice { "tab tab--active" } else { "tab" },
                    r#type: "button",
                    onclick: move |_| tab.set(SessionKind::Practice),
                    "Practice"
                }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => {
                    let visible: Vec<ArchiveRecord> = data
                        .records
                        .iter()
                        .filter(|record| record.kind() == tab())
                        .cloned()
                        .collect();
                    let cards = map_archive_cards(&visible);
                    let detail_record = detail()
                        .and_then(|id| data.records.iter().find(|r| r.id() == id).cloned());
                    let archive_for_delete = ctx.archive();
                    let card_items = cards.into_iter().map(move |card| {
                        let archive = archive_for_delete.clone();
                        let record_id = card.id;
                        let mut detail = detail;
                        rsx! {
                            div { class: "archive-card",
                                div { class: "archive-card-main",
                                    div { class: "archive-card-badges",
                                        span { class: "badge badge--score {card.score_class}", "{card.score}" }
                                        span { class: "archive-card-date", "{card.date_label}" }
                                    }
                                    p { class: "archive-card-settings", "{card.settings_label}" }
                                    p { class: "archive-card-preview", "{card.document_preview}" }
                                }
                                div { class: "archive-card-actions",
                                    button {
                                        class: "btn btn-secondary btn-small",
                                        r#type: "button",
                                        onclick: move |_| detail.set(Some(record_id)),
                                        "Details"
                                    }
                                    button {
                                        class: "btn btn-danger btn-small",
                                        r#type: "button",
                                        onclick: move |_| {
                                            let archive = archive.clone();
                                            let mut resource = resource;
                                            spawn(async move {
                                                if let Err(e) = archive.remove(record_id).await {
                                                    log::warn!("failed to delete record: {e}");
                                                }
                                                resource.restart();
                                            });
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    });
                    rsx! {
                        if visible.is_empty() {
                            div { class: "archive-empty",
                                p { "Nothing archived here yet." }
                                p { class: "archive-empty-hint",
                                    "Finish a session and save it to see it listed."
                                }
                            }
                        } else {
                            div { class: "archive-list",
                                {card_items}
                            }
                        }
                        if let Some(record) = detail_record {
                            RecordDetailDialog {
                                record,
                                on_close: move |_| detail.set(None),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordDetailDialog(record: ArchiveRecord, on_close: EventHandler<()>) -> Element {
    let kind_label = match record.kind() {
        SessionKind::Interview => "Interview",
        SessionKind::Practice => "Practice",
    };
    let date_label = format_datetime(record.created_at());
    let score = record.result().average_score();
    let summary_html = record
        .result()
        .generated_document()
        .map(markdown_to_html);
    let turns = record.result().turns().to_vec();

    rsx! {
        div { class: "modal-overlay", onclick: move |_| on_close.call(()),
            div {
                class: "modal modal--wide",
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "{kind_label} · {date_label} · {score} points" }
                div { class: "detail-section",
                    h4 { class: "detail-heading", "Source document" }
                    p { class: "detail-document", "{record.source_document().content()}" }
                }
                div { class: "detail-section",
                    h4 { class: "detail-heading", "Conversation" }
                    div { class: "chat-log chat-log--compact",
                        for turn in turns {
                            div {
                                class: match turn.speaker() {
                                    Speaker::Ai => "chat-bubble chat-bubble--ai",
                                    Speaker::User => "chat-bubble chat-bubble--user",
                                },
                                p { class: "chat-text", "{turn.text()}" }
                                if let Some(turn_score) = turn.score() {
                                    span { class: "badge badge--score", "Score: {turn_score}" }
                                }
                            }
                        }
                    }
                }
                if let Some(html) = summary_html {
                    div { class: "detail-section",
                        h4 { class: "detail-heading", "Generated summary" }
                        div { class: "detail-summary", dangerous_inner_html: "{html}" }
                    }
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
