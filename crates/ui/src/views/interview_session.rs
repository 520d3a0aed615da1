use std::time::Duration;

use dioxus::prelude::*;

use rehearse_core::model::{AnswerMode, ConversationTurn, Speaker};
use services::{
    FlowController, InterviewEngine, InterviewPhase, NEXT_QUESTION_DELAY_MS, RecordingTick,
    THINKING_DELAY_MS, TickOutcome, View,
};

use crate::context::AppContext;
use crate::vm::format_clock;

#[component]
pub fn InterviewSessionView() -> Element {
    let ctx = use_context::<AppContext>();
    let flow = use_context::<Signal<FlowController>>();

    let feedback = ctx.feedback();
    let clock = ctx.clock();
    let mut engine = use_signal(move || {
        // The flow guards make these inputs present; a miss renders the
        // invariant screen below instead of panicking.
        let guard = flow.peek();
        guard.interview_inputs().ok().map(|(document, settings)| {
            InterviewEngine::new(document.clone(), *settings, feedback.clone(), clock)
        })
    });

    // The session countdown: one cancellable ticker for the whole view.
    // Dropping the component (navigation away) drops the task.
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let outcome = engine.write().as_mut().map(InterviewEngine::tick);
            match outcome {
                Some(TickOutcome::Running { .. }) => {}
                Some(TickOutcome::Expired) => {
                    finish_session(engine, flow);
                    break;
                }
                None => break,
            }
        }
    });

    let mut input = use_signal(String::new);

    let on_send = move |_| {
        let text = input.peek().clone();
        let submitted = engine
            .write()
            .as_mut()
            .is_some_and(|e| e.submit_answer(&text).is_ok());
        if submitted {
            input.set(String::new());
            schedule_scoring(engine, flow);
        }
    };

    let on_record = move |_| {
        let started = engine
            .write()
            .as_mut()
            .is_some_and(|e| e.start_recording().is_ok());
        if started {
            schedule_recording_ticks(engine, flow);
        }
    };

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
    let remaining = session.remaining_secs();
    let total = session.settings().duration_secs();
    let voice_mode = session.settings().mode() == AnswerMode::Voice;
    let recording = session.recording_remaining();
    let answer_limit = session.settings().max_answer_secs().unwrap_or(0);
    let turns: Vec<ConversationTurn> = session.turns().to_vec();
    let progress_pct = if total == 0 {
        0.0
    } else {
        f64::from(total - remaining) / f64::from(total) * 100.0
    };
    let timer_label = format_clock(remaining);
    let mode_label = if voice_mode { "Voice mode" } else { "Chat mode" };
    let can_send = !input.read().trim().is_empty() && phase == InterviewPhase::AwaitingAnswer;
    let recording_view =
        recording.map(|secs| (format_clock(secs), recording_pct(answer_limit, secs)));

    rsx! {
        div { class: "page session-page",
            header { class: "session-header",
                h2 { class: "view-title", "Live Interview" }
                div { class: "session-badges",
                    span { class: "badge badge--timer", "{timer_label}" }
                    span { class: "badge", "{mode_label}" }
                }
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {progress_pct}%" }
            }

            div { class: "chat-panel",
                div { class: "chat-log",
                    for turn in turns {
                        ChatBubble { turn }
                    }
                    if phase == InterviewPhase::Scoring {
                        p { class: "chat-thinking", "Reviewing your answer..." }
                    }
                }
                div { class: "chat-input-row",
                    input {
                        class: "field-input chat-input",
                        r#type: "text",
                        placeholder: "Type your answer...",
                        value: "{input()}",
                        disabled: phase != InterviewPhase::AwaitingAnswer,
                        oninput: move |evt| input.set(evt.value()),
                    }
                    if voice_mode {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: phase != InterviewPhase::AwaitingAnswer,
                            onclick: on_record,
                            "Record"
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: !can_send,
                        onclick: on_send,
                        "Send"
                    }
                }
            }

            if let Some((recording_label, recording_fill)) = recording_view {
                div { class: "modal-overlay",
                    div { class: "modal modal--recording", role: "dialog", aria_modal: "true",
                        h3 { class: "modal-title", "Speak your answer" }
                        p { class: "recording-clock", "{recording_label}" }
                        div { class: "progress-track",
                            div {
                                class: "progress-fill progress-fill--recording",
                                style: "width: {recording_fill}%",
                            }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                let stopped = engine
                                    .write()
                                    .as_mut()
                                    .is_some_and(|e| e.stop_recording().is_ok());
                                if stopped {
                                    schedule_scoring(engine, flow);
                                }
                            },
                            "Stop recording"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ChatBubble(turn: ConversationTurn) -> Element {
    let side = match turn.speaker() {
        Speaker::Ai => "chat-bubble chat-bubble--ai",
        Speaker::User => "chat-bubble chat-bubble--user",
    };
    rsx! {
        div { class: "{side}",
            p { class: "chat-text", "{turn.text()}" }
            if let Some(score) = turn.score() {
                span { class: "badge badge--score", "Score: {score}" }
            }
        }
    }
}

fn recording_pct(limit_secs: u32, remaining_secs: u32) -> f64 {
    if limit_secs == 0 {
        return 0.0;
    }
    f64::from(limit_secs - remaining_secs.min(limit_secs)) / f64::from(limit_secs) * 100.0
}

/// Thinking delay, then feedback; then either the next question after its
/// own short delay, or completion when the script is exhausted. A session
/// that timed out in between makes `deliver_feedback` fail, which is the
/// abandon path: the countdown ticker already completed the session.
fn schedule_scoring(mut engine: Signal<Option<InterviewEngine>>, flow: Signal<FlowController>) {
    spawn(async move {
        tokio::time::sleep(Duration::from_millis(THINKING_DELAY_MS)).await;
        let phase = {
            let mut guard = engine.write();
            let Some(session) = guard.as_mut() else {
                return;
            };
            if session.deliver_feedback().is_err() {
                return;
            }
            session.phase()
        };
        match phase {
            InterviewPhase::Complete => finish_session(engine, flow),
            InterviewPhase::AwaitingNextQuestion => {
                tokio::time::sleep(Duration::from_millis(NEXT_QUESTION_DELAY_MS)).await;
                if let Some(session) = engine.write().as_mut() {
                    let _ = session.advance_question();
                }
            }
            InterviewPhase::AwaitingAnswer | InterviewPhase::Scoring => {}
        }
    });
}

fn schedule_recording_ticks(
    mut engine: Signal<Option<InterviewEngine>>,
    flow: Signal<FlowController>,
) {
    spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let tick = engine.write().as_mut().map(InterviewEngine::tick_recording);
            match tick {
                Some(Ok(RecordingTick::Running { .. })) => {}
                Some(Ok(RecordingTick::Finished)) => {
                    schedule_scoring(engine, flow);
                    break;
                }
                // Recording gone: stopped manually or the session ended.
                Some(Err(_)) | None => break,
            }
        }
    });
}

fn finish_session(engine: Signal<Option<InterviewEngine>>, mut flow: Signal<FlowController>) {
    let result = engine.peek().as_ref().and_then(|e| e.result().ok());
    if let Some(result) = result {
        let _ = flow.write().complete_interview(result);
    }
}
