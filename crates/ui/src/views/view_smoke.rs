use rehearse_core::model::{
    AnswerMode, ArchiveRecord, ConversationTurn, Difficulty, InterviewSettings, PracticeSettings,
    RecordId, Score, SessionDocument, SessionKind, SessionResult, SessionSettings, Speaker,
    SpeakingStyle, TurnId,
};
use rehearse_core::time::fixed_now;
use services::{FlowController, View};
use storage::ArchiveRepository;

use super::test_harness::{setup_view_harness, setup_view_harness_with_repository};

fn flow_at_interview_session() -> FlowController {
    let mut flow = FlowController::new();
    flow.select_mode(SessionKind::Interview).unwrap();
    flow.submit_document(SessionDocument::text("smoke notes").unwrap())
        .unwrap();
    flow.start_interview(
        InterviewSettings::new(300, SpeakingStyle::Interviewer, AnswerMode::Chat, None).unwrap(),
    )
    .unwrap();
    flow
}

fn flow_at_practice_session() -> FlowController {
    let mut flow = FlowController::new();
    flow.select_mode(SessionKind::Practice).unwrap();
    flow.submit_document(SessionDocument::text("smoke notes").unwrap())
        .unwrap();
    flow.start_practice(PracticeSettings::new(2, Difficulty::Easy).unwrap())
        .unwrap();
    flow
}

fn interview_record() -> ArchiveRecord {
    let feedback = ConversationTurn::new(TurnId::new(1), Speaker::Ai, "Sharp answer.", fixed_now())
        .unwrap()
        .with_score(Score::new(91).unwrap());
    ArchiveRecord::new(
        RecordId::generate(),
        fixed_now(),
        SessionKind::Interview,
        SessionDocument::text("archived interview notes").unwrap(),
        SessionSettings::Interview(
            InterviewSettings::new(600, SpeakingStyle::Interviewer, AnswerMode::Chat, None)
                .unwrap(),
        ),
        SessionResult::from_turns(vec![feedback]).with_document("# Interview Session Report"),
    )
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_renders_both_mode_cards() {
    let mut harness = setup_view_harness(FlowController::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Practice Mode"), "missing practice card in {html}");
    assert!(html.contains("Live Interview"), "missing interview card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn document_input_renders_both_tabs() {
    let mut flow = FlowController::new();
    flow.select_mode(SessionKind::Practice).unwrap();

    let mut harness = setup_view_harness(flow);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Source Document"), "missing heading in {html}");
    assert!(html.contains("Document link"), "missing link tab in {html}");
    assert!(html.contains("Paste text"), "missing text tab in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn interview_session_shows_first_question_and_timer() {
    let mut harness = setup_view_harness(flow_at_interview_session());
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Please walk me through your most significant project experience."),
        "missing first question in {html}"
    );
    assert!(html.contains("5:00"), "missing countdown in {html}");
    assert!(html.contains("Chat mode"), "missing mode badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_session_shows_first_question_and_progress() {
    let mut harness = setup_view_harness(flow_at_practice_session());
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Explain the difference between HTML and CSS."),
        "missing first question in {html}"
    );
    assert!(html.contains("1 / 2"), "missing progress badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exit_dialog_appears_when_navigating_mid_session() {
    let mut flow = flow_at_interview_session();
    flow.request_view(View::Home);

    let mut harness = setup_view_harness(flow);
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("A session is in progress"),
        "missing exit dialog in {html}"
    );
    assert!(html.contains("Leave"), "missing confirm button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn archive_renders_saved_interview_record() {
    let mut flow = FlowController::new();
    flow.request_view(View::Archive);

    let mut harness = setup_view_harness(flow);
    harness
        .repository
        .append(&interview_record())
        .await
        .expect("append record");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("91"), "missing score in {html}");
    assert!(
        html.contains("archived interview notes"),
        "missing document preview in {html}"
    );
}

struct FailingArchive;

#[async_trait::async_trait]
impl ArchiveRepository for FailingArchive {
    async fn list(&self) -> Result<Vec<ArchiveRecord>, storage::StorageError> {
        Err(storage::StorageError::Io("fail".to_string()))
    }

    async fn append(&self, _record: &ArchiveRecord) -> Result<(), storage::StorageError> {
        Err(storage::StorageError::Io("fail".to_string()))
    }

    async fn remove(&self, _id: RecordId) -> Result<(), storage::StorageError> {
        Err(storage::StorageError::Io("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn archive_renders_error_state_with_retry() {
    let mut flow = FlowController::new();
    flow.request_view(View::Archive);

    let mut harness = setup_view_harness_with_repository(
        flow,
        std::sync::Arc::new(storage::InMemoryArchive::new()),
        std::sync::Arc::new(FailingArchive),
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong"),
        "missing error message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn archive_empty_state_renders() {
    let mut flow = FlowController::new();
    flow.request_view(View::Archive);

    let mut harness = setup_view_harness(flow);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Nothing archived here yet."),
        "missing empty state in {html}"
    );
}
