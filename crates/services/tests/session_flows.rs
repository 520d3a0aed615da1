use std::sync::Arc;

use rehearse_core::model::{
    AnswerMode, Difficulty, InterviewSettings, PracticeSettings, SessionDocument, SessionKind,
    SpeakingStyle,
};
use rehearse_core::time::fixed_clock;
use services::{
    ArchiveService, FixedFeedback, FlowController, InterviewEngine, NavOutcome, PracticeEngine,
    TickOutcome, View, synthesize_summary,
};
use storage::{ArchiveRepository, InMemoryArchive};

fn document() -> SessionDocument {
    SessionDocument::text("distributed cache project notes").unwrap()
}

#[tokio::test]
async fn interview_runs_end_to_end_and_lands_in_the_archive() {
    let repository: Arc<dyn ArchiveRepository> = Arc::new(InMemoryArchive::new());
    let archive = ArchiveService::new(fixed_clock(), Arc::clone(&repository));
    let mut flow = FlowController::new();

    // Home -> document -> settings -> session.
    flow.select_mode(SessionKind::Interview).unwrap();
    flow.submit_document(document()).unwrap();
    let settings =
        InterviewSettings::new(300, SpeakingStyle::Interviewer, AnswerMode::Chat, None).unwrap();
    flow.start_interview(settings).unwrap();

    // Drive the engine: one answered question, then the timer runs out.
    let (doc, engine_settings) = flow.interview_inputs().unwrap();
    let mut engine = InterviewEngine::new(
        doc.clone(),
        *engine_settings,
        Arc::new(FixedFeedback::new(91)),
        fixed_clock(),
    );
    engine.submit_answer("I sharded the cache by tenant.").unwrap();
    engine.deliver_feedback().unwrap();
    engine.advance_question().unwrap();
    while engine.tick() != TickOutcome::Expired {}

    let result = engine.result().unwrap();
    assert_eq!(result.average_score().value(), 91);

    // Completion screen -> synthesize a summary -> save.
    flow.complete_interview(result).unwrap();
    assert_eq!(flow.view(), View::InterviewComplete);

    let last = flow.last_result().unwrap().clone();
    let summary = synthesize_summary(
        SessionKind::Interview,
        &document(),
        &rehearse_core::model::SessionSettings::Interview(settings),
        &last,
    );
    let completed = flow.save_interview(Some(summary)).unwrap();
    let record = archive.save(completed).await.unwrap();

    assert_eq!(flow.view(), View::Archive);
    assert_eq!(record.result().average_score().value(), 91);
    assert!(record.result().generated_document().is_some());
    assert_eq!(repository.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn practice_save_archives_and_skip_does_not() {
    let repository: Arc<dyn ArchiveRepository> = Arc::new(InMemoryArchive::new());
    let archive = ArchiveService::new(fixed_clock(), Arc::clone(&repository));

    for save in [false, true] {
        let mut flow = FlowController::new();
        flow.select_mode(SessionKind::Practice).unwrap();
        flow.submit_document(document()).unwrap();
        flow.start_practice(PracticeSettings::new(1, Difficulty::Easy).unwrap())
            .unwrap();

        let (doc, settings) = flow.practice_inputs().unwrap();
        let mut engine = PracticeEngine::new(
            doc.clone(),
            *settings,
            Arc::new(FixedFeedback::new(86)),
            fixed_clock(),
        );
        engine.submit_answer("Markup versus styling.").unwrap();
        engine.begin_follow_up().unwrap();
        engine.submit_follow_up("I themed a dashboard with CSS.").unwrap();
        engine.advance().unwrap();

        if save {
            let result = engine.save().unwrap();
            assert_eq!(result.scored_turn_count(), 2);
            assert_eq!(result.average_score().value(), 86);
            let completed = flow.complete_practice(Some(result)).unwrap().unwrap();
            archive.save(completed).await.unwrap();
            assert_eq!(flow.view(), View::Archive);
        } else {
            engine.skip().unwrap();
            assert!(flow.complete_practice(None).unwrap().is_none());
            assert_eq!(flow.view(), View::Home);
        }
    }

    // Only the saved run reached storage.
    assert_eq!(repository.list().await.unwrap().len(), 1);
    assert_eq!(archive.practice_records().await.unwrap().len(), 1);
}

#[tokio::test]
async fn abandoning_a_session_leaves_no_trace() {
    let repository = Arc::new(InMemoryArchive::new());
    let mut flow = FlowController::new();

    flow.select_mode(SessionKind::Interview).unwrap();
    flow.submit_document(document()).unwrap();
    flow.start_interview(
        InterviewSettings::new(300, SpeakingStyle::Friend, AnswerMode::Chat, None).unwrap(),
    )
    .unwrap();

    // The user walks away mid-session and confirms.
    assert_eq!(flow.request_view(View::Home), NavOutcome::NeedsConfirmation);
    flow.confirm_exit();

    assert_eq!(flow.view(), View::Home);
    assert!(flow.document().is_none());
    assert!(flow.settings().is_none());
    assert!(repository.list().await.unwrap().is_empty());
}
