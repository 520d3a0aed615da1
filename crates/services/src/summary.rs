//! Simulated summary-document synthesis.
//!
//! The "document generation" the completion screens offer is a fixed delay
//! followed by this markdown template; there is no model behind it.

use rehearse_core::model::{
    DocumentKind, SessionDocument, SessionKind, SessionResult, SessionSettings, Speaker,
};

/// Fixed duration of the simulated document-generation delay.
pub const SUMMARY_DELAY_MS: u64 = 2000;

/// Renders a markdown report for a completed session.
#[must_use]
pub fn synthesize_summary(
    kind: SessionKind,
    document: &SessionDocument,
    settings: &SessionSettings,
    result: &SessionResult,
) -> String {
    let title = match kind {
        SessionKind::Interview => "Interview Session Report",
        SessionKind::Practice => "Practice Session Report",
    };
    let source = match document.kind() {
        DocumentKind::Link => format!("Link: {}", document.content()),
        DocumentKind::Text => document.preview(100),
    };
    let configuration = match settings {
        SessionSettings::Interview(s) => format!(
            "{} minutes, {:?} style, {:?} mode",
            s.duration_secs() / 60,
            s.style(),
            s.mode()
        ),
        SessionSettings::Practice(s) => format!(
            "{} question(s), {:?} difficulty",
            s.question_count(),
            s.difficulty()
        ),
    };

    let mut out = String::new();
    out.push_str(&format!("# {title}\n\n"));
    out.push_str(&format!("**Average score:** {}\n\n", result.average_score()));
    out.push_str(&format!("**Setup:** {configuration}\n\n"));
    out.push_str(&format!("**Source material:** {source}\n\n"));
    out.push_str("## Scored answers\n\n");
    for turn in result.turns() {
        if let Some(score) = turn.score() {
            out.push_str(&format!("- ({score}) {}\n", turn.text()));
        }
    }
    let answered = result
        .turns()
        .iter()
        .filter(|turn| turn.speaker() == Speaker::User)
        .count();
    out.push_str(&format!("\n{answered} answer(s) given in total.\n"));
    out
}
