use rehearse_core::model::{ArchiveRecord, RecordId, SessionKind, SessionSettings};

use super::time_fmt::{format_clock, format_datetime};

/// Display shape for one archive list entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveCardVm {
    pub id: RecordId,
    pub score: u8,
    pub score_class: &'static str,
    pub date_label: String,
    pub kind_label: &'static str,
    pub settings_label: String,
    pub document_preview: String,
}

/// CSS modifier for a score badge, banded the way the completion screen
/// grades results.
#[must_use]
pub fn score_class(score: u8) -> &'static str {
    match score {
        90..=100 => "score--great",
        80..=89 => "score--good",
        70..=79 => "score--fair",
        _ => "score--poor",
    }
}

/// One-line verdict for a score band.
#[must_use]
pub fn score_comment(score: u8) -> &'static str {
    match score {
        90..=100 => "Outstanding!",
        80..=89 => "Well done!",
        70..=79 => "Not bad!",
        _ => "Keep practicing!",
    }
}

fn settings_label(settings: &SessionSettings) -> String {
    match settings {
        SessionSettings::Interview(s) => {
            let style = match s.style() {
                rehearse_core::model::SpeakingStyle::Friend => "Friendly",
                rehearse_core::model::SpeakingStyle::Interviewer => "Interviewer",
            };
            let mode = match s.mode() {
                rehearse_core::model::AnswerMode::Voice => "Voice",
                rehearse_core::model::AnswerMode::Chat => "Chat",
            };
            format!("{} · {style} · {mode}", format_clock(s.duration_secs()))
        }
        SessionSettings::Practice(s) => {
            let difficulty = match s.difficulty() {
                rehearse_core::model::Difficulty::Easy => "Easy",
                rehearse_core::model::Difficulty::Medium => "Medium",
                rehearse_core::model::Difficulty::Hard => "Hard",
            };
            format!("{} question(s) · {difficulty}", s.question_count())
        }
    }
}

#[must_use]
pub fn map_archive_cards(records: &[ArchiveRecord]) -> Vec<ArchiveCardVm> {
    records
        .iter()
        .map(|record| {
            let score = record.result().average_score().value();
            ArchiveCardVm {
                id: record.id(),
                score,
                score_class: score_class(score),
                date_label: format_datetime(record.created_at()),
                kind_label: match record.kind() {
                    SessionKind::Interview => "Interview",
                    SessionKind::Practice => "Practice",
                },
                settings_label: settings_label(record.settings()),
                document_preview: record.source_document().preview(100),
            }
        })
        .collect()
}
