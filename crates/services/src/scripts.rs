//! Fixed question banks for both session modes.
//!
//! The content here is static app data, not logic: interview scripts are
//! consumed in order, practice scripts cycle when the requested question
//! count exceeds the bank, and every practice question gets one follow-up
//! drawn from the shared pool.

use rehearse_core::model::{Difficulty, SpeakingStyle};

const FRIEND_QUESTIONS: &[&str] = &[
    "Hey! What's the most fun project you've built while learning to code?",
    "Why did you pick that tech for it? There must have been other options!",
    "What's the nastiest bug you've run into, and how did you squash it?",
    "When you work on team projects, what role do you usually end up taking?",
    "So what kind of developer do you want to become?",
];

const INTERVIEWER_QUESTIONS: &[&str] = &[
    "Please walk me through your most significant project experience.",
    "Why did you choose the technology stack you used?",
    "How did you resolve technical problems that came up during development?",
    "Describe your role and contribution when working in a team.",
    "Tell me about your career goals and how you plan to grow.",
];

const EASY_QUESTIONS: &[&str] = &[
    "Explain the difference between HTML and CSS.",
    "Compare the different ways of declaring variables in JavaScript.",
    "Explain the basic ideas behind functional programming.",
    "What is a REST API?",
    "Explain the basic Git commands and what they do.",
];

const MEDIUM_QUESTIONS: &[&str] = &[
    "What is React's virtual DOM, and why is it used?",
    "Explain the difference between promises and async/await.",
    "Explain database normalization.",
    "What techniques can you use to optimize web performance?",
    "Explain the MVC pattern.",
];

const HARD_QUESTIONS: &[&str] = &[
    "Discuss the trade-offs of a microservice architecture.",
    "Explain the ACID properties of database transactions.",
    "Compare common load-balancing strategies.",
    "Explain caching strategies and how you would implement them.",
    "How would you design a system to process very large volumes of data?",
];

/// Supplementary questions asked once after every primary practice question.
pub const FOLLOW_UP_QUESTIONS: &[&str] = &[
    "How have you applied that in a real project?",
    "What do you think the drawbacks of that approach are?",
    "What advantages does it have compared to the alternatives?",
    "What was hard about implementing it in practice?",
    "What performance considerations does it raise?",
];

/// Stand-in transcript used when a voice recording ends. A real
/// speech-to-text integration would replace this text.
pub const VOICE_TRANSCRIPT_PLACEHOLDER: &str =
    "(voice answer) The transcribed answer would appear here once speech recognition is wired up.";

/// The ordered interview script for a speaking style.
#[must_use]
pub fn interview_questions(style: SpeakingStyle) -> &'static [&'static str] {
    match style {
        SpeakingStyle::Friend => FRIEND_QUESTIONS,
        SpeakingStyle::Interviewer => INTERVIEWER_QUESTIONS,
    }
}

/// The practice question bank for a difficulty tier.
#[must_use]
pub fn practice_questions(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => EASY_QUESTIONS,
        Difficulty::Medium => MEDIUM_QUESTIONS,
        Difficulty::Hard => HARD_QUESTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bank_has_five_entries() {
        for style in [SpeakingStyle::Friend, SpeakingStyle::Interviewer] {
            assert_eq!(interview_questions(style).len(), 5);
        }
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(practice_questions(difficulty).len(), 5);
        }
        assert_eq!(FOLLOW_UP_QUESTIONS.len(), 5);
    }
}
