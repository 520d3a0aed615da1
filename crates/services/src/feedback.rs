//! Simulated scoring and feedback.
//!
//! Everything "AI" in the app funnels through [`FeedbackGenerator`] so the
//! engines stay deterministic under test: production wires in
//! [`RandomFeedback`], tests wire in [`FixedFeedback`].

use rand::Rng;

use rehearse_core::model::{Score, SpeakingStyle};

/// Lowest score the simulated reviewer hands out.
pub const MIN_GENERATED_SCORE: u8 = 80;
/// Highest score the simulated reviewer hands out.
pub const MAX_GENERATED_SCORE: u8 = 100;

/// Capability for producing scores, feedback text, and follow-up picks.
pub trait FeedbackGenerator: Send + Sync {
    /// Scores an answer. Implementations stay within
    /// [`MIN_GENERATED_SCORE`]..=[`MAX_GENERATED_SCORE`].
    fn score(&self, answer: &str) -> Score;

    /// Feedback line for an interview answer, phrased for the style.
    fn interview_feedback(&self, score: Score, style: SpeakingStyle) -> String;

    /// Feedback line for a practice answer.
    fn practice_feedback(&self, score: Score) -> String;

    /// Index of the follow-up question to ask next, in `0..pool_len`.
    fn pick_follow_up(&self, pool_len: usize) -> usize;
}

const INTERVIEWER_HIGH: &[&str] = &[
    "Excellent answer ({score} points). Your technical understanding and hands-on experience come through clearly.",
    "Very good ({score} points). You explained the reasoning with concrete examples.",
    "A thorough answer ({score} points). You demonstrated real depth on this topic.",
];

const INTERVIEWER_MID: &[&str] = &[
    "A good answer ({score} points). A more concrete example would strengthen it.",
    "Well answered ({score} points). Tying it back to production experience would make it complete.",
    "A reasonable answer ({score} points). Consider adding a little more technical detail.",
];

const FRIEND_HIGH: &[&str] = &[
    "That was great ({score} points)! I actually understood all of it, and I'm not even a developer.",
    "Nice one ({score} points)! The example you gave made it really click for me.",
    "Wow, {score} points! You clearly know this inside out.",
];

const FRIEND_MID: &[&str] = &[
    "Pretty good ({score} points)! Maybe throw in an example next time so it's easier to picture.",
    "I mostly followed that ({score} points). A real story from one of your projects would help!",
    "Not bad ({score} points)! A bit more detail and you'd have me convinced.",
];

const PRACTICE_POSITIVE: &[&str] = &[
    "You used concrete examples, which made the answer easy to follow.",
    "You identified the core concept accurately.",
    "Your practical experience shows in this answer.",
];

const PRACTICE_IMPROVEMENT: &[&str] = &[
    "Adding a more concrete example would make this stronger.",
    "A little more technical detail would round it out.",
    "Connecting it to a real project you worked on would make it more convincing.",
];

fn render(template: &str, score: Score) -> String {
    template.replace("{score}", &score.to_string())
}

/// Production generator: pseudo-random scores in [80, 100] and template
/// pools split at 90, mirroring how generous a mock reviewer should be.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFeedback;

impl RandomFeedback {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FeedbackGenerator for RandomFeedback {
    fn score(&self, _answer: &str) -> Score {
        let value = rand::rng().random_range(MIN_GENERATED_SCORE..=MAX_GENERATED_SCORE);
        Score::new(value).unwrap_or_else(|_| Score::average(&[]))
    }

    fn interview_feedback(&self, score: Score, style: SpeakingStyle) -> String {
        let pool = match (style, score.value() >= 90) {
            (SpeakingStyle::Interviewer, true) => INTERVIEWER_HIGH,
            (SpeakingStyle::Interviewer, false) => INTERVIEWER_MID,
            (SpeakingStyle::Friend, true) => FRIEND_HIGH,
            (SpeakingStyle::Friend, false) => FRIEND_MID,
        };
        let pick = rand::rng().random_range(0..pool.len());
        render(pool[pick], score)
    }

    fn practice_feedback(&self, score: Score) -> String {
        let mut rng = rand::rng();
        let positive = PRACTICE_POSITIVE[rng.random_range(0..PRACTICE_POSITIVE.len())];
        let improvement = PRACTICE_IMPROVEMENT[rng.random_range(0..PRACTICE_IMPROVEMENT.len())];
        format!("Score: {score}. What went well: {positive} To improve: {improvement}")
    }

    fn pick_follow_up(&self, pool_len: usize) -> usize {
        rand::rng().random_range(0..pool_len)
    }
}

/// Deterministic generator for tests: a fixed score, the first template of
/// each pool, and a fixed follow-up index.
#[derive(Debug, Clone, Copy)]
pub struct FixedFeedback {
    score: Score,
    follow_up_index: usize,
}

impl FixedFeedback {
    /// # Panics
    ///
    /// Panics if `score` is above 100. Test helper only.
    #[must_use]
    pub fn new(score: u8) -> Self {
        Self {
            score: Score::new(score).expect("fixed score in range"),
            follow_up_index: 0,
        }
    }

    #[must_use]
    pub fn with_follow_up_index(mut self, index: usize) -> Self {
        self.follow_up_index = index;
        self
    }
}

impl FeedbackGenerator for FixedFeedback {
    fn score(&self, _answer: &str) -> Score {
        self.score
    }

    fn interview_feedback(&self, score: Score, style: SpeakingStyle) -> String {
        let pool = match (style, score.value() >= 90) {
            (SpeakingStyle::Interviewer, true) => INTERVIEWER_HIGH,
            (SpeakingStyle::Interviewer, false) => INTERVIEWER_MID,
            (SpeakingStyle::Friend, true) => FRIEND_HIGH,
            (SpeakingStyle::Friend, false) => FRIEND_MID,
        };
        render(pool[0], score)
    }

    fn practice_feedback(&self, score: Score) -> String {
        format!(
            "Score: {score}. What went well: {} To improve: {}",
            PRACTICE_POSITIVE[0], PRACTICE_IMPROVEMENT[0]
        )
    }

    fn pick_follow_up(&self, pool_len: usize) -> usize {
        self.follow_up_index.min(pool_len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_scores_stay_in_range() {
        let generator = RandomFeedback::new();
        for _ in 0..100 {
            let score = generator.score("any answer").value();
            assert!((MIN_GENERATED_SCORE..=MAX_GENERATED_SCORE).contains(&score));
        }
    }

    #[test]
    fn random_follow_up_pick_is_in_bounds() {
        let generator = RandomFeedback::new();
        for _ in 0..100 {
            assert!(generator.pick_follow_up(5) < 5);
        }
    }

    #[test]
    fn feedback_interpolates_the_score() {
        let generator = FixedFeedback::new(95);
        let text = generator.interview_feedback(
            Score::new(95).unwrap(),
            SpeakingStyle::Interviewer,
        );
        assert!(text.contains("95"));
    }

    #[test]
    fn feedback_pool_splits_at_ninety() {
        let generator = FixedFeedback::new(85);
        let mid = generator.interview_feedback(Score::new(89).unwrap(), SpeakingStyle::Friend);
        let high = generator.interview_feedback(Score::new(90).unwrap(), SpeakingStyle::Friend);
        assert_ne!(mid, high);
    }
}
