use crate::domain::{ActivityContent, ActivityKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CORRECT_MESSAGE: &str = "Correct! 🎉 +1 point for you 🎯";
pub const NO_MISTAKES_MESSAGE: &str = "No mistakes found! Great job! 🎉 +1 point for you 🎯";
pub const POINT_MESSAGE: &str = "+1 point for you 🎯";

/// One suggested fix in a piece of writing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Correction {
    pub original: String,
    pub corrected: String,
    pub explanation: String,
}

/// Critique of a writing submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WritingFeedback {
    /// Positive praise for the user's writing effort.
    pub praise: String,
    /// Corrections, empty if there are no mistakes.
    pub corrections: Vec<Correction>,
}

impl WritingFeedback {
    pub fn is_flawless(&self) -> bool {
        self.corrections.is_empty()
    }
}

/// Critique of a spoken answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpeakingFeedback {
    /// Encouraging and positive feedback for the user.
    pub praise: String,
    /// The corrected version of the user's sentence. Empty if no mistakes.
    pub correction: String,
    /// A simple explanation of the correction. Empty if no mistakes.
    pub explanation: String,
}

impl SpeakingFeedback {
    pub fn is_flawless(&self) -> bool {
        self.correction.trim().is_empty()
    }
}

/// Result of a locally scored choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub selected: String,
    pub correct: bool,
    pub message: String,
}

impl AnswerOutcome {
    /// Score a selected option against choice content
    pub fn grade(content: &ActivityContent, selected: &str) -> Option<Self> {
        let (answer, miss_message) = match content {
            ActivityContent::Listening(c) => (
                c.answer.as_str(),
                format!("Not quite! The correct answer was \"{}\". 💡", c.answer),
            ),
            ActivityContent::Grammar(c) => {
                (c.answer.as_str(), format!("Not quite. 💡 Hint: {}", c.hint))
            }
            _ => return None,
        };

        let correct = selected == answer;
        Some(Self {
            selected: selected.to_string(),
            correct,
            message: if correct {
                CORRECT_MESSAGE.to_string()
            } else {
                miss_message
            },
        })
    }
}

/// Gateway-authored critique of a free-text answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackResult {
    Writing(WritingFeedback),
    Speaking(SpeakingFeedback),
    Vocabulary { critique: String },
}

impl FeedbackResult {
    pub fn kind(&self) -> ActivityKind {
        match self {
            FeedbackResult::Writing(_) => ActivityKind::Writing,
            FeedbackResult::Speaking(_) => ActivityKind::Speaking,
            FeedbackResult::Vocabulary { .. } => ActivityKind::Vocabulary,
        }
    }

    /// Whether this evaluation awards a point.
    ///
    /// Vocabulary rewards every completed attempt.
    pub fn earns_point(&self) -> bool {
        match self {
            FeedbackResult::Writing(f) => f.is_flawless(),
            FeedbackResult::Speaking(f) => f.is_flawless(),
            FeedbackResult::Vocabulary { .. } => true,
        }
    }

    /// Closing line shown under the critique
    pub fn summary(&self) -> Option<&'static str> {
        match self {
            FeedbackResult::Writing(f) if f.is_flawless() => Some(NO_MISTAKES_MESSAGE),
            FeedbackResult::Speaking(f) if f.is_flawless() => Some(POINT_MESSAGE),
            FeedbackResult::Vocabulary { .. } => Some(POINT_MESSAGE),
            _ => None,
        }
    }
}
