use crate::domain::ActivityKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of options a choice question offers
pub const OPTION_COUNT: usize = 3;

/// Blank marker inside grammar questions
pub const BLANK_MARKER: &str = "___";

/// Errors raised when generated content breaks a structural invariant
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ContentError {
    #[error("Expected {expected} options, found {found}")]
    WrongOptionCount { expected: usize, found: usize },

    #[error("Duplicate option: {0}")]
    DuplicateOption(String),

    #[error("Answer '{0}' is not one of the options")]
    AnswerNotInOptions(String),

    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Question has no blank (___)")]
    MissingBlank,

    #[error("Content for {found} cannot be used in {expected}")]
    KindMismatch {
        expected: ActivityKind,
        found: ActivityKind,
    },
}

/// Listening exercise: a sentence to be spoken aloud and a question about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListeningContent {
    /// A short, clear English sentence.
    pub sentence: String,
    /// A comprehension question about the sentence.
    pub question: String,
    /// An array of 3 possible answers.
    pub options: Vec<String>,
    /// The correct answer from the options.
    pub answer: String,
}

impl ListeningContent {
    pub fn validate(&self) -> Result<(), ContentError> {
        require_text("sentence", &self.sentence)?;
        require_text("question", &self.question)?;
        validate_choices(&self.options, &self.answer)
    }
}

/// Fill-in-the-blank grammar question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrammarContent {
    /// The question with a blank (___).
    pub question: String,
    /// 3 multiple-choice options.
    pub options: Vec<String>,
    /// The correct answer from the options.
    pub answer: String,
    /// A short hint shown after a wrong answer.
    pub hint: String,
}

impl GrammarContent {
    pub fn validate(&self) -> Result<(), ContentError> {
        require_text("question", &self.question)?;
        if !self.has_blank() {
            return Err(ContentError::MissingBlank);
        }
        validate_choices(&self.options, &self.answer)
    }

    pub fn has_blank(&self) -> bool {
        self.question.contains(BLANK_MARKER)
    }
}

/// A new word with meaning, example and synonym
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VocabularyContent {
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub synonym: String,
}

impl VocabularyContent {
    pub fn validate(&self) -> Result<(), ContentError> {
        require_text("word", &self.word)?;
        require_text("meaning", &self.meaning)?;
        require_text("example", &self.example)?;
        require_text("synonym", &self.synonym)
    }
}

/// Content shown by an activity, replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityContent {
    Listening(ListeningContent),
    Grammar(GrammarContent),
    Vocabulary(VocabularyContent),
    Speaking { question: String },
    Writing { topic: String },
}

impl ActivityContent {
    pub fn kind(&self) -> ActivityKind {
        match self {
            ActivityContent::Listening(_) => ActivityKind::Listening,
            ActivityContent::Grammar(_) => ActivityKind::Grammar,
            ActivityContent::Vocabulary(_) => ActivityKind::Vocabulary,
            ActivityContent::Speaking { .. } => ActivityKind::Speaking,
            ActivityContent::Writing { .. } => ActivityKind::Writing,
        }
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        match self {
            ActivityContent::Listening(c) => c.validate(),
            ActivityContent::Grammar(c) => c.validate(),
            ActivityContent::Vocabulary(c) => c.validate(),
            ActivityContent::Speaking { question } => require_text("question", question),
            ActivityContent::Writing { topic } => require_text("topic", topic),
        }
    }

    /// Options of a choice question
    pub fn options(&self) -> Option<&[String]> {
        match self {
            ActivityContent::Listening(c) => Some(&c.options),
            ActivityContent::Grammar(c) => Some(&c.options),
            _ => None,
        }
    }

    /// Correct answer of a choice question
    pub fn answer(&self) -> Option<&str> {
        match self {
            ActivityContent::Listening(c) => Some(&c.answer),
            ActivityContent::Grammar(c) => Some(&c.answer),
            _ => None,
        }
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::EmptyField(field));
    }
    Ok(())
}

fn validate_choices(options: &[String], answer: &str) -> Result<(), ContentError> {
    if options.len() != OPTION_COUNT {
        return Err(ContentError::WrongOptionCount {
            expected: OPTION_COUNT,
            found: options.len(),
        });
    }

    for (i, option) in options.iter().enumerate() {
        if options[..i].contains(option) {
            return Err(ContentError::DuplicateOption(option.clone()));
        }
    }

    if !options.iter().any(|o| o == answer) {
        return Err(ContentError::AnswerNotInOptions(answer.to_string()));
    }

    Ok(())
}
