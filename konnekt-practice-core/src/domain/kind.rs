use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Menu,
    Listening,
    Speaking,
    Writing,
    Vocabulary,
    Grammar,
}

/// How an activity is answered and scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStyle {
    /// Pick one of the offered options, scored locally
    Choice,
    /// Free text, scored by the gateway
    FreeText,
}

impl ActivityKind {
    /// Practice activities in menu order
    pub const PRACTICE: [ActivityKind; 5] = [
        ActivityKind::Listening,
        ActivityKind::Speaking,
        ActivityKind::Writing,
        ActivityKind::Vocabulary,
        ActivityKind::Grammar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Menu => "Menu",
            ActivityKind::Listening => "Listening",
            ActivityKind::Speaking => "Speaking",
            ActivityKind::Writing => "Writing",
            ActivityKind::Vocabulary => "Vocabulary",
            ActivityKind::Grammar => "Grammar",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityKind::Menu => "🏠",
            ActivityKind::Listening => "🎧",
            ActivityKind::Speaking => "🎙️",
            ActivityKind::Writing => "✍️",
            ActivityKind::Vocabulary => "📖",
            ActivityKind::Grammar => "📝",
        }
    }

    /// Answer style, `None` for the menu
    pub fn answer_style(&self) -> Option<AnswerStyle> {
        match self {
            ActivityKind::Menu => None,
            ActivityKind::Listening | ActivityKind::Grammar => Some(AnswerStyle::Choice),
            ActivityKind::Speaking | ActivityKind::Writing | ActivityKind::Vocabulary => {
                Some(AnswerStyle::FreeText)
            }
        }
    }

    pub fn is_practice(&self) -> bool {
        !matches!(self, ActivityKind::Menu)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown activity: {0}")]
pub struct UnknownActivity(pub String);

impl FromStr for ActivityKind {
    type Err = UnknownActivity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "menu" => Ok(ActivityKind::Menu),
            "listening" | "listen" => Ok(ActivityKind::Listening),
            "speaking" | "speak" => Ok(ActivityKind::Speaking),
            "writing" | "write" => Ok(ActivityKind::Writing),
            "vocabulary" | "vocab" => Ok(ActivityKind::Vocabulary),
            "grammar" => Ok(ActivityKind::Grammar),
            other => Err(UnknownActivity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_styles() {
        assert_eq!(ActivityKind::Listening.answer_style(), Some(AnswerStyle::Choice));
        assert_eq!(ActivityKind::Grammar.answer_style(), Some(AnswerStyle::Choice));
        assert_eq!(ActivityKind::Writing.answer_style(), Some(AnswerStyle::FreeText));
        assert_eq!(ActivityKind::Speaking.answer_style(), Some(AnswerStyle::FreeText));
        assert_eq!(ActivityKind::Vocabulary.answer_style(), Some(AnswerStyle::FreeText));
        assert_eq!(ActivityKind::Menu.answer_style(), None);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Grammar".parse::<ActivityKind>(), Ok(ActivityKind::Grammar));
        assert_eq!(" vocab ".parse::<ActivityKind>(), Ok(ActivityKind::Vocabulary));
        assert!("cooking".parse::<ActivityKind>().is_err());
    }

    #[test]
    fn test_practice_excludes_menu() {
        assert!(!ActivityKind::PRACTICE.contains(&ActivityKind::Menu));
        assert!(ActivityKind::PRACTICE.iter().all(|k| k.is_practice()));
    }
}
