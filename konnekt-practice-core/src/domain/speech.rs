use crate::domain::ActivityKind;
use serde::{Deserialize, Serialize};

/// Speech features provided by the host environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechCapabilities {
    /// Text-to-speech playback
    pub synthesis: bool,
    /// Speech-to-text capture
    pub recognition: bool,
}

impl SpeechCapabilities {
    pub fn all() -> Self {
        Self {
            synthesis: true,
            recognition: true,
        }
    }

    pub fn none() -> Self {
        Self {
            synthesis: false,
            recognition: false,
        }
    }

    /// Message for the capability `kind` needs but the environment lacks
    pub fn missing_for(&self, kind: ActivityKind) -> Option<&'static str> {
        match kind {
            ActivityKind::Listening if !self.synthesis => {
                Some("Your environment doesn't support speech synthesis.")
            }
            ActivityKind::Speaking if !self.recognition => {
                Some("Your environment doesn't support speech recognition.")
            }
            _ => None,
        }
    }
}

impl Default for SpeechCapabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Microphone state while a speaking question is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordingStatus {
    #[default]
    Idle,
    Listening,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech synthesis is not supported")]
    Unsupported,

    #[error("Speech playback failed: {0}")]
    Playback(String),
}

/// Plays a sentence aloud
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, sentence: &str) -> Result<(), SpeechError>;
}
