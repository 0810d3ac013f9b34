use konnekt_practice_core::{SpeechError, SpeechSynthesizer};
use std::io::Write;
use std::sync::Mutex;

/// "Speaks" by printing the sentence to a writer
pub struct ConsoleSynthesizer<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleSynthesizer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleSynthesizer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> SpeechSynthesizer for ConsoleSynthesizer<W> {
    fn speak(&self, sentence: &str) -> Result<(), SpeechError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| SpeechError::Playback("output lock poisoned".to_string()))?;
        writeln!(out, "🔊 \"{}\"", sentence)
            .and_then(|_| out.flush())
            .map_err(|e| SpeechError::Playback(e.to_string()))
    }
}

/// Synthesizer for environments without speech output
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSynthesizer;

impl SpeechSynthesizer for NoSynthesizer {
    fn speak(&self, _sentence: &str) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }
}
