//! Line-based console front end.
//!
//! Every published snapshot redraws the screen. Lines typed by the user are
//! turned into practice commands by [`input::parse_line`].

pub mod input;
pub mod render;
pub mod speech;

pub use input::{parse_line, ConsoleAction};
pub use speech::{ConsoleSynthesizer, NoSynthesizer};

use crate::infrastructure::{CliError, PracticeRuntime, PracticeSnapshot, Result};
use konnekt_practice_core::{ActivityContent, SpeechSynthesizer};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub struct ConsoleApp<W: Write> {
    runtime: PracticeRuntime,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    out: W,
}

impl<W: Write> ConsoleApp<W> {
    pub fn new(runtime: PracticeRuntime, synthesizer: Arc<dyn SpeechSynthesizer>, out: W) -> Self {
        Self {
            runtime,
            synthesizer,
            out,
        }
    }

    /// Run until `:quit`, end of input or Ctrl-C. Returns the writer.
    pub async fn run<R>(mut self, input: R) -> Result<W>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut state_rx = self.runtime.subscribe();

        let snapshot = state_rx.borrow_and_update().clone();
        self.draw(&snapshot)?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("Console input closed");
                        break;
                    };
                    if !self.handle_line(&line).await? {
                        break;
                    }
                }
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        return Err(CliError::RuntimeStopped);
                    }
                    let snapshot = state_rx.borrow_and_update().clone();
                    self.show_notices()?;
                    self.draw(&snapshot)?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }

        let ConsoleApp { runtime, out, .. } = self;
        runtime.shutdown().await;
        Ok(out)
    }

    /// Handle one typed line. Returns `false` when the user quits.
    pub async fn handle_line(&mut self, line: &str) -> Result<bool> {
        let snapshot = self.runtime.snapshot();

        match parse_line(line, &snapshot) {
            ConsoleAction::Quit => return Ok(false),
            ConsoleAction::Help => writeln!(self.out, "{}", render::help())?,
            ConsoleAction::Redraw => self.draw(&snapshot)?,
            ConsoleAction::Hint(hint) => writeln!(self.out, "{}", hint)?,
            ConsoleAction::Play => self.play(&snapshot)?,
            ConsoleAction::Send(commands) => {
                for command in commands {
                    tracing::debug!(command = command.name(), "Console command");
                    self.runtime
                        .submit_command(command)
                        .await
                        .map_err(|_| CliError::RuntimeStopped)?;
                }
            }
        }

        Ok(true)
    }

    fn play(&mut self, snapshot: &PracticeSnapshot) -> Result<()> {
        let sentence = snapshot
            .state
            .as_ref()
            .and_then(|s| s.content())
            .and_then(|c| match c {
                ActivityContent::Listening(listening) => Some(listening.sentence.clone()),
                _ => None,
            });

        match sentence {
            Some(sentence) => {
                if let Err(e) = self.synthesizer.speak(&sentence) {
                    writeln!(self.out, "⚠️ {}", e)?;
                }
            }
            None => writeln!(self.out, "Nothing to play right now.")?,
        }
        Ok(())
    }

    fn show_notices(&mut self) -> Result<()> {
        for event in self.runtime.drain_events() {
            if let Some(notice) = render::event_notice(&event) {
                writeln!(self.out, "{}", notice)?;
            }
        }
        Ok(())
    }

    fn draw(&mut self, snapshot: &PracticeSnapshot) -> Result<()> {
        writeln!(self.out, "{}", render::render(snapshot))?;
        self.out.flush()?;
        Ok(())
    }
}
