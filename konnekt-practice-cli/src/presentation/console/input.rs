//! Maps one console line to what the console should do with it.

use crate::infrastructure::PracticeSnapshot;
use konnekt_practice_core::{
    ActivityContent, ActivityKind, ActivityState, PracticeCommand, RecordingStatus,
};

/// Reason sent when a recording ends with nothing typed
pub const NO_SPEECH: &str = "no-speech";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    /// Commands for the practice runtime, in order
    Send(Vec<PracticeCommand>),
    /// Speak the listening sentence
    Play,
    Help,
    Redraw,
    Quit,
    /// Nothing to send, tell the user why
    Hint(&'static str),
}

impl ConsoleAction {
    fn send(command: PracticeCommand) -> Self {
        ConsoleAction::Send(vec![command])
    }
}

pub fn parse_line(line: &str, snapshot: &PracticeSnapshot) -> ConsoleAction {
    let line = line.trim();

    if let Some(command) = line.strip_prefix(':') {
        return parse_command(command);
    }

    match &snapshot.state {
        None => parse_menu_choice(line),
        Some(state) => parse_answer(line, state),
    }
}

fn parse_command(command: &str) -> ConsoleAction {
    match command.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => ConsoleAction::Quit,
        "h" | "help" => ConsoleAction::Help,
        "m" | "menu" => ConsoleAction::send(PracticeCommand::ReturnToMenu),
        "n" | "next" => ConsoleAction::send(PracticeCommand::RequestNext),
        "p" | "play" => ConsoleAction::Play,
        "r" | "record" => ConsoleAction::send(PracticeCommand::StartRecording),
        "stop" => ConsoleAction::send(PracticeCommand::StopRecording),
        "s" | "submit" => ConsoleAction::send(PracticeCommand::SubmitAnswer),
        _ => ConsoleAction::Hint("Unknown command, type :help for the list."),
    }
}

fn parse_menu_choice(line: &str) -> ConsoleAction {
    if line.is_empty() {
        return ConsoleAction::Redraw;
    }

    let by_number = line
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| ActivityKind::PRACTICE.get(i).copied());

    match by_number.or_else(|| line.parse::<ActivityKind>().ok()) {
        Some(kind) if kind.is_practice() => {
            ConsoleAction::send(PracticeCommand::SelectActivity { kind })
        }
        _ => ConsoleAction::Hint("Pick an activity by number or name."),
    }
}

fn parse_answer(line: &str, state: &ActivityState) -> ConsoleAction {
    match state {
        ActivityState::Ready {
            content, recording, ..
        } => match content {
            ActivityContent::Listening(_) | ActivityContent::Grammar(_) => {
                parse_option(line, content)
            }
            ActivityContent::Speaking { .. } => match recording {
                RecordingStatus::Listening if line.is_empty() => {
                    ConsoleAction::send(PracticeCommand::RecognitionFailed {
                        reason: NO_SPEECH.to_string(),
                    })
                }
                RecordingStatus::Listening => {
                    ConsoleAction::send(PracticeCommand::TranscriptCaptured {
                        transcript: line.to_string(),
                    })
                }
                RecordingStatus::Idle if line.is_empty() => ConsoleAction::Redraw,
                RecordingStatus::Idle => {
                    ConsoleAction::Hint("Type :record first, then say your answer.")
                }
            },
            ActivityContent::Writing { .. } | ActivityContent::Vocabulary(_) => {
                // Blank input still goes through so the activity can reject it
                ConsoleAction::Send(vec![
                    PracticeCommand::UpdateInput {
                        text: line.to_string(),
                    },
                    PracticeCommand::SubmitAnswer,
                ])
            }
        },
        _ if line.is_empty() => ConsoleAction::Redraw,
        ActivityState::Loading | ActivityState::Evaluating { .. } => {
            ConsoleAction::Hint("Please wait a moment...")
        }
        ActivityState::Answered { .. } | ActivityState::Evaluated { .. } => {
            ConsoleAction::Hint("Type :next for another question or :menu to go back.")
        }
        ActivityState::Error(_) => ConsoleAction::Hint("Type :menu to go back."),
    }
}

fn parse_option(line: &str, content: &ActivityContent) -> ConsoleAction {
    let Some(options) = content.options() else {
        return ConsoleAction::Redraw;
    };
    if line.is_empty() {
        return ConsoleAction::Redraw;
    }

    // Option text wins over its position, options may themselves be numbers
    let by_text = options.iter().find(|o| o.eq_ignore_ascii_case(line));
    let by_number = || {
        line.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
    };

    match by_text.or_else(by_number) {
        Some(option) => ConsoleAction::send(PracticeCommand::ChooseOption {
            option: option.clone(),
        }),
        None => ConsoleAction::Hint("Answer with an option number."),
    }
}
