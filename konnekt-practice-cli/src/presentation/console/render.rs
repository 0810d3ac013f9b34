//! Plain-text rendering of practice snapshots and events.

use crate::infrastructure::PracticeSnapshot;
use konnekt_practice_core::{
    ActivityContent, ActivityKind, ActivityState, FeedbackResult, PracticeEvent, RecordingStatus,
};
use std::fmt::Write;

/// Full screen for a snapshot: score line, then the active activity
pub fn render(snapshot: &PracticeSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", score_line(snapshot));
    let _ = writeln!(out);

    match &snapshot.state {
        None => render_menu(&mut out),
        Some(state) => render_activity(&mut out, snapshot.kind, state),
    }
    out
}

pub fn score_line(snapshot: &PracticeSnapshot) -> String {
    if snapshot.pulse {
        format!("⭐ Score: {}  ✨ +1", snapshot.score)
    } else {
        format!("⭐ Score: {}", snapshot.score)
    }
}

fn render_menu(out: &mut String) {
    let _ = writeln!(out, "Choose an activity");
    for (i, kind) in ActivityKind::PRACTICE.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} {}", i + 1, kind.icon(), kind.label());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Type a number or name, :help for commands");
}

fn render_activity(out: &mut String, kind: ActivityKind, state: &ActivityState) {
    let _ = writeln!(out, "{} {}", kind.label(), kind.icon());

    match state {
        ActivityState::Loading => {
            let _ = writeln!(out, "⏳ Loading...");
        }
        ActivityState::Error(failure) => {
            let _ = writeln!(out, "❌ {}", failure.message);
            let _ = writeln!(out, "Type :menu to go back");
        }
        ActivityState::Ready {
            content,
            input,
            recording,
            notice,
        } => {
            render_content(out, content);
            if let Some(options) = content.options() {
                render_options(out, options, None);
                let _ = writeln!(out, "Answer with an option number");
            } else if kind == ActivityKind::Speaking {
                render_recording(out, input, *recording, notice.as_deref());
            } else {
                let _ = writeln!(out, "Type your answer and press Enter");
            }
        }
        ActivityState::Answered { content, outcome } => {
            render_content(out, content);
            if let Some(options) = content.options() {
                render_options(out, options, Some((&outcome.selected, content.answer())));
            }
            let _ = writeln!(out, "{}", outcome.message);
            let _ = writeln!(out, "Type :next for another question");
        }
        ActivityState::Evaluating { content, input } => {
            render_content(out, content);
            let _ = writeln!(out, "You: {}", input);
            let _ = writeln!(out, "⏳ Getting feedback...");
        }
        ActivityState::Evaluated {
            content,
            input,
            feedback,
            ..
        } => {
            render_content(out, content);
            let _ = writeln!(out, "You: {}", input);
            let _ = writeln!(out);
            render_feedback(out, feedback);
            let _ = writeln!(out, "Type :next for another question");
        }
    }
}

fn render_content(out: &mut String, content: &ActivityContent) {
    match content {
        ActivityContent::Listening(c) => {
            let _ = writeln!(out, "Type :play to hear the sentence, then answer.");
            let _ = writeln!(out, "{}", c.question);
        }
        ActivityContent::Grammar(c) => {
            let _ = writeln!(out, "{}", c.question);
        }
        ActivityContent::Vocabulary(c) => {
            let _ = writeln!(out, "Word: {}", c.word);
            let _ = writeln!(out, "Meaning: {}", c.meaning);
            let _ = writeln!(out, "Example: {}", c.example);
            let _ = writeln!(out, "Synonym: {}", c.synonym);
            let _ = writeln!(out, "Write your own sentence using \"{}\".", c.word);
        }
        ActivityContent::Speaking { question } => {
            let _ = writeln!(out, "{}", question);
        }
        ActivityContent::Writing { topic } => {
            let _ = writeln!(out, "{}", topic);
        }
    }
}

/// `resolved` is the selected option and the correct answer
fn render_options(out: &mut String, options: &[String], resolved: Option<(&String, Option<&str>)>) {
    for (i, option) in options.iter().enumerate() {
        let mark = match resolved {
            Some((_, Some(answer))) if option == answer => " ✔",
            Some((selected, _)) if option == selected => " ✘",
            _ => "",
        };
        let _ = writeln!(out, "  {}. {}{}", i + 1, option, mark);
    }
}

fn render_recording(out: &mut String, input: &str, recording: RecordingStatus, notice: Option<&str>) {
    match recording {
        RecordingStatus::Listening => {
            let _ = writeln!(out, "🎙️ Listening... type what you say, Enter when done");
        }
        RecordingStatus::Idle if input.is_empty() => {
            let _ = writeln!(out, "Type :record to answer out loud");
        }
        RecordingStatus::Idle => {
            let _ = writeln!(out, "You said: {}", input);
            let _ = writeln!(out, "Type :submit for feedback or :record to try again");
        }
    }
    if let Some(notice) = notice {
        let _ = writeln!(out, "⚠️ {}", notice);
    }
}

fn render_feedback(out: &mut String, feedback: &FeedbackResult) {
    match feedback {
        FeedbackResult::Writing(f) => {
            let _ = writeln!(out, "{}", f.praise);
            for correction in &f.corrections {
                let _ = writeln!(
                    out,
                    "  • \"{}\" → \"{}\": {}",
                    correction.original, correction.corrected, correction.explanation
                );
            }
        }
        FeedbackResult::Speaking(f) => {
            let _ = writeln!(out, "{}", f.praise);
            if !f.is_flawless() {
                let _ = writeln!(out, "Correction: {}", f.correction);
                let _ = writeln!(out, "Why: {}", f.explanation);
            }
        }
        FeedbackResult::Vocabulary { critique } => {
            let _ = writeln!(out, "{}", critique);
        }
    }
    if let Some(summary) = feedback.summary() {
        let _ = writeln!(out, "{}", summary);
    }
}

/// One-line notice for events the snapshot alone does not show
pub fn event_notice(event: &PracticeEvent) -> Option<String> {
    match event {
        PracticeEvent::InputRejected { .. } => Some("Please type an answer first.".to_string()),
        PracticeEvent::CommandFailed { reason, .. } => Some(format!("⚠️ {}", reason)),
        _ => None,
    }
}

pub fn help() -> &'static str {
    "Commands:\n\
     \x20 :menu     back to the menu\n\
     \x20 :next     next question\n\
     \x20 :play     hear the listening sentence\n\
     \x20 :record   answer a speaking question\n\
     \x20 :submit   send your spoken answer\n\
     \x20 :quit     leave\n\
     Anything else is your answer."
}
