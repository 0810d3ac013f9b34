use crate::domain::{ActivityContent, ActivityKind, FeedbackResult, GatewayFailure, RequestTicket};

/// Commands that drive a practice session
#[derive(Debug, Clone, PartialEq)]
pub enum PracticeCommand {
    /// Enter an activity (or the menu), discarding the current one
    SelectActivity { kind: ActivityKind },

    ReturnToMenu,

    /// Pick an option in a listening or grammar question
    ChooseOption { option: String },

    /// Replace the free-text draft
    UpdateInput { text: String },

    /// Submit the free-text draft for evaluation
    SubmitAnswer,

    /// Move on after the answer is resolved
    RequestNext,

    StartRecording,

    StopRecording,

    /// Final transcript of a recording session
    TranscriptCaptured { transcript: String },

    /// Speech recognition reported an error mid-session
    RecognitionFailed { reason: String },

    /// Gateway returned content for a fetch request
    ContentLoaded {
        ticket: RequestTicket,
        result: Result<ActivityContent, GatewayFailure>,
    },

    /// Gateway returned an evaluation
    EvaluationCompleted {
        ticket: RequestTicket,
        result: Result<FeedbackResult, GatewayFailure>,
    },
}

impl PracticeCommand {
    /// Short name for logs and failure events
    pub fn name(&self) -> &'static str {
        match self {
            PracticeCommand::SelectActivity { .. } => "SelectActivity",
            PracticeCommand::ReturnToMenu => "ReturnToMenu",
            PracticeCommand::ChooseOption { .. } => "ChooseOption",
            PracticeCommand::UpdateInput { .. } => "UpdateInput",
            PracticeCommand::SubmitAnswer => "SubmitAnswer",
            PracticeCommand::RequestNext => "RequestNext",
            PracticeCommand::StartRecording => "StartRecording",
            PracticeCommand::StopRecording => "StopRecording",
            PracticeCommand::TranscriptCaptured { .. } => "TranscriptCaptured",
            PracticeCommand::RecognitionFailed { .. } => "RecognitionFailed",
            PracticeCommand::ContentLoaded { .. } => "ContentLoaded",
            PracticeCommand::EvaluationCompleted { .. } => "EvaluationCompleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_clone() {
        let cmd = PracticeCommand::SelectActivity {
            kind: ActivityKind::Grammar,
        };

        let cloned = cmd.clone();
        assert_eq!(cmd, cloned);
    }

    #[test]
    fn test_command_name() {
        let cmd = PracticeCommand::UpdateInput {
            text: "Hello".to_string(),
        };
        assert_eq!(cmd.name(), "UpdateInput");
        assert_eq!(PracticeCommand::ReturnToMenu.name(), "ReturnToMenu");
    }
}
