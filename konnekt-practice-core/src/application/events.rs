use crate::domain::{
    ActivityContent, ActivityFailure, ActivityInstanceId, ActivityKind, AnswerOutcome,
    ContentRequest, FeedbackResult, RecordingStatus, RequestTicket,
};

/// Events emitted by the session after handling a command
#[derive(Debug, Clone, PartialEq)]
pub enum PracticeEvent {
    /// Active screen changed
    Navigated { kind: ActivityKind },

    /// An activity needs the gateway; the caller must dispatch it
    RequestIssued { request: ContentRequest },

    /// Fresh content is shown
    ContentReady {
        instance: ActivityInstanceId,
        content: ActivityContent,
    },

    /// Choice question resolved locally
    AnswerResolved {
        instance: ActivityInstanceId,
        outcome: AnswerOutcome,
    },

    InputUpdated { instance: ActivityInstanceId },

    /// Blank free text, nothing submitted
    InputRejected { instance: ActivityInstanceId },

    EvaluationReady {
        instance: ActivityInstanceId,
        feedback: FeedbackResult,
        awarded: bool,
    },

    ScoreChanged { total: u32 },

    /// Activity entered its error state
    ActivityFailed {
        instance: ActivityInstanceId,
        failure: ActivityFailure,
    },

    RecordingChanged {
        instance: ActivityInstanceId,
        status: RecordingStatus,
    },

    TranscriptCaptured {
        instance: ActivityInstanceId,
        transcript: String,
    },

    /// Inline speech recognition error
    RecognitionNotice {
        instance: ActivityInstanceId,
        message: String,
    },

    /// Gateway result arrived for a request nobody waits for anymore
    StaleResultDiscarded { ticket: RequestTicket },

    /// Command failed
    CommandFailed { command: String, reason: String },
}

impl PracticeEvent {
    /// Gateway request carried by this event, if any
    pub fn request(&self) -> Option<&ContentRequest> {
        match self {
            PracticeEvent::RequestIssued { request } => Some(request),
            _ => None,
        }
    }
}
