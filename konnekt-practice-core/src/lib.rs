pub mod application;
pub mod domain;

pub use application::runtime::{CommandQueue, PracticeLoop, QueueError};
pub use application::{PracticeCommand, PracticeEvent, PracticeEventLoop};
pub use domain::{
    ActivityContent, ActivityFailure, ActivityInstanceId, ActivityKind, ActivityMachine,
    ActivityState, AnswerOutcome, AnswerStyle, ContentError, ContentRequest, Correction,
    FailureKind, FeedbackResult, GatewayFailure, GrammarContent, ListeningContent, Navigator,
    RecordingStatus, RequestKind, RequestTicket, Resolution, Score, ScoreHandle, SpeakingFeedback,
    SpeechCapabilities, SpeechError, SpeechSynthesizer, StateName, SubmitOutcome,
    TransitionError, UnknownActivity, VocabularyContent, WritingFeedback,
};
