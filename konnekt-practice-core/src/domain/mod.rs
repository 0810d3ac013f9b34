pub mod content;
pub mod feedback;
pub mod kind;
pub mod machine;
pub mod navigation;
pub mod score;
pub mod speech;

pub use content::{
    ActivityContent, ContentError, GrammarContent, ListeningContent, VocabularyContent,
    BLANK_MARKER, OPTION_COUNT,
};
pub use feedback::{
    AnswerOutcome, Correction, FeedbackResult, SpeakingFeedback, WritingFeedback,
    CORRECT_MESSAGE, NO_MISTAKES_MESSAGE, POINT_MESSAGE,
};
pub use kind::{ActivityKind, AnswerStyle, UnknownActivity};
pub use machine::{
    ActivityFailure, ActivityInstanceId, ActivityMachine, ActivityState, ContentRequest,
    FailureKind, GatewayFailure, RequestKind, RequestTicket, Resolution, StateName,
    SubmitOutcome, TransitionError,
};
pub use navigation::Navigator;
pub use score::{Score, ScoreHandle};
pub use speech::{RecordingStatus, SpeechCapabilities, SpeechError, SpeechSynthesizer};
