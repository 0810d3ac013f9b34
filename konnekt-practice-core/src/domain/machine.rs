use crate::domain::{
    ActivityContent, ActivityKind, AnswerOutcome, AnswerStyle, ContentError, FeedbackResult,
    RecordingStatus, ScoreHandle, SpeechCapabilities,
};
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Activity instance ID (fresh for every entry into an activity)
pub type ActivityInstanceId = Uuid;

/// Identifies one outbound gateway request.
///
/// A result is only applied if its ticket matches the single request the
/// owning instance is still waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub instance: ActivityInstanceId,
    pub generation: u64,
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.instance, self.generation)
    }
}

/// What the gateway is asked to produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestKind {
    /// New content for an activity
    FetchContent { kind: ActivityKind },

    EvaluateSpeaking { question: String, answer: String },

    EvaluateWriting { topic: String, text: String },

    EvaluateVocabulary { word: String, sentence: String },
}

/// A gateway request issued by an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub ticket: RequestTicket,
    pub kind: RequestKind,
}

/// Gateway failure as seen by an activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayFailure {
    pub message: String,
}

impl GatewayFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for GatewayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Content fetch or evaluation failed
    Gateway,
    /// Required speech capability is missing
    CapabilityUnavailable,
}

/// Terminal failure of an activity instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Activity lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityState {
    /// Waiting for content
    Loading,

    /// Content shown, waiting for the user
    Ready {
        content: ActivityContent,
        /// Draft free text or captured transcript
        input: String,
        recording: RecordingStatus,
        /// Inline speech recognition error
        notice: Option<String>,
    },

    /// Choice question resolved locally
    Answered {
        content: ActivityContent,
        outcome: AnswerOutcome,
    },

    /// Waiting for the gateway to critique `input`
    Evaluating {
        content: ActivityContent,
        input: String,
    },

    Evaluated {
        content: ActivityContent,
        input: String,
        feedback: FeedbackResult,
        awarded: bool,
    },

    Error(ActivityFailure),
}

/// Discriminant of [`ActivityState`], for errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateName {
    Loading,
    Ready,
    Answered,
    Evaluating,
    Evaluated,
    Error,
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateName::Loading => "loading",
            StateName::Ready => "ready",
            StateName::Answered => "answered",
            StateName::Evaluating => "evaluating",
            StateName::Evaluated => "evaluated",
            StateName::Error => "in error",
        };
        f.write_str(name)
    }
}

impl ActivityState {
    pub fn name(&self) -> StateName {
        match self {
            ActivityState::Loading => StateName::Loading,
            ActivityState::Ready { .. } => StateName::Ready,
            ActivityState::Answered { .. } => StateName::Answered,
            ActivityState::Evaluating { .. } => StateName::Evaluating,
            ActivityState::Evaluated { .. } => StateName::Evaluated,
            ActivityState::Error(_) => StateName::Error,
        }
    }

    pub fn content(&self) -> Option<&ActivityContent> {
        match self {
            ActivityState::Ready { content, .. }
            | ActivityState::Answered { content, .. }
            | ActivityState::Evaluating { content, .. }
            | ActivityState::Evaluated { content, .. } => Some(content),
            ActivityState::Loading | ActivityState::Error(_) => None,
        }
    }

    /// Whether the answer has been resolved and "next" is available
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            ActivityState::Answered { .. } | ActivityState::Evaluated { .. }
        )
    }
}

/// Errors for calls that the current state does not allow
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum TransitionError {
    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: StateName,
    },

    #[error("{0} is not answered by choosing an option")]
    NotChoiceActivity(ActivityKind),

    #[error("{0} is not answered with free text")]
    NotFreeTextActivity(ActivityKind),

    #[error("'{0}' is not one of the options")]
    UnknownOption(String),

    #[error("{0} has no recording")]
    RecordingUnsupported(ActivityKind),

    #[error("The menu is not an activity")]
    MenuIsNotAnActivity,

    #[error("No activity is active")]
    NoActiveActivity,
}

/// Outcome of applying a gateway result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// Ticket no longer matches the pending request, result dropped
    Stale,
}

/// Outcome of a free-text submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Input was blank, nothing happened
    Rejected,
    /// Evaluation requested
    Evaluate(ContentRequest),
}

#[derive(Debug, Clone)]
struct PendingRequest {
    ticket: RequestTicket,
    issued_at: Instant,
}

/// State machine for one practice activity instance
#[derive(Debug, Clone)]
pub struct ActivityMachine {
    id: ActivityInstanceId,
    kind: ActivityKind,
    state: ActivityState,
    generation: u64,
    pending: Option<PendingRequest>,
    score: ScoreHandle,
}

impl ActivityMachine {
    /// Create an instance and enter it.
    ///
    /// Returns the initial content request, or `None` if a required speech
    /// capability is missing and the instance starts in the error state.
    pub fn start(
        kind: ActivityKind,
        score: ScoreHandle,
        capabilities: SpeechCapabilities,
    ) -> Result<(Self, Option<ContentRequest>), TransitionError> {
        if !kind.is_practice() {
            return Err(TransitionError::MenuIsNotAnActivity);
        }

        let mut machine = Self {
            id: Uuid::new_v4(),
            kind,
            state: ActivityState::Loading,
            generation: 0,
            pending: None,
            score,
        };

        if let Some(message) = capabilities.missing_for(kind) {
            tracing::warn!(%kind, "{}", message);
            machine.state = ActivityState::Error(ActivityFailure {
                kind: FailureKind::CapabilityUnavailable,
                message: message.to_string(),
            });
            return Ok((machine, None));
        }

        let request = machine.begin_fetch();
        Ok((machine, Some(request)))
    }

    // ===== Getters =====

    pub fn id(&self) -> ActivityInstanceId {
        self.id
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn state(&self) -> &ActivityState {
        &self.state
    }

    /// Ticket of the outstanding request, if any
    pub fn pending_ticket(&self) -> Option<RequestTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    // ===== Content =====

    fn begin_fetch(&mut self) -> ContentRequest {
        self.state = ActivityState::Loading;
        let ticket = self.issue_ticket();
        tracing::debug!(kind = %self.kind, %ticket, "Fetching content");

        ContentRequest {
            ticket,
            kind: RequestKind::FetchContent { kind: self.kind },
        }
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        self.generation += 1;
        let ticket = RequestTicket {
            instance: self.id,
            generation: self.generation,
        };
        self.pending = Some(PendingRequest {
            ticket,
            issued_at: Instant::now(),
        });
        ticket
    }

    /// Take the pending request if `ticket` is the one being waited for
    fn settle(&mut self, ticket: RequestTicket) -> bool {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {
                tracing::debug!(
                    %ticket,
                    elapsed_ms = pending.issued_at.elapsed().as_millis() as u64,
                    "Request settled"
                );
                self.pending = None;
                true
            }
            _ => {
                tracing::warn!(%ticket, "Discarding stale gateway result");
                false
            }
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = %self.kind, %message, "Activity failed");
        self.state = ActivityState::Error(ActivityFailure {
            kind: FailureKind::Gateway,
            message,
        });
    }

    /// Apply fetched content
    pub fn apply_content(
        &mut self,
        ticket: RequestTicket,
        result: Result<ActivityContent, GatewayFailure>,
    ) -> Resolution {
        if !self.settle(ticket) {
            return Resolution::Stale;
        }

        match result {
            Ok(content) if content.kind() != self.kind => {
                let err = ContentError::KindMismatch {
                    expected: self.kind,
                    found: content.kind(),
                };
                self.fail(err.to_string());
            }
            Ok(content) => match content.validate() {
                Ok(()) => {
                    self.state = ActivityState::Ready {
                        content,
                        input: String::new(),
                        recording: RecordingStatus::Idle,
                        notice: None,
                    };
                }
                Err(e) => self.fail(e.to_string()),
            },
            Err(failure) => self.fail(failure.message),
        }

        Resolution::Applied
    }

    // ===== Answering =====

    /// Pick an option in a choice activity. Scores locally.
    pub fn choose(&mut self, option: &str) -> Result<AnswerOutcome, TransitionError> {
        if self.kind.answer_style() != Some(AnswerStyle::Choice) {
            return Err(TransitionError::NotChoiceActivity(self.kind));
        }

        let content = match &self.state {
            ActivityState::Ready { content, .. } => content,
            other => {
                return Err(TransitionError::InvalidState {
                    action: "choose an option",
                    state: other.name(),
                })
            }
        };

        if !content
            .options()
            .is_some_and(|options| options.iter().any(|o| o == option))
        {
            return Err(TransitionError::UnknownOption(option.to_string()));
        }

        let outcome = AnswerOutcome::grade(content, option)
            .ok_or(TransitionError::NotChoiceActivity(self.kind))?;

        if outcome.correct {
            self.score.increment();
        }
        tracing::debug!(kind = %self.kind, correct = outcome.correct, "Answer resolved");

        self.state = ActivityState::Answered {
            content: content.clone(),
            outcome: outcome.clone(),
        };
        Ok(outcome)
    }

    fn ready_input(&mut self, action: &'static str) -> Result<&mut String, TransitionError> {
        if self.kind.answer_style() != Some(AnswerStyle::FreeText) {
            return Err(TransitionError::NotFreeTextActivity(self.kind));
        }

        match &mut self.state {
            ActivityState::Ready { input, .. } => Ok(input),
            other => Err(TransitionError::InvalidState {
                action,
                state: other.name(),
            }),
        }
    }

    /// Replace the free-text draft
    pub fn update_input(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        *self.ready_input("edit the answer")? = text.into();
        Ok(())
    }

    /// Submit the free-text draft for evaluation
    pub fn submit(&mut self) -> Result<SubmitOutcome, TransitionError> {
        let input = self.ready_input("submit")?;
        if input.trim().is_empty() {
            return Ok(SubmitOutcome::Rejected);
        }
        let input = input.clone();

        let content = match std::mem::replace(&mut self.state, ActivityState::Loading) {
            ActivityState::Ready { content, .. } => content,
            other => {
                self.state = other;
                return Err(TransitionError::InvalidState {
                    action: "submit",
                    state: self.state.name(),
                });
            }
        };

        let kind = match &content {
            ActivityContent::Speaking { question } => RequestKind::EvaluateSpeaking {
                question: question.clone(),
                answer: input.clone(),
            },
            ActivityContent::Writing { topic } => RequestKind::EvaluateWriting {
                topic: topic.clone(),
                text: input.clone(),
            },
            ActivityContent::Vocabulary(c) => RequestKind::EvaluateVocabulary {
                word: c.word.clone(),
                sentence: input.clone(),
            },
            ActivityContent::Listening(_) | ActivityContent::Grammar(_) => {
                self.state = ActivityState::Ready {
                    content,
                    input,
                    recording: RecordingStatus::Idle,
                    notice: None,
                };
                return Err(TransitionError::NotFreeTextActivity(self.kind));
            }
        };

        self.state = ActivityState::Evaluating { content, input };
        let ticket = self.issue_ticket();
        tracing::debug!(kind = %self.kind, %ticket, "Evaluating answer");

        Ok(SubmitOutcome::Evaluate(ContentRequest { ticket, kind }))
    }

    /// Apply an evaluation. Awards the point per the feedback's rule.
    pub fn apply_evaluation(
        &mut self,
        ticket: RequestTicket,
        result: Result<FeedbackResult, GatewayFailure>,
    ) -> Resolution {
        if !self.settle(ticket) {
            return Resolution::Stale;
        }

        let (content, input) = match std::mem::replace(&mut self.state, ActivityState::Loading) {
            ActivityState::Evaluating { content, input } => (content, input),
            other => {
                // unreachable while tickets are only issued on entering Evaluating
                self.state = other;
                return Resolution::Stale;
            }
        };

        match result {
            Ok(feedback) if feedback.kind() != self.kind => {
                let err = ContentError::KindMismatch {
                    expected: self.kind,
                    found: feedback.kind(),
                };
                self.fail(err.to_string());
            }
            Ok(feedback) => {
                let awarded = feedback.earns_point();
                if awarded {
                    self.score.increment();
                }
                tracing::debug!(kind = %self.kind, awarded, "Evaluation applied");
                self.state = ActivityState::Evaluated {
                    content,
                    input,
                    feedback,
                    awarded,
                };
            }
            Err(failure) => self.fail(failure.message),
        }

        Resolution::Applied
    }

    /// Fetch the next question after the current one is resolved
    pub fn next(&mut self) -> Result<ContentRequest, TransitionError> {
        if !self.state.is_resolved() {
            return Err(TransitionError::InvalidState {
                action: "request the next question",
                state: self.state.name(),
            });
        }
        Ok(self.begin_fetch())
    }

    // ===== Speech recognition =====

    fn recording_state(
        &mut self,
        action: &'static str,
    ) -> Result<(&mut String, &mut RecordingStatus, &mut Option<String>), TransitionError> {
        if self.kind != ActivityKind::Speaking {
            return Err(TransitionError::RecordingUnsupported(self.kind));
        }

        match &mut self.state {
            ActivityState::Ready {
                input,
                recording,
                notice,
                ..
            } => Ok((input, recording, notice)),
            other => Err(TransitionError::InvalidState {
                action,
                state: other.name(),
            }),
        }
    }

    /// Start capturing speech, clearing the previous transcript
    pub fn start_recording(&mut self) -> Result<(), TransitionError> {
        let (input, recording, notice) = self.recording_state("start recording")?;
        input.clear();
        *notice = None;
        *recording = RecordingStatus::Listening;
        Ok(())
    }

    /// Stop capturing without a transcript
    pub fn stop_recording(&mut self) -> Result<(), TransitionError> {
        let (_, recording, _) = self.recording_state("stop recording")?;
        *recording = RecordingStatus::Idle;
        Ok(())
    }

    /// Store the final transcript of a recording session as the answer
    pub fn capture_transcript(&mut self, transcript: &str) -> Result<(), TransitionError> {
        let (input, recording, _) = self.recording_state("capture a transcript")?;
        *input = transcript.trim().to_string();
        *recording = RecordingStatus::Idle;
        Ok(())
    }

    /// Report a recognition error inline and reset to idle
    pub fn recognition_failed(&mut self, reason: &str) -> Result<(), TransitionError> {
        let (_, recording, notice) = self.recording_state("report a recognition error")?;
        tracing::warn!(%reason, "Speech recognition error");
        *notice = Some(format!("Speech recognition error: {}", reason));
        *recording = RecordingStatus::Idle;
        Ok(())
    }
}
