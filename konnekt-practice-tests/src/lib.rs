use cucumber::World;
use konnekt_practice_core::{
    ActivityState, ContentRequest, PracticeCommand, PracticeEvent, PracticeEventLoop,
    RequestKind, SpeechCapabilities, StateName,
};
use konnekt_practice_gateway::{PracticeContentService, ScriptedGateway, ScriptedReply};
use std::sync::Arc;

#[derive(Debug, World)]
pub struct PracticeWorld {
    /// Practice event loop (the system under test)
    pub event_loop: PracticeEventLoop,

    /// Canned AI replies, consumed by `answer_request`
    pub gateway: Arc<ScriptedGateway>,

    /// Typed calls over `gateway`, the same path the CLI uses
    pub service: PracticeContentService,

    /// Requests issued but not answered yet, oldest first
    pub pending: Vec<ContentRequest>,

    /// Events of the last command
    pub last_events: Vec<PracticeEvent>,

    /// Reason of the last `CommandFailed`
    pub last_error: Option<String>,
}

impl Default for PracticeWorld {
    fn default() -> Self {
        Self::with_capabilities(SpeechCapabilities::all())
    }
}

impl PracticeWorld {
    pub fn with_capabilities(capabilities: SpeechCapabilities) -> Self {
        let gateway = Arc::new(ScriptedGateway::default());
        Self {
            event_loop: PracticeEventLoop::new(capabilities),
            service: PracticeContentService::new(gateway.clone()),
            gateway,
            pending: Vec::new(),
            last_events: Vec::new(),
            last_error: None,
        }
    }

    /// Execute a command and record its events and requests
    pub fn execute(&mut self, command: PracticeCommand) -> &[PracticeEvent] {
        let events = self.event_loop.handle_command(command);

        self.last_error = events.iter().find_map(|e| match e {
            PracticeEvent::CommandFailed { reason, .. } => Some(reason.clone()),
            _ => None,
        });
        self.pending
            .extend(events.iter().filter_map(|e| e.request().cloned()));

        self.last_events = events;
        &self.last_events
    }

    /// Queue a canned reply for the next gateway call
    pub fn script(&self, reply: ScriptedReply) {
        self.gateway.push(reply);
    }

    /// Run the most recent pending request through the service and deliver
    /// its result.
    pub async fn answer_latest(&mut self) -> &[PracticeEvent] {
        let request = self.pending.pop().expect("No pending request");
        self.answer(request).await
    }

    /// Same as `answer_latest`, for the oldest pending request
    pub async fn answer_oldest(&mut self) -> &[PracticeEvent] {
        assert!(!self.pending.is_empty(), "No pending request");
        let request = self.pending.remove(0);
        self.answer(request).await
    }

    async fn answer(&mut self, request: ContentRequest) -> &[PracticeEvent] {
        let command = self.service.dispatch(request).await;
        self.execute(command)
    }

    pub fn state(&self) -> Option<&ActivityState> {
        self.event_loop.machine().map(|m| m.state())
    }

    pub fn state_name(&self) -> Option<StateName> {
        self.state().map(ActivityState::name)
    }

    pub fn score(&self) -> u32 {
        self.event_loop.score()
    }

    /// Whether an evaluation request is waiting for the AI
    pub fn evaluation_pending(&self) -> bool {
        self.pending
            .iter()
            .any(|r| !matches!(r.kind, RequestKind::FetchContent { .. }))
    }

    pub fn emitted<F>(&self, predicate: F) -> bool
    where
        F: Fn(&PracticeEvent) -> bool,
    {
        self.last_events.iter().any(predicate)
    }
}

/// Canned AI payloads used across features
pub mod fixtures {
    use serde_json::{json, Value};

    /// Comma-separated list as used in feature tables
    pub fn split_options(list: &str) -> Vec<String> {
        list.split(',').map(|o| o.trim().to_string()).collect()
    }

    pub fn grammar(question: &str, options: &[String], answer: &str, hint: &str) -> Value {
        json!({
            "question": question,
            "options": options,
            "answer": answer,
            "hint": hint,
        })
    }

    pub fn listening(sentence: &str, question: &str, options: &[String], answer: &str) -> Value {
        json!({
            "sentence": sentence,
            "question": question,
            "options": options,
            "answer": answer,
        })
    }

    pub fn vocabulary(word: &str) -> Value {
        json!({
            "word": word,
            "meaning": format!("the meaning of {}", word),
            "example": format!("An example with {}.", word),
            "synonym": "similar",
        })
    }

    pub fn writing_feedback(corrections: &[(String, String)]) -> Value {
        let corrections: Vec<Value> = corrections
            .iter()
            .map(|(original, corrected)| {
                json!({
                    "original": original,
                    "corrected": corrected,
                    "explanation": "Check the verb form.",
                })
            })
            .collect();
        json!({ "praise": "Good effort!", "corrections": corrections })
    }

    pub fn speaking_feedback(correction: &str) -> Value {
        json!({
            "praise": "Nice answer!",
            "correction": correction,
            "explanation": if correction.trim().is_empty() { "" } else { "Check the verb form." },
        })
    }
}
