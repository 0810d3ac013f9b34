use crate::application::{PracticeCommand, PracticeEvent};
use crate::domain::{
    ActivityKind, ActivityMachine, ActivityState, Navigator, RecordingStatus, RequestTicket,
    Resolution, SpeechCapabilities, SubmitOutcome, TransitionError,
};

/// Practice event loop that processes commands and emits events
#[derive(Debug, Default)]
pub struct PracticeEventLoop {
    navigator: Navigator,
}

impl PracticeEventLoop {
    /// Create a new event loop for an environment with the given speech support
    pub fn new(capabilities: SpeechCapabilities) -> Self {
        Self {
            navigator: Navigator::new(capabilities),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn active_kind(&self) -> ActivityKind {
        self.navigator.active_kind()
    }

    pub fn machine(&self) -> Option<&ActivityMachine> {
        self.navigator.machine()
    }

    pub fn score(&self) -> u32 {
        self.navigator.score()
    }

    /// Process a single command and return the resulting events
    pub fn handle_command(&mut self, command: PracticeCommand) -> Vec<PracticeEvent> {
        let name = command.name();
        let score_before = self.navigator.score();

        let result = match command {
            PracticeCommand::SelectActivity { kind } => Ok(self.handle_select(kind)),
            PracticeCommand::ReturnToMenu => Ok(self.handle_select(ActivityKind::Menu)),
            PracticeCommand::ChooseOption { option } => self.handle_choose(&option),
            PracticeCommand::UpdateInput { text } => self.handle_update_input(text),
            PracticeCommand::SubmitAnswer => self.handle_submit(),
            PracticeCommand::RequestNext => self.handle_next(),
            PracticeCommand::StartRecording => self.handle_recording(|m| m.start_recording()),
            PracticeCommand::StopRecording => self.handle_recording(|m| m.stop_recording()),
            PracticeCommand::TranscriptCaptured { transcript } => {
                self.handle_transcript(&transcript)
            }
            PracticeCommand::RecognitionFailed { reason } => {
                self.handle_recognition_failed(&reason)
            }
            PracticeCommand::ContentLoaded { ticket, result } => {
                let resolution = self.navigator.deliver_content(ticket, result);
                Ok(self.resolved_events(ticket, resolution))
            }
            PracticeCommand::EvaluationCompleted { ticket, result } => {
                let resolution = self.navigator.deliver_evaluation(ticket, result);
                Ok(self.resolved_events(ticket, resolution))
            }
        };

        let mut events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::debug!(command = name, "Command failed: {}", e);
                vec![PracticeEvent::CommandFailed {
                    command: name.to_string(),
                    reason: e.to_string(),
                }]
            }
        };

        let score_after = self.navigator.score();
        if score_after != score_before {
            events.push(PracticeEvent::ScoreChanged { total: score_after });
        }

        events
    }

    fn handle_select(&mut self, kind: ActivityKind) -> Vec<PracticeEvent> {
        let mut events = vec![PracticeEvent::Navigated { kind }];

        if let Some(request) = self.navigator.select(kind) {
            events.push(PracticeEvent::RequestIssued { request });
        }

        if let Some(machine) = self.navigator.machine() {
            if let ActivityState::Error(failure) = machine.state() {
                events.push(PracticeEvent::ActivityFailed {
                    instance: machine.id(),
                    failure: failure.clone(),
                });
            }
        }

        events
    }

    fn handle_choose(&mut self, option: &str) -> Result<Vec<PracticeEvent>, TransitionError> {
        let machine = self.navigator.machine_mut()?;
        let outcome = machine.choose(option)?;

        Ok(vec![PracticeEvent::AnswerResolved {
            instance: machine.id(),
            outcome,
        }])
    }

    fn handle_update_input(&mut self, text: String) -> Result<Vec<PracticeEvent>, TransitionError> {
        let machine = self.navigator.machine_mut()?;
        machine.update_input(text)?;

        Ok(vec![PracticeEvent::InputUpdated {
            instance: machine.id(),
        }])
    }

    fn handle_submit(&mut self) -> Result<Vec<PracticeEvent>, TransitionError> {
        let machine = self.navigator.machine_mut()?;

        match machine.submit()? {
            SubmitOutcome::Rejected => Ok(vec![PracticeEvent::InputRejected {
                instance: machine.id(),
            }]),
            SubmitOutcome::Evaluate(request) => Ok(vec![PracticeEvent::RequestIssued { request }]),
        }
    }

    fn handle_next(&mut self) -> Result<Vec<PracticeEvent>, TransitionError> {
        let request = self.navigator.machine_mut()?.next()?;
        Ok(vec![PracticeEvent::RequestIssued { request }])
    }

    fn handle_recording<F>(&mut self, transition: F) -> Result<Vec<PracticeEvent>, TransitionError>
    where
        F: FnOnce(&mut ActivityMachine) -> Result<(), TransitionError>,
    {
        let machine = self.navigator.machine_mut()?;
        transition(&mut *machine)?;

        Ok(vec![PracticeEvent::RecordingChanged {
            instance: machine.id(),
            status: recording_status(machine),
        }])
    }

    fn handle_transcript(&mut self, transcript: &str) -> Result<Vec<PracticeEvent>, TransitionError> {
        let machine = self.navigator.machine_mut()?;
        machine.capture_transcript(transcript)?;
        let instance = machine.id();

        Ok(vec![
            PracticeEvent::TranscriptCaptured {
                instance,
                transcript: transcript.trim().to_string(),
            },
            PracticeEvent::RecordingChanged {
                instance,
                status: RecordingStatus::Idle,
            },
        ])
    }

    fn handle_recognition_failed(
        &mut self,
        reason: &str,
    ) -> Result<Vec<PracticeEvent>, TransitionError> {
        let machine = self.navigator.machine_mut()?;
        machine.recognition_failed(reason)?;
        let instance = machine.id();

        let message = match machine.state() {
            ActivityState::Ready {
                notice: Some(notice),
                ..
            } => notice.clone(),
            _ => reason.to_string(),
        };

        Ok(vec![
            PracticeEvent::RecognitionNotice { instance, message },
            PracticeEvent::RecordingChanged {
                instance,
                status: RecordingStatus::Idle,
            },
        ])
    }

    /// Events describing the state a gateway result left the activity in
    fn resolved_events(&self, ticket: RequestTicket, resolution: Resolution) -> Vec<PracticeEvent> {
        if resolution == Resolution::Stale {
            return vec![PracticeEvent::StaleResultDiscarded { ticket }];
        }

        let Some(machine) = self.navigator.machine() else {
            return Vec::new();
        };
        let instance = machine.id();

        match machine.state() {
            ActivityState::Ready { content, .. } => vec![PracticeEvent::ContentReady {
                instance,
                content: content.clone(),
            }],
            ActivityState::Evaluated {
                feedback, awarded, ..
            } => vec![PracticeEvent::EvaluationReady {
                instance,
                feedback: feedback.clone(),
                awarded: *awarded,
            }],
            ActivityState::Error(failure) => vec![PracticeEvent::ActivityFailed {
                instance,
                failure: failure.clone(),
            }],
            _ => Vec::new(),
        }
    }
}

fn recording_status(machine: &ActivityMachine) -> RecordingStatus {
    match machine.state() {
        ActivityState::Ready { recording, .. } => *recording,
        _ => RecordingStatus::Idle,
    }
}
