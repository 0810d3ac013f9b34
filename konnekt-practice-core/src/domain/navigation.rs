use crate::domain::{
    ActivityContent, ActivityKind, ActivityMachine, ContentRequest, FeedbackResult,
    GatewayFailure, RequestTicket, Resolution, Score, SpeechCapabilities, TransitionError,
};

/// Selects the active activity and owns the session score.
///
/// There is no history: every selection discards the current instance.
#[derive(Debug)]
pub struct Navigator {
    active: ActivityKind,
    machine: Option<ActivityMachine>,
    score: Score,
    capabilities: SpeechCapabilities,
}

impl Navigator {
    pub fn new(capabilities: SpeechCapabilities) -> Self {
        Self {
            active: ActivityKind::Menu,
            machine: None,
            score: Score::new(),
            capabilities,
        }
    }

    pub fn active_kind(&self) -> ActivityKind {
        self.active
    }

    pub fn machine(&self) -> Option<&ActivityMachine> {
        self.machine.as_ref()
    }

    pub fn machine_mut(&mut self) -> Result<&mut ActivityMachine, TransitionError> {
        self.machine
            .as_mut()
            .ok_or(TransitionError::NoActiveActivity)
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn capabilities(&self) -> SpeechCapabilities {
        self.capabilities
    }

    /// Switch to `kind`, discarding the current instance.
    ///
    /// Re-selecting the active kind also starts a fresh instance.
    pub fn select(&mut self, kind: ActivityKind) -> Option<ContentRequest> {
        if let Some(previous) = self.machine.take() {
            tracing::debug!(
                kind = %previous.kind(),
                instance = %previous.id(),
                "Discarding activity instance"
            );
        }

        self.active = kind;
        tracing::info!(%kind, "Navigated");

        if !kind.is_practice() {
            return None;
        }

        match ActivityMachine::start(kind, self.score.handle(), self.capabilities) {
            Ok((machine, request)) => {
                self.machine = Some(machine);
                request
            }
            Err(e) => {
                tracing::error!("Failed to start {}: {}", kind, e);
                self.active = ActivityKind::Menu;
                None
            }
        }
    }

    pub fn return_to_menu(&mut self) {
        self.select(ActivityKind::Menu);
    }

    /// Route fetched content to the instance that asked for it
    pub fn deliver_content(
        &mut self,
        ticket: RequestTicket,
        result: Result<ActivityContent, GatewayFailure>,
    ) -> Resolution {
        match self.machine_for(ticket) {
            Some(machine) => machine.apply_content(ticket, result),
            None => Resolution::Stale,
        }
    }

    /// Route an evaluation to the instance that asked for it
    pub fn deliver_evaluation(
        &mut self,
        ticket: RequestTicket,
        result: Result<FeedbackResult, GatewayFailure>,
    ) -> Resolution {
        match self.machine_for(ticket) {
            Some(machine) => machine.apply_evaluation(ticket, result),
            None => Resolution::Stale,
        }
    }

    fn machine_for(&mut self, ticket: RequestTicket) -> Option<&mut ActivityMachine> {
        match self.machine.as_mut() {
            Some(machine) if machine.id() == ticket.instance => Some(machine),
            _ => {
                tracing::warn!(%ticket, "Result for a discarded activity instance");
                None
            }
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(SpeechCapabilities::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityState, StateName, WritingFeedback};

    fn writing(topic: &str) -> ActivityContent {
        ActivityContent::Writing {
            topic: topic.to_string(),
        }
    }

    #[test]
    fn test_starts_at_menu() {
        let nav = Navigator::default();
        assert_eq!(nav.active_kind(), ActivityKind::Menu);
        assert!(nav.machine().is_none());
        assert_eq!(nav.score(), 0);
    }

    #[test]
    fn test_select_creates_loading_instance() {
        let mut nav = Navigator::default();
        let request = nav.select(ActivityKind::Writing).unwrap();

        let machine = nav.machine().unwrap();
        assert_eq!(machine.kind(), ActivityKind::Writing);
        assert_eq!(machine.state(), &ActivityState::Loading);
        assert_eq!(request.ticket.instance, machine.id());
    }

    #[test]
    fn test_menu_discards_instance() {
        let mut nav = Navigator::default();
        nav.select(ActivityKind::Grammar);
        nav.return_to_menu();

        assert_eq!(nav.active_kind(), ActivityKind::Menu);
        assert!(nav.machine().is_none());
        assert!(matches!(
            nav.machine_mut(),
            Err(TransitionError::NoActiveActivity)
        ));
    }

    #[test]
    fn test_result_for_discarded_instance_is_stale() {
        let mut nav = Navigator::default();
        let request = nav.select(ActivityKind::Writing).unwrap();
        nav.return_to_menu();

        assert_eq!(
            nav.deliver_content(request.ticket, Ok(writing("Old topic"))),
            Resolution::Stale
        );
        assert!(nav.machine().is_none());
    }

    #[test]
    fn test_reselecting_same_kind_ignores_old_response() {
        let mut nav = Navigator::default();
        let first = nav.select(ActivityKind::Writing).unwrap();
        nav.return_to_menu();
        let second = nav.select(ActivityKind::Writing).unwrap();

        assert_ne!(first.ticket.instance, second.ticket.instance);
        assert_eq!(
            nav.deliver_content(first.ticket, Ok(writing("Stale topic"))),
            Resolution::Stale
        );
        assert_eq!(nav.machine().unwrap().state().name(), StateName::Loading);

        nav.deliver_content(second.ticket, Ok(writing("Fresh topic")));
        assert_eq!(
            nav.machine().unwrap().state().content(),
            Some(&writing("Fresh topic"))
        );
    }

    #[test]
    fn test_score_survives_navigation() {
        let mut nav = Navigator::default();
        let request = nav.select(ActivityKind::Writing).unwrap();
        nav.deliver_content(request.ticket, Ok(writing("Describe your home.")));

        let machine = nav.machine_mut().unwrap();
        machine.update_input("My home is small.").unwrap();
        let evaluation = match machine.submit().unwrap() {
            crate::domain::SubmitOutcome::Evaluate(r) => r,
            _ => panic!("Expected evaluation"),
        };
        nav.deliver_evaluation(
            evaluation.ticket,
            Ok(FeedbackResult::Writing(WritingFeedback {
                praise: "Well done!".to_string(),
                corrections: vec![],
            })),
        );
        assert_eq!(nav.score(), 1);

        nav.select(ActivityKind::Listening);
        nav.return_to_menu();
        assert_eq!(nav.score(), 1);
    }

    #[test]
    fn test_capabilities_propagate_to_instances() {
        let mut nav = Navigator::new(SpeechCapabilities::none());
        assert!(nav.select(ActivityKind::Listening).is_none());
        assert_eq!(nav.machine().unwrap().state().name(), StateName::Error);

        assert!(nav.select(ActivityKind::Grammar).is_some());
    }
}
