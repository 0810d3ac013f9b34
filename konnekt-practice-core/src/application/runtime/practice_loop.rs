use crate::application::runtime::{CommandQueue, QueueError};
use crate::application::{PracticeCommand, PracticeEvent, PracticeEventLoop};
use crate::domain::{ContentRequest, SpeechCapabilities};

/// Practice loop - processes queued commands in batches
#[derive(Debug)]
pub struct PracticeLoop {
    /// Stateful event loop (owns navigation and score)
    event_loop: PracticeEventLoop,

    /// Inbound command queue
    inbound: CommandQueue,

    /// Outbound event queue (caller drains this)
    outbound: Vec<PracticeEvent>,

    /// Max commands to process per poll
    batch_size: usize,
}

impl PracticeLoop {
    pub fn new(capabilities: SpeechCapabilities, batch_size: usize, max_queue_size: usize) -> Self {
        Self {
            event_loop: PracticeEventLoop::new(capabilities),
            inbound: CommandQueue::new(max_queue_size),
            outbound: Vec::new(),
            batch_size,
        }
    }

    /// Submit a command (non-blocking)
    pub fn submit(&mut self, cmd: PracticeCommand) -> Result<(), QueueError> {
        self.inbound.push(cmd)
    }

    /// Process up to `batch_size` commands.
    /// Returns number of commands processed
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;

        while processed < self.batch_size {
            match self.inbound.pop() {
                Some(cmd) => {
                    let events = self.event_loop.handle_command(cmd);
                    self.outbound.extend(events);
                    processed += 1;
                }
                None => break,
            }
        }

        processed
    }

    /// Drain all emitted events (caller's responsibility)
    pub fn drain_events(&mut self) -> Vec<PracticeEvent> {
        std::mem::take(&mut self.outbound)
    }

    /// Gateway requests among `events`
    pub fn requests(events: &[PracticeEvent]) -> Vec<ContentRequest> {
        events.iter().filter_map(|e| e.request().cloned()).collect()
    }

    /// Get reference to event loop (for queries)
    pub fn event_loop(&self) -> &PracticeEventLoop {
        &self.event_loop
    }

    pub fn pending_commands(&self) -> usize {
        self.inbound.len()
    }
}

impl Default for PracticeLoop {
    fn default() -> Self {
        Self::new(SpeechCapabilities::default(), 10, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityContent, ActivityKind, StateName};

    #[test]
    fn test_submit_and_poll() {
        let mut loop_ = PracticeLoop::default();

        loop_
            .submit(PracticeCommand::SelectActivity {
                kind: ActivityKind::Writing,
            })
            .unwrap();

        assert_eq!(loop_.poll(), 1);

        let events = loop_.drain_events();
        assert_eq!(
            events[0],
            PracticeEvent::Navigated {
                kind: ActivityKind::Writing
            }
        );
        assert_eq!(PracticeLoop::requests(&events).len(), 1);
        assert!(loop_.drain_events().is_empty());
    }

    #[test]
    fn test_batch_processing() {
        let mut loop_ = PracticeLoop::new(SpeechCapabilities::all(), 3, 100);

        for kind in ActivityKind::PRACTICE {
            loop_.submit(PracticeCommand::SelectActivity { kind }).unwrap();
        }

        assert_eq!(loop_.poll(), 3);
        assert_eq!(loop_.pending_commands(), 2);
        assert_eq!(loop_.poll(), 2);
        assert_eq!(loop_.event_loop().active_kind(), ActivityKind::Grammar);
    }

    #[test]
    fn test_content_round_trip_through_queue() {
        let mut loop_ = PracticeLoop::default();
        loop_
            .submit(PracticeCommand::SelectActivity {
                kind: ActivityKind::Writing,
            })
            .unwrap();
        loop_.poll();
        let request = PracticeLoop::requests(&loop_.drain_events()).remove(0);

        loop_
            .submit(PracticeCommand::ContentLoaded {
                ticket: request.ticket,
                result: Ok(ActivityContent::Writing {
                    topic: "Describe your best friend.".to_string(),
                }),
            })
            .unwrap();
        loop_.poll();

        let machine = loop_.event_loop().machine().unwrap();
        assert_eq!(machine.state().name(), StateName::Ready);
    }

    #[test]
    fn test_queue_overflow() {
        let mut loop_ = PracticeLoop::new(SpeechCapabilities::all(), 10, 2);

        loop_.submit(PracticeCommand::ReturnToMenu).unwrap();
        loop_.submit(PracticeCommand::ReturnToMenu).unwrap();

        assert!(loop_.submit(PracticeCommand::ReturnToMenu).is_err());
    }
}
