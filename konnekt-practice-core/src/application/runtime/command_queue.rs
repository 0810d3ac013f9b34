use crate::application::PracticeCommand;
use std::collections::VecDeque;

/// Synchronous command queue (no async, works in any runtime).
///
/// Two rules on top of FIFO order:
/// - an `UpdateInput` directly behind another one replaces it;
/// - gateway results are accepted even when the queue is full.
#[derive(Debug)]
pub struct CommandQueue {
    queue: VecDeque<PracticeCommand>,
    max_size: usize,
}

impl CommandQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Push a command (returns error if full)
    pub fn push(&mut self, cmd: PracticeCommand) -> Result<(), QueueError> {
        if matches!(cmd, PracticeCommand::UpdateInput { .. }) {
            if let Some(last) = self.queue.back_mut() {
                if matches!(last, PracticeCommand::UpdateInput { .. }) {
                    *last = cmd;
                    return Ok(());
                }
            }
        }

        if self.queue.len() >= self.max_size && !is_gateway_result(&cmd) {
            return Err(QueueError::Full { max: self.max_size });
        }
        self.queue.push_back(cmd);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<PracticeCommand> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }
}

fn is_gateway_result(cmd: &PracticeCommand) -> bool {
    matches!(
        cmd,
        PracticeCommand::ContentLoaded { .. } | PracticeCommand::EvaluationCompleted { .. }
    )
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QueueError {
    #[error("Queue is full (max size: {max})")]
    Full { max: usize },
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(100)
    }
}
