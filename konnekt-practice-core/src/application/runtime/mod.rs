mod command_queue;
mod practice_loop;

pub use command_queue::{CommandQueue, QueueError};
pub use practice_loop::PracticeLoop;
