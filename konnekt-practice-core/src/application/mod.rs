mod commands;
mod event_loop;
mod events;
pub mod runtime;

pub use commands::PracticeCommand;
pub use event_loop::PracticeEventLoop;
pub use events::PracticeEvent;
