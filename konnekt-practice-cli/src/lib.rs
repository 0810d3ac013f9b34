pub mod infrastructure;
pub mod presentation;

pub use infrastructure::{
    CliArgs, CliError, LogConfig, PracticeConfig, PracticeRuntime, PracticeSnapshot, Result,
};
