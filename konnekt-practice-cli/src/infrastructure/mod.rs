pub mod config;
pub mod error;
pub mod observability;
pub mod practice_runtime;

pub use config::{CliArgs, PracticeConfig};
pub use error::{CliError, Result};
pub use observability::LogConfig;
pub use practice_runtime::{PracticeRuntime, PracticeSnapshot};
