use konnekt_practice_core::UnknownActivity;
use konnekt_practice_gateway::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    UnknownActivity(#[from] UnknownActivity),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Practice runtime stopped")]
    RuntimeStopped,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CliError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        CliError::InvalidConfig(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
