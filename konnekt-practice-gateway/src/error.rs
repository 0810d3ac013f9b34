use konnekt_practice_core::ContentError;

/// Shown for any failed structured call
pub const STRUCTURED_FAILURE_MESSAGE: &str =
    "Failed to get a valid response from the AI. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Missing API key: set GEMINI_API_KEY or API_KEY")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("AI service returned no text")]
    EmptyResponse,

    #[error("AI service blocked the prompt: {0}")]
    Blocked(String),

    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] ContentError),

    #[error("{0}")]
    Scripted(String),

    #[error("Scripted gateway has no replies left")]
    Exhausted,
}

impl GatewayError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Status {
            status,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
