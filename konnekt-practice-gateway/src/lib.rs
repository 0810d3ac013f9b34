//! AI content gateway for the practice activities.
//!
//! [`ContentGateway`] is the raw text/JSON seam, [`GeminiGateway`] its HTTP
//! implementation and [`PracticeContentService`] the typed calls the
//! activities issue.

pub mod config;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod schema;
pub mod scripted;
pub mod service;
pub mod traits;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result, STRUCTURED_FAILURE_MESSAGE};
pub use gemini::GeminiGateway;
pub use schema::response_schema;
pub use scripted::{ScriptedGateway, ScriptedReply};
pub use service::PracticeContentService;
pub use traits::ContentGateway;
