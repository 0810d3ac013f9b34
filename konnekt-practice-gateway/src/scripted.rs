use crate::error::{GatewayError, Result};
use crate::traits::ContentGateway;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One canned gateway reply
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedReply {
    Text(String),
    Json(serde_json::Value),
    Fail(String),
}

/// Offline gateway that answers from a queue of canned replies.
///
/// Replies are consumed in order regardless of call style: a `Text` reply
/// given to a structured call is parsed as JSON, and a `Json` reply given
/// to a text call is rendered as a string.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<ScriptedReply>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, reply: ScriptedReply) {
        lock(&self.replies).push_back(reply);
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.replies).len()
    }

    fn next_reply(&self, prompt: &str) -> Result<ScriptedReply> {
        lock(&self.prompts).push(prompt.to_string());
        lock(&self.replies)
            .pop_front()
            .ok_or(GatewayError::Exhausted)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ContentGateway for ScriptedGateway {
    fn name(&self) -> &'static str {
        "Scripted"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        match self.next_reply(prompt)? {
            ScriptedReply::Text(text) => Ok(text.trim().to_string()),
            ScriptedReply::Json(value) => Ok(value.to_string()),
            ScriptedReply::Fail(message) => Err(GatewayError::Scripted(message)),
        }
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        match self.next_reply(prompt)? {
            ScriptedReply::Json(value) => Ok(value),
            ScriptedReply::Text(text) => Ok(serde_json::from_str(&text)?),
            ScriptedReply::Fail(message) => Err(GatewayError::Scripted(message)),
        }
    }
}
