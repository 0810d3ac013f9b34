use crate::error::Result;
use async_trait::async_trait;

/// Generative-AI text service.
///
/// Calls are not repeatable: the same prompt may yield a different result.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Gateway name for logs
    fn name(&self) -> &'static str;

    /// Prompt → trimmed plain text
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Prompt + JSON schema → parsed JSON value.
    ///
    /// The value is only guaranteed to be JSON; callers check it against
    /// their own types.
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value>;
}
