//! Typed practice calls on top of a [`ContentGateway`].

use crate::error::{GatewayError, Result, STRUCTURED_FAILURE_MESSAGE};
use crate::prompts;
use crate::schema::response_schema;
use crate::traits::ContentGateway;
use konnekt_practice_core::{
    ActivityContent, ActivityKind, ContentRequest, FeedbackResult, GatewayFailure,
    GrammarContent, ListeningContent, PracticeCommand, RequestKind, SpeakingFeedback,
    VocabularyContent, WritingFeedback,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Result of one service call, with the failure already phrased for the user
type Outcome<T> = std::result::Result<T, GatewayFailure>;

#[derive(Clone)]
pub struct PracticeContentService {
    gateway: Arc<dyn ContentGateway>,
}

impl std::fmt::Debug for PracticeContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticeContentService")
            .field("gateway", &self.gateway.name())
            .finish()
    }
}

impl PracticeContentService {
    pub fn new(gateway: Arc<dyn ContentGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway_name(&self) -> &'static str {
        self.gateway.name()
    }

    pub async fn generate_listening(&self) -> Result<ListeningContent> {
        let content: ListeningContent = self.structured(&prompts::listening_activity()).await?;
        content.validate()?;
        Ok(content)
    }

    pub async fn speaking_question(&self) -> Result<String> {
        self.gateway.generate_text(&prompts::speaking_question()).await
    }

    pub async fn writing_topic(&self) -> Result<String> {
        self.gateway.generate_text(&prompts::writing_topic()).await
    }

    pub async fn vocabulary_word(&self) -> Result<VocabularyContent> {
        let content: VocabularyContent = self.structured(&prompts::vocabulary_word()).await?;
        content.validate()?;
        Ok(content)
    }

    pub async fn grammar_question(&self) -> Result<GrammarContent> {
        let content: GrammarContent = self.structured(&prompts::grammar_question()).await?;
        content.validate()?;
        Ok(content)
    }

    pub async fn evaluate_spoken_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<SpeakingFeedback> {
        self.structured(&prompts::speaking_evaluation(question, answer))
            .await
    }

    pub async fn evaluate_writing(&self, topic: &str, text: &str) -> Result<WritingFeedback> {
        self.structured(&prompts::writing_evaluation(topic, text))
            .await
    }

    pub async fn evaluate_vocabulary_sentence(&self, word: &str, sentence: &str) -> Result<String> {
        self.gateway
            .generate_text(&prompts::vocabulary_evaluation(word, sentence))
            .await
    }

    /// Structured call decoded into `T`
    async fn structured<T>(&self, prompt: &str) -> Result<T>
    where
        T: JsonSchema + DeserializeOwned,
    {
        let schema = response_schema::<T>();
        let value = self.gateway.generate_structured(prompt, &schema).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fresh content for `kind`
    pub async fn fetch_content(&self, kind: ActivityKind) -> Outcome<ActivityContent> {
        match kind {
            ActivityKind::Listening => structured_outcome(self.generate_listening().await)
                .map(ActivityContent::Listening),
            ActivityKind::Grammar => {
                structured_outcome(self.grammar_question().await).map(ActivityContent::Grammar)
            }
            ActivityKind::Vocabulary => {
                structured_outcome(self.vocabulary_word().await).map(ActivityContent::Vocabulary)
            }
            ActivityKind::Speaking => text_outcome(self.speaking_question().await)
                .map(|question| ActivityContent::Speaking { question }),
            ActivityKind::Writing => text_outcome(self.writing_topic().await)
                .map(|topic| ActivityContent::Writing { topic }),
            ActivityKind::Menu => Err(GatewayFailure::new("The menu has no content to load")),
        }
    }

    /// Run `request` against the gateway and wrap the result as the command
    /// that delivers it back to the event loop.
    pub async fn dispatch(&self, request: ContentRequest) -> PracticeCommand {
        let ticket = request.ticket;
        tracing::debug!(%ticket, gateway = self.gateway.name(), "Dispatching request");

        match request.kind {
            RequestKind::FetchContent { kind } => PracticeCommand::ContentLoaded {
                ticket,
                result: self.fetch_content(kind).await,
            },
            RequestKind::EvaluateSpeaking { question, answer } => {
                let result = structured_outcome(
                    self.evaluate_spoken_answer(&question, &answer).await,
                )
                .map(FeedbackResult::Speaking);
                PracticeCommand::EvaluationCompleted { ticket, result }
            }
            RequestKind::EvaluateWriting { topic, text } => {
                let result = structured_outcome(self.evaluate_writing(&topic, &text).await)
                    .map(FeedbackResult::Writing);
                PracticeCommand::EvaluationCompleted { ticket, result }
            }
            RequestKind::EvaluateVocabulary { word, sentence } => {
                let result = text_outcome(self.evaluate_vocabulary_sentence(&word, &sentence).await)
                    .map(|critique| FeedbackResult::Vocabulary { critique });
                PracticeCommand::EvaluationCompleted { ticket, result }
            }
        }
    }
}

fn structured_outcome<T>(result: Result<T>) -> Outcome<T> {
    result.map_err(|e| {
        tracing::warn!(error = %e, "Structured gateway call failed");
        GatewayFailure::new(STRUCTURED_FAILURE_MESSAGE)
    })
}

fn text_outcome<T>(result: Result<T>) -> Outcome<T> {
    result.map_err(|e: GatewayError| {
        tracing::warn!(error = %e, "Gateway call failed");
        GatewayFailure::new(e.to_string())
    })
}
