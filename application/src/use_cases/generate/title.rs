//! Title generation use case

use super::{GenerationOutcome, GenerationRunner};
use crate::config::{CollaborationParams, TitleConfig};
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::progress::CollaborationProgress;
use crate::ports::provider::ProviderRegistry;
use crate::use_cases::collaborate::{CollaborationError, CollaborationInput};
use saloon_domain::extraction::DEFAULT_TITLE;
use saloon_domain::{Agent, ContextVariables, PromptTemplate, extract_title};
use std::sync::Arc;
use tracing::info;

/// Context key holding the book topic
pub const BOOK_TOPIC_KEY: &str = "book_topic";

/// Agrees on a book title for a topic
#[derive(Clone)]
pub struct TitleGenerator {
    runner: GenerationRunner,
}

impl TitleGenerator {
    pub fn new(
        agents: Vec<Agent>,
        registry: &ProviderRegistry,
        params: CollaborationParams,
        config: &TitleConfig,
    ) -> Result<Self, CollaborationError> {
        let params = params
            .with_max_turns(config.max_attempts)
            .with_force_consensus(config.force_consensus);
        Ok(Self {
            runner: GenerationRunner::new(agents, registry, params)?,
        })
    }

    pub fn with_progress(mut self, progress: Arc<dyn CollaborationProgress>) -> Self {
        self.runner.set_progress(progress);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.runner.set_logger(logger);
        self
    }

    /// Title used when the agents produce nothing usable
    pub fn fallback_title(topic: &str) -> String {
        let topic = topic.trim();
        if topic.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            format!("Book about {}", topic)
        }
    }

    pub async fn generate(&self, topic: &str) -> GenerationOutcome<String> {
        self.generate_with_context(topic, ContextVariables::new()).await
    }

    /// Generate with caller-seeded context variables
    pub async fn generate_with_context(
        &self,
        topic: &str,
        context: ContextVariables,
    ) -> GenerationOutcome<String> {
        info!("Generating title for topic: {}", topic);

        let mut initial = ContextVariables::new().with(BOOK_TOPIC_KEY, topic);
        initial.merge(&context);
        let input = CollaborationInput::new(PromptTemplate::title_seed(topic))
            .with_context(initial)
            .with_label("title");

        let fallback = Self::fallback_title(topic);
        let outcome = self
            .runner
            .generate(
                input,
                |content, metadata| extract_title(content, metadata, &fallback),
                || fallback.clone(),
            )
            .await;

        info!("Final book title: {}", outcome.value);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedProvider, agents, fast_params, registry};

    fn generator(provider: &Arc<ScriptedProvider>, config: TitleConfig) -> TitleGenerator {
        TitleGenerator::new(agents(), &registry(provider), fast_params(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_title_from_marker() {
        let provider = ScriptedProvider::texts(&[
            "How about \"Wild Rivers\"?\nConsensus: False",
            "<gustave>Lovely.</gustave>\nBook Title: Rivers Untamed\nConsensus: True",
        ]);
        let outcome = generator(&provider, TitleConfig::default())
            .generate("rivers")
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.value, "Rivers Untamed");
        assert_eq!(outcome.attempts, 2);
        assert!(
            provider.requests()[0]
                .last_message
                .ends_with("a book about: rivers")
        );
        assert_eq!(
            provider.contexts()[0].get_str(BOOK_TOPIC_KEY),
            Some("rivers")
        );
    }

    #[tokio::test]
    async fn test_forced_title_uses_last_turn() {
        let provider = ScriptedProvider::texts(&[
            "Maybe \"First Draft\"\nConsensus: False",
            "I prefer \"Second Draft\"\nConsensus: False",
        ]);
        let config = TitleConfig {
            max_attempts: 2,
            force_consensus: true,
        };
        let outcome = generator(&provider, config).generate("drafts").await;

        assert!(outcome.forced_consensus);
        assert_eq!(outcome.value, "Second Draft");
    }

    #[tokio::test]
    async fn test_fallback_without_consensus() {
        let provider = ScriptedProvider::texts(&["Nothing yet.", "Still thinking."]);
        let config = TitleConfig {
            max_attempts: 2,
            force_consensus: false,
        };
        let outcome = generator(&provider, config).generate("tea").await;

        assert!(!outcome.success);
        assert_eq!(outcome.value, "Book about tea");
    }

    #[test]
    fn test_fallback_title() {
        assert_eq!(TitleGenerator::fallback_title("  "), DEFAULT_TITLE);
        assert_eq!(TitleGenerator::fallback_title("moss"), "Book about moss");
    }
}
