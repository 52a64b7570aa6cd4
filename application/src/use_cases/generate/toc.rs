//! Table-of-contents generation use case

use super::title::BOOK_TOPIC_KEY;
use super::{GenerationOutcome, GenerationRunner};
use crate::config::{CollaborationParams, TocConfig};
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::progress::CollaborationProgress;
use crate::ports::provider::ProviderRegistry;
use crate::use_cases::collaborate::{CollaborationError, CollaborationInput};
use saloon_domain::{
    Agent, BOOK_TITLE_KEY, ContextVariables, Outline, OutlineBounds, PromptTemplate,
    extract_outline,
};
use std::sync::Arc;
use tracing::info;

/// Agrees on the outline of a titled book
#[derive(Clone)]
pub struct TocGenerator {
    runner: GenerationRunner,
    bounds: OutlineBounds,
}

impl TocGenerator {
    pub fn new(
        agents: Vec<Agent>,
        registry: &ProviderRegistry,
        params: CollaborationParams,
        config: &TocConfig,
    ) -> Result<Self, CollaborationError> {
        let params = params
            .with_max_turns(config.max_attempts)
            .with_force_consensus(config.force_consensus);
        Ok(Self {
            runner: GenerationRunner::new(agents, registry, params)?,
            bounds: OutlineBounds::new(config.min_chapters, config.max_chapters),
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

    pub fn bounds(&self) -> OutlineBounds {
        self.bounds
    }

    pub async fn generate(&self, title: &str, topic: &str) -> GenerationOutcome<Outline> {
        info!("Generating table of contents for '{}'", title);

        let bounds = self.bounds;
        let context = ContextVariables::new()
            .with(BOOK_TITLE_KEY, title)
            .with(BOOK_TOPIC_KEY, topic)
            .with("min_chapters", bounds.min_chapters)
            .with("max_chapters", bounds.max_chapters);
        let input = CollaborationInput::new(PromptTemplate::toc_seed(
            title,
            topic,
            bounds.min_chapters,
            bounds.max_chapters,
        ))
        .with_context(context)
        .with_label("toc");

        let outcome = self
            .runner
            .generate(
                input,
                |content, _| extract_outline(content, bounds),
                || extract_outline("", bounds),
            )
            .await;

        info!(
            "Generated table of contents with {} chapters",
            outcome.value.len()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedProvider, agents, fast_params, registry};

    fn generator(provider: &Arc<ScriptedProvider>, config: TocConfig) -> TocGenerator {
        TocGenerator::new(agents(), &registry(provider), fast_params(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_outline_from_content_tags() {
        let provider = ScriptedProvider::texts(&[
            "<zero>Draft</zero>\nConsensus: False",
            r#"<gustave>Final</gustave>
<content>[
  {"title": "Sources", "sections": [{"title": "Springs"}, {"title": "Snowmelt"}]},
  {"title": "Deltas", "sections": ["Silt", "Mouths"]}
]</content>
Consensus: True"#,
        ]);
        let config = TocConfig {
            min_chapters: 2,
            max_chapters: 4,
            ..TocConfig::default()
        };
        let outcome = generator(&provider, config).generate("Rivers", "rivers").await;

        assert!(outcome.success);
        assert_eq!(outcome.value.len(), 2);
        assert_eq!(outcome.value.chapters[1].sections[0].title, "Silt");

        let context = &provider.contexts()[0];
        assert_eq!(context.get_str("book_title"), Some("Rivers"));
        assert_eq!(context.get("min_chapters"), Some(&serde_json::json!(2)));
    }

    #[tokio::test]
    async fn test_short_outline_is_repaired() {
        let provider = ScriptedProvider::texts(&["Chapter 1: Only\n1.1 Start\nConsensus: True"]);
        let outcome = generator(&provider, TocConfig::default())
            .generate("Rivers", "rivers")
            .await;

        assert_eq!(outcome.value.len(), 5);
        assert_eq!(outcome.value.chapters[0].title, "Only");
        assert_eq!(outcome.value.chapters[4].title, "Chapter 5");
    }

    #[tokio::test]
    async fn test_no_consensus_still_meets_minimum() {
        let provider = ScriptedProvider::texts(&["hmm", "hmm"]);
        let config = TocConfig {
            max_attempts: 2,
            force_consensus: false,
            min_chapters: 3,
            max_chapters: 6,
        };
        let outcome = generator(&provider, config).generate("T", "t").await;

        assert!(!outcome.success);
        assert_eq!(outcome.value.len(), 3);
    }
}
