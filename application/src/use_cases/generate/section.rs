//! Section content generation use case

use super::{GenerationOutcome, GenerationRunner};
use crate::config::{CollaborationParams, SectionConfig};
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::progress::CollaborationProgress;
use crate::ports::provider::ProviderRegistry;
use crate::use_cases::collaborate::{CollaborationError, CollaborationInput};
use saloon_domain::core::string::word_count;
use saloon_domain::{Agent, BOOK_TITLE_KEY, ContextVariables, PromptTemplate, clean_section_content};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// One section to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRequest {
    pub book_title: String,
    /// Dot-path id ("2.3")
    pub section_id: String,
    pub section_title: String,
    /// Title of the enclosing chapter or section
    pub parent_title: Option<String>,
    /// Titles of the earlier siblings, in order
    pub previous_section_titles: Vec<String>,
}

impl SectionRequest {
    pub fn new(
        book_title: impl Into<String>,
        section_id: impl Into<String>,
        section_title: impl Into<String>,
    ) -> Self {
        Self {
            book_title: book_title.into(),
            section_id: section_id.into(),
            section_title: section_title.into(),
            parent_title: None,
            previous_section_titles: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_title: impl Into<String>) -> Self {
        self.parent_title = Some(parent_title.into());
        self
    }

    pub fn with_previous(mut self, titles: Vec<String>) -> Self {
        self.previous_section_titles = titles;
        self
    }
}

/// Cleaned prose and its length
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionContent {
    pub content: String,
    pub word_count: usize,
}

impl SectionContent {
    pub fn new(content: String) -> Self {
        let word_count = word_count(&content);
        Self {
            content,
            word_count,
        }
    }
}

/// Writes the prose of one outline entry
#[derive(Clone)]
pub struct SectionGenerator {
    runner: GenerationRunner,
    min_words: usize,
    max_words: usize,
}

impl SectionGenerator {
    pub fn new(
        agents: Vec<Agent>,
        registry: &ProviderRegistry,
        params: CollaborationParams,
        config: &SectionConfig,
    ) -> Result<Self, CollaborationError> {
        let params = params
            .with_max_turns(config.max_attempts)
            .with_force_consensus(config.force_consensus);
        Ok(Self {
            runner: GenerationRunner::new(agents, registry, params)?,
            min_words: config.min_words,
            max_words: config.max_words.max(config.min_words),
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

    fn context(&self, request: &SectionRequest) -> ContextVariables {
        let mut context = ContextVariables::new()
            .with(BOOK_TITLE_KEY, request.book_title.as_str())
            .with("section_id", request.section_id.as_str())
            .with("section_title", request.section_title.as_str())
            .with("min_words", self.min_words)
            .with("max_words", self.max_words);
        if let Some(parent) = &request.parent_title {
            context.insert("parent_title", parent.as_str());
        }
        if !request.previous_section_titles.is_empty() {
            context.insert(
                "previous_section_titles",
                Value::from(request.previous_section_titles.clone()),
            );
        }
        context
    }

    pub async fn generate(&self, request: &SectionRequest) -> GenerationOutcome<SectionContent> {
        info!(
            "Generating content for section {}: {}",
            request.section_id, request.section_title
        );

        let seed = PromptTemplate::section_seed(
            &request.book_title,
            &request.section_id,
            &request.section_title,
            request.parent_title.as_deref(),
            &request.previous_section_titles,
            self.min_words,
            self.max_words,
        );
        let input = CollaborationInput::new(seed)
            .with_context(self.context(request))
            .with_label(format!("section {}", request.section_id));

        let title = request.section_title.as_str();
        let outcome = self
            .runner
            .generate(
                input,
                |content, _| SectionContent::new(clean_section_content(content, Some(title))),
                SectionContent::default,
            )
            .await;

        let words = outcome.value.word_count;
        if words < self.min_words {
            warn!(
                "Section {} has {} words (asked for at least {})",
                request.section_id, words, self.min_words
            );
        } else {
            info!("Generated section content with {} words", words);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedProvider, agents, fast_params, registry};

    fn generator(provider: &Arc<ScriptedProvider>) -> SectionGenerator {
        let config = SectionConfig {
            min_words: 3,
            max_words: 50,
            ..SectionConfig::default()
        };
        SectionGenerator::new(agents(), &registry(provider), fast_params(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_section_content_and_context() {
        let provider = ScriptedProvider::texts(&[
            "<zero>Here goes</zero>\n<content>Springs feed every river we know.</content>\nConsensus: True",
        ]);
        let request = SectionRequest::new("Rivers", "1.2", "Springs")
            .with_parent("Sources")
            .with_previous(vec!["Rain".to_string()]);

        let outcome = generator(&provider).generate(&request).await;

        assert!(outcome.success);
        assert_eq!(
            outcome.value.content,
            "# Springs\n\nSprings feed every river we know."
        );
        assert_eq!(outcome.value.word_count, 8);

        let seen = &provider.requests()[0];
        assert!(seen.last_message.contains("chapter 'Sources'"));
        assert!(seen.last_message.ends_with("- Rain"));
        assert_eq!(seen.context.get_str("section_id"), Some("1.2"));
        assert_eq!(
            seen.context.get("previous_section_titles"),
            Some(&serde_json::json!(["Rain"]))
        );
        assert_eq!(seen.context.get("max_words"), Some(&serde_json::json!(50)));
    }

    #[tokio::test]
    async fn test_fallback_cleaning_without_tags() {
        let provider = ScriptedProvider::texts(&[
            "<zero>draft</zero>\n## Springs\n\nWater rises.\nHANDOFF: Gustave\nConsensus: False",
            "<gustave>agreed</gustave>\n## Springs\n\nWater rises from below.\nConsensus: True",
        ]);
        let request = SectionRequest::new("Rivers", "1.2", "Springs");

        let outcome = generator(&provider).generate(&request).await;

        assert_eq!(outcome.value.content, "## Springs\n\nWater rises from below.");
        assert_eq!(outcome.attempts, 2);
        assert!(!provider.contexts()[0].contains_key("parent_title"));
    }
}
