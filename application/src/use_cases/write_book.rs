//! Write Book use case
//!
//! Chains the three generators into a full draft:
//!
//! ```text
//! topic ──▶ TitleGenerator ──▶ TocGenerator ──▶ SectionGenerator × N ──▶ BookDraft
//!            (skipped when       (skipped when     (bounded fan-out,
//!             a title is given)   an outline is     results reordered
//!                                 given)            by section id)
//! ```

use super::generate::{
    GenerationOutcome, SectionContent, SectionGenerator, SectionRequest, TitleGenerator,
    TocGenerator,
};
use crate::config::{CollaborationParams, GenerationConfig};
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::progress::CollaborationProgress;
use crate::ports::provider::ProviderRegistry;
use crate::use_cases::collaborate::CollaborationError;
use saloon_domain::outline::compare_section_ids;
use saloon_domain::{Agent, Outline};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Agent rosters per generation task
#[derive(Debug, Clone)]
pub struct BookAgents {
    pub title: Vec<Agent>,
    pub toc: Vec<Agent>,
    pub section: Vec<Agent>,
}

impl BookAgents {
    /// Use the same roster for every task
    pub fn uniform(agents: Vec<Agent>) -> Self {
        Self {
            title: agents.clone(),
            toc: agents.clone(),
            section: agents,
        }
    }
}

/// Input for the WriteBook use case
#[derive(Debug, Clone, Default)]
pub struct WriteBookInput {
    pub topic: String,
    /// Use this title instead of generating one
    pub title: Option<String>,
    /// Use this outline instead of generating one
    pub outline: Option<Outline>,
    /// Only write these entries (all when `None`)
    pub section_ids: Option<Vec<String>>,
}

impl WriteBookInput {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn only_sections(mut self, ids: Vec<String>) -> Self {
        self.section_ids = Some(ids);
        self
    }
}

/// One written outline entry
#[derive(Debug, Clone, Serialize)]
pub struct DraftSection {
    pub id: String,
    pub title: String,
    /// 1 = chapter, 2 = section, 3 = subsection
    pub level: usize,
    pub content: String,
    pub word_count: usize,
    pub success: bool,
    pub attempts: usize,
    pub duration_ms: u64,
}

impl DraftSection {
    fn from_outcome(
        request: &SectionRequest,
        level: usize,
        outcome: GenerationOutcome<SectionContent>,
    ) -> Self {
        Self {
            id: request.section_id.clone(),
            title: request.section_title.clone(),
            level,
            content: outcome.value.content,
            word_count: outcome.value.word_count,
            success: outcome.success,
            attempts: outcome.attempts,
            duration_ms: outcome.duration_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookDraft {
    pub topic: String,
    pub title: String,
    pub outline: Outline,
    /// Written entries in section-id order
    pub sections: Vec<DraftSection>,
}

impl BookDraft {
    pub fn total_words(&self) -> usize {
        self.sections.iter().map(|s| s.word_count).sum()
    }

    /// Ids of entries whose run did not reach consensus
    pub fn failed_sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| !s.success)
            .map(|s| s.id.as_str())
            .collect()
    }
}

/// Requests for every outline entry, in id order.
///
/// Chapters get no previous titles; sections and subsections get the
/// titles of their earlier siblings. `only` restricts the entries.
pub fn section_requests(
    book_title: &str,
    outline: &Outline,
    only: Option<&[String]>,
) -> Vec<(SectionRequest, usize)> {
    outline
        .entries()
        .into_iter()
        .filter(|entry| only.is_none_or(|ids| ids.iter().any(|id| id.trim() == entry.id)))
        .map(|entry| {
            let previous = if entry.level == 1 {
                Vec::new()
            } else {
                outline.previous_sibling_titles(&entry.id)
            };
            let mut request =
                SectionRequest::new(book_title, entry.id.as_str(), entry.title.as_str())
                    .with_previous(previous);
            if let Some(parent) = entry.parent_title {
                request = request.with_parent(parent);
            }
            (request, entry.level)
        })
        .collect()
}

/// Use case for drafting a whole book
pub struct WriteBookUseCase {
    title: TitleGenerator,
    toc: TocGenerator,
    section: SectionGenerator,
    max_parallel_sections: usize,
}

impl WriteBookUseCase {
    pub fn new(
        agents: BookAgents,
        registry: &ProviderRegistry,
        params: CollaborationParams,
        config: &GenerationConfig,
    ) -> Result<Self, CollaborationError> {
        Ok(Self {
            title: TitleGenerator::new(agents.title, registry, params.clone(), &config.title)?,
            toc: TocGenerator::new(agents.toc, registry, params.clone(), &config.toc)?,
            section: SectionGenerator::new(agents.section, registry, params, &config.section)?,
            max_parallel_sections: config.max_parallel_sections.max(1),
        })
    }

    pub fn with_progress(self, progress: Arc<dyn CollaborationProgress>) -> Self {
        Self {
            title: self.title.with_progress(progress.clone()),
            toc: self.toc.with_progress(progress.clone()),
            section: self.section.with_progress(progress),
            max_parallel_sections: self.max_parallel_sections,
        }
    }

    pub fn with_logger(self, logger: Arc<dyn ConversationLogger>) -> Self {
        Self {
            title: self.title.with_logger(logger.clone()),
            toc: self.toc.with_logger(logger.clone()),
            section: self.section.with_logger(logger),
            max_parallel_sections: self.max_parallel_sections,
        }
    }

    pub async fn execute(&self, input: WriteBookInput) -> BookDraft {
        info!("Writing book about: {}", input.topic);

        let title = match input.title {
            Some(title) => title,
            None => self.title.generate(&input.topic).await.value,
        };

        let outline = match input.outline {
            Some(outline) => outline,
            None => self.toc.generate(&title, &input.topic).await.value,
        };

        let requests = section_requests(&title, &outline, input.section_ids.as_deref());
        if let Some(ids) = &input.section_ids {
            for id in ids {
                if outline.entry(id).is_none() {
                    warn!("Section {} is not in the outline, skipping", id);
                }
            }
        }
        info!(
            "Writing {} sections ({} at a time)",
            requests.len(),
            self.max_parallel_sections
        );

        let sections = self.write_sections(requests).await;

        let draft = BookDraft {
            topic: input.topic,
            title,
            outline,
            sections,
        };
        info!(
            "Book draft complete: {} sections, {} words",
            draft.sections.len(),
            draft.total_words()
        );
        draft
    }

    async fn write_sections(&self, requests: Vec<(SectionRequest, usize)>) -> Vec<DraftSection> {
        let permits = Arc::new(Semaphore::new(self.max_parallel_sections));
        let mut join_set = JoinSet::new();

        for (request, level) in requests {
            let generator = self.section.clone();
            let permits = Arc::clone(&permits);

            join_set.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let outcome = generator.generate(&request).await;
                DraftSection::from_outcome(&request, level, outcome)
            });
        }

        let mut sections = Vec::new();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok(section) => {
                    if !section.success {
                        warn!("Section {} finished without consensus", section.id);
                    }
                    sections.push(section);
                }
                Err(e) => {
                    warn!("Section task join error: {}", e);
                }
            }
        }

        sections.sort_by(|a, b| compare_section_ids(&a.id, &b.id));
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{RecordedRequest, ReplyProvider, agents, fast_params, registry};
    use saloon_domain::{Chapter, Section};

    fn reply(request: &RecordedRequest) -> String {
        if request.last_message.contains("table of contents") {
            r#"<content>[
                {"title": "Shore", "sections": ["Sand", "Rocks"]},
                {"title": "Deep", "sections": ["Dark"]}
            ]</content>
Consensus: True"#
                .to_string()
        } else if request.last_message.contains("title for a book") {
            "Book Title: Tidal Notes\nConsensus: True".to_string()
        } else {
            format!(
                "<content>Words about {}.</content>\nConsensus: True",
                request.context.get_str("section_title").unwrap_or("nothing")
            )
        }
    }

    fn use_case(provider: &Arc<ReplyProvider>, parallel: usize) -> WriteBookUseCase {
        let config = GenerationConfig::default()
            .with_chapters(2, 4)
            .with_words(1, 100)
            .with_max_parallel_sections(parallel);
        WriteBookUseCase::new(
            BookAgents::uniform(agents()),
            &registry(provider),
            fast_params(),
            &config,
        )
        .unwrap()
    }

    fn outline() -> Outline {
        Outline::new(vec![
            Chapter::new("Shore")
                .with_section(Section::new("Sand"))
                .with_section(Section::new("Rocks").with_subsection("Pools")),
            Chapter::new("Deep").with_section(Section::new("Dark")),
        ])
    }

    #[tokio::test]
    async fn test_full_book() {
        let provider = ReplyProvider::new(reply);
        let draft = use_case(&provider, 1).execute(WriteBookInput::new("the sea")).await;

        assert_eq!(draft.title, "Tidal Notes");
        assert_eq!(draft.outline.len(), 2);
        let ids: Vec<&str> = draft.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "1.1", "1.2", "2", "2.1"]);
        assert_eq!(draft.sections[1].content, "# Sand\n\nWords about Sand.");
        assert!(draft.failed_sections().is_empty());
        assert_eq!(draft.total_words(), 5 * 5);
        assert_eq!(provider.calls(), 7);
    }

    #[tokio::test]
    async fn test_parallel_sections_keep_order() {
        let provider = ReplyProvider::new(reply);
        let input = WriteBookInput::new("the sea")
            .with_title("Given")
            .with_outline(outline());
        let draft = use_case(&provider, 3).execute(input).await;

        let ids: Vec<&str> = draft.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "1.1", "1.2", "1.2.1", "2", "2.1"]);
        assert_eq!(draft.title, "Given");
        assert_eq!(draft.sections[3].level, 3);
        assert_eq!(provider.calls(), 6);
    }

    #[tokio::test]
    async fn test_section_filter() {
        let provider = ReplyProvider::new(reply);
        let input = WriteBookInput::new("the sea")
            .with_title("Given")
            .with_outline(outline())
            .only_sections(vec!["2.1".to_string(), "1.2".to_string(), "9".to_string()]);
        let draft = use_case(&provider, 2).execute(input).await;

        let ids: Vec<&str> = draft.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1.2", "2.1"]);
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_section_requests_context() {
        let requests = section_requests("Book", &outline(), None);

        let (chapter, level) = &requests[0];
        assert_eq!(*level, 1);
        assert!(chapter.parent_title.is_none());
        assert!(chapter.previous_section_titles.is_empty());

        let (rocks, _) = &requests[2];
        assert_eq!(rocks.section_id, "1.2");
        assert_eq!(rocks.parent_title.as_deref(), Some("Shore"));
        assert_eq!(rocks.previous_section_titles, vec!["Sand".to_string()]);

        let (pools, level) = &requests[3];
        assert_eq!(*level, 3);
        assert_eq!(pools.parent_title.as_deref(), Some("Rocks"));

        let (deep, _) = &requests[4];
        assert!(deep.previous_section_titles.is_empty());
    }
}
