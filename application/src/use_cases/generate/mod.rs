//! Generator use cases
//!
//! Each generator builds a seed prompt and initial context, drives one
//! collaboration run, and extracts a validated value from its content:
//!
//! | Generator | Value |
//! |-----------|-------|
//! | [`TitleGenerator`] | title string |
//! | [`TocGenerator`] | chapter → section → subsection [`Outline`](saloon_domain::Outline) |
//! | [`SectionGenerator`] | cleaned section prose |
//!
//! Generators never fail once built: terminal failures are reported through
//! [`GenerationOutcome::success`].

pub mod section;
pub mod title;
pub mod toc;

pub use section::{SectionContent, SectionGenerator, SectionRequest};
pub use title::TitleGenerator;
pub use toc::TocGenerator;

use crate::config::CollaborationParams;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::progress::CollaborationProgress;
use crate::ports::provider::ProviderRegistry;
use crate::use_cases::collaborate::{
    CollaborationCoordinator, CollaborationError, CollaborationInput,
};
use saloon_domain::{Agent, CollaborationResult, ContextVariables, Message};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Result of one generator call
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome<T> {
    /// Extracted value (fallbacks applied)
    pub value: T,
    /// Consensus was reached and the run was not aborted
    pub success: bool,
    pub consensus: bool,
    pub forced_consensus: bool,
    /// Completed turns of the run
    pub attempts: usize,
    pub duration_ms: u64,
    #[serde(skip)]
    pub messages: Vec<Message>,
    pub metadata: ContextVariables,
}

impl<T> GenerationOutcome<T> {
    fn from_result(value: T, result: CollaborationResult, duration_ms: u64) -> Self {
        Self {
            value,
            success: result.consensus && !result.aborted,
            consensus: result.consensus,
            forced_consensus: result.forced_consensus,
            attempts: result.turns,
            duration_ms,
            messages: result.messages,
            metadata: result.metadata,
        }
    }

    fn failed(value: T, duration_ms: u64) -> Self {
        Self {
            value,
            success: false,
            consensus: false,
            forced_consensus: false,
            attempts: 0,
            duration_ms,
            messages: Vec::new(),
            metadata: ContextVariables::new(),
        }
    }

    /// Replace the value, keeping the run statistics
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GenerationOutcome<U> {
        GenerationOutcome {
            value: f(self.value),
            success: self.success,
            consensus: self.consensus,
            forced_consensus: self.forced_consensus,
            attempts: self.attempts,
            duration_ms: self.duration_ms,
            messages: self.messages,
            metadata: self.metadata,
        }
    }
}

/// A validated coordinator shared by a generator's runs.
///
/// Every run clones the prototype, so concurrent runs never share history,
/// context or consensus state.
#[derive(Clone)]
pub(crate) struct GenerationRunner {
    prototype: CollaborationCoordinator,
}

impl GenerationRunner {
    pub(crate) fn new(
        agents: Vec<Agent>,
        registry: &ProviderRegistry,
        params: CollaborationParams,
    ) -> Result<Self, CollaborationError> {
        Ok(Self {
            prototype: CollaborationCoordinator::new(agents, registry, params)?,
        })
    }

    pub(crate) fn set_progress(&mut self, progress: Arc<dyn CollaborationProgress>) {
        self.prototype = self.prototype.clone().with_progress(progress);
    }

    pub(crate) fn set_logger(&mut self, logger: Arc<dyn ConversationLogger>) {
        self.prototype = self.prototype.clone().with_logger(logger);
    }

    /// Run one collaboration and extract a value from its content.
    ///
    /// `extract` receives the run's content (empty when there is none) and
    /// metadata; `fallback` supplies the value when the run could not start.
    pub(crate) async fn generate<T>(
        &self,
        input: CollaborationInput,
        extract: impl FnOnce(&str, &ContextVariables) -> T,
        fallback: impl FnOnce() -> T,
    ) -> GenerationOutcome<T> {
        let label = input.label.clone();
        let started = Instant::now();
        let mut coordinator = self.prototype.clone();
        let result = coordinator.run(input).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(result) => {
                if result.forced_consensus {
                    warn!(
                        "Forced consensus for {} after {} turns",
                        label, result.turns
                    );
                } else if result.consensus {
                    info!("Consensus reached for {} after {} turns", label, result.turns);
                } else {
                    error!(
                        "Failed to reach consensus for {} after {} turns",
                        label, result.turns
                    );
                }
                info!(duration_ms, "Generation of {} completed", label);

                let value = extract(result.content_str(), &result.metadata);
                GenerationOutcome::from_result(value, result, duration_ms)
            }
            Err(e) => {
                error!("Generation of {} could not start: {}", label, e);
                GenerationOutcome::failed(fallback(), duration_ms)
            }
        }
    }
}
