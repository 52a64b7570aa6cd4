//! Collaboration use case
//!
//! Drives the turn loop: agents take turns answering the shared history
//! until one of them agrees, the turn budget runs out, or the provider keeps
//! failing.
//!
//! ```text
//! ┌──────────┐   seed    ┌───────────────────────────────────────────┐
//! │  caller  │ ────────▶ │ turn k: agent[i] ── provider ── process    │
//! └──────────┘           │   consensus? ──▶ CONSENSUS_REACHED         │
//!                        │   else merge metadata, i = next(i), k += 1 │
//!                        │   error? retry same turn (≤ N failures)    │
//!                        └───────────────────────────────────────────┘
//!                              budget / failures exhausted
//!                                 │
//!                     forcing on ─┴─ forcing off
//!                  FORCED_CONSENSUS   NO CONSENSUS
//! ```

use crate::config::CollaborationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{CollaborationProgress, NoProgress};
use crate::ports::provider::{ProviderAdapter, ProviderError, ProviderRegistry, ProviderRequest};
use saloon_domain::core::string::preview;
use saloon_domain::{
    Agent, CollaborationResult, ConsensusDetector, ContextVariables, DomainError, HandoffManager,
    Message, ProcessedResponse,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that can occur when assembling or starting a collaboration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaborationError {
    #[error(transparent)]
    Configuration(#[from] DomainError),
}

/// Input for one collaboration run
#[derive(Debug, Clone)]
pub struct CollaborationInput {
    /// First user message of the history
    pub seed: String,
    /// Initial blackboard state
    pub context: ContextVariables,
    pub starting_agent_index: usize,
    /// Name used in logs and progress output (e.g. "title", "section 1.2")
    pub label: String,
}

impl CollaborationInput {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            context: ContextVariables::new(),
            starting_agent_index: 0,
            label: "collaboration".to_string(),
        }
    }

    pub fn with_context(mut self, context: ContextVariables) -> Self {
        self.context = context;
        self
    }

    pub fn starting_at(mut self, index: usize) -> Self {
        self.starting_agent_index = index;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Turn-based coordinator for one roster of agents.
///
/// Provider ids are resolved when the coordinator is built, so a run never
/// starts with an agent it cannot call. One coordinator runs one collaboration
/// at a time; clone it to run several concurrently.
#[derive(Clone)]
pub struct CollaborationCoordinator {
    agents: Vec<Agent>,
    providers: Vec<Arc<dyn ProviderAdapter>>,
    params: CollaborationParams,
    detector: ConsensusDetector,
    handoffs: HandoffManager,
    progress: Arc<dyn CollaborationProgress>,
    logger: Arc<dyn ConversationLogger>,
}

impl CollaborationCoordinator {
    /// Build a coordinator; fails with a configuration error when fewer than
    /// two agents are given or an agent's provider id is not registered.
    pub fn new(
        agents: Vec<Agent>,
        registry: &ProviderRegistry,
        params: CollaborationParams,
    ) -> Result<Self, CollaborationError> {
        if agents.len() < 2 {
            return Err(DomainError::NotEnoughAgents {
                found: agents.len(),
            }
            .into());
        }

        let providers = agents
            .iter()
            .map(|agent| {
                registry
                    .get(&agent.provider)
                    .ok_or_else(|| DomainError::UnknownProvider {
                        agent: agent.name.clone(),
                        provider: agent.provider.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut detector = ConsensusDetector::new(params.similarity_threshold);
        if let Some(required) = &params.required_agents {
            detector = detector.with_required_agents(required.clone());
        }

        let handoffs = HandoffManager::new(agents.iter().map(|a| a.name.clone()).collect());

        Ok(Self {
            agents,
            providers,
            params,
            detector,
            handoffs,
            progress: Arc::new(NoProgress),
            logger: Arc::new(NoConversationLogger),
        })
    }

    pub fn with_progress(mut self, progress: Arc<dyn CollaborationProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn params(&self) -> &CollaborationParams {
        &self.params
    }

    /// Run one collaboration to completion.
    ///
    /// Only an out-of-range starting index is reported as an error; provider
    /// failures end up in the result.
    pub async fn run(
        &mut self,
        input: CollaborationInput,
    ) -> Result<CollaborationResult, CollaborationError> {
        let agent_count = self.agents.len();
        if input.starting_agent_index >= agent_count {
            return Err(DomainError::InvalidStartingAgent {
                index: input.starting_agent_index,
                count: agent_count,
            }
            .into());
        }

        let label = input.label;
        let max_turns = self.params.max_turns;
        info!(
            "Starting collaboration '{}' with {} agents (max {} turns)",
            label, agent_count, max_turns
        );
        self.progress.on_run_start(&label, &self.agents, max_turns);
        self.logger.log(ConversationEvent::new(
            "run_started",
            json!({
                "label": label,
                "agents": self.agents.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
                "max_turns": max_turns,
                "seed": input.seed,
            }),
        ));

        self.detector.reset();
        let participants: Vec<String> = self.agents.iter().map(|a| a.name.clone()).collect();

        let mut messages = vec![Message::user(input.seed)];
        let mut context = input.context;
        let mut index = input.starting_agent_index;
        let mut turn_count = 0;
        let mut consecutive_failures = 0;
        let mut aborted = false;
        let mut spoken_contents: Vec<String> = Vec::new();
        let mut spoken_agents: Vec<String> = Vec::new();

        while turn_count < max_turns {
            let agent = self.agents[index].clone();
            let turn = turn_count + 1;
            debug!(turn, agent = %agent.name, "Turn started");
            self.progress.on_turn_start(&label, turn, &agent);

            match self.call_provider(index, &messages, &context).await {
                Ok(raw) => {
                    let processed = agent.process_response(&raw);
                    messages.push(Message::assistant(raw.as_str()));

                    let consensus = self.turn_consensus(
                        &processed,
                        &spoken_contents,
                        &spoken_agents,
                        &participants,
                    );

                    self.logger.log(ConversationEvent::new(
                        "agent_turn",
                        json!({
                            "label": label,
                            "turn": turn,
                            "agent": agent.name,
                            "model": agent.model,
                            "provider": agent.provider,
                            "consensus": consensus,
                            "content": raw,
                        }),
                    ));
                    self.progress
                        .on_turn_complete(&label, turn, &agent, &processed);

                    if consensus {
                        info!(
                            "Consensus reached in '{}' by {} after {} turns",
                            label, agent.name, turn
                        );
                        self.logger.log(ConversationEvent::new(
                            "consensus_reached",
                            json!({ "label": label, "turns": turn, "agent": agent.name }),
                        ));
                        let result = CollaborationResult {
                            consensus: true,
                            forced_consensus: false,
                            metadata: processed.metadata(),
                            content: Some(processed.content),
                            turns: turn,
                            messages,
                            aborted: false,
                        };
                        self.progress.on_run_complete(&label, &result);
                        return Ok(result);
                    }

                    context.merge(&processed.metadata());
                    spoken_agents.push(agent.name.clone());
                    spoken_contents.push(processed.content);

                    index = self.params.turn_strategy.next_index(
                        &self.handoffs,
                        index,
                        &raw,
                        &mut context,
                    );
                    turn_count += 1;
                    consecutive_failures = 0;
                }
                Err(err) => {
                    consecutive_failures += 1;
                    warn!(
                        turn,
                        agent = %agent.name,
                        attempt = consecutive_failures,
                        error = %err,
                        "Provider call failed"
                    );
                    self.progress
                        .on_turn_failed(&label, turn, &agent, &err, consecutive_failures);
                    self.logger.log(ConversationEvent::new(
                        "turn_failed",
                        json!({
                            "label": label,
                            "turn": turn,
                            "agent": agent.name,
                            "attempt": consecutive_failures,
                            "error_kind": err.kind(),
                            "error": err.to_string(),
                        }),
                    ));

                    let permanent = self.params.abort_on_permanent_error && !err.is_transient();
                    if consecutive_failures >= self.params.max_consecutive_failures || permanent {
                        error!(
                            "Aborting '{}' after {} consecutive failures: {}",
                            label, consecutive_failures, err
                        );
                        self.logger.log(ConversationEvent::new(
                            "run_failed",
                            json!({
                                "label": label,
                                "turns": turn_count,
                                "failures": consecutive_failures,
                                "error": err.to_string(),
                            }),
                        ));
                        aborted = true;
                        break;
                    }

                    tokio::time::sleep(self.params.retry_backoff).await;
                }
            }
        }

        let result = if self.params.force_consensus {
            let content = self.forced_content(&messages);
            warn!("Forcing consensus in '{}' after {} turns", label, turn_count);
            self.logger.log(ConversationEvent::new(
                "forced_consensus",
                json!({
                    "label": label,
                    "turns": turn_count,
                    "aborted": aborted,
                    "has_content": content.is_some(),
                }),
            ));
            CollaborationResult {
                consensus: true,
                forced_consensus: true,
                content,
                turns: turn_count,
                messages,
                metadata: context,
                aborted,
            }
        } else {
            warn!("No consensus in '{}' after {} turns", label, turn_count);
            CollaborationResult {
                consensus: false,
                forced_consensus: false,
                content: None,
                turns: turn_count,
                messages,
                metadata: context,
                aborted,
            }
        };

        self.progress.on_run_complete(&label, &result);
        Ok(result)
    }

    async fn call_provider(
        &self,
        index: usize,
        messages: &[Message],
        context: &ContextVariables,
    ) -> Result<String, ProviderError> {
        let agent = &self.agents[index];
        let request = ProviderRequest {
            instructions: &agent.instructions,
            messages,
            temperature: self.params.temperature,
            context,
            model: &agent.model,
        };

        let call = self.providers[index].complete(request);
        let response = match self.params.provider_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| ProviderError::Timeout)??,
            None => call.await?,
        };

        if response.content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        debug!(
            agent = %agent.name,
            "Response: {}",
            preview(&response.content, 120)
        );
        Ok(response.content)
    }

    /// Whether this turn ends the run.
    ///
    /// An explicit marker always does. With implicit detection enabled, a
    /// turn that nearly repeats the previous one does too, once every
    /// required agent counts as agreed.
    fn turn_consensus(
        &mut self,
        processed: &ProcessedResponse,
        spoken_contents: &[String],
        spoken_agents: &[String],
        participants: &[String],
    ) -> bool {
        if !self.params.detect_implicit_consensus {
            return self
                .detector
                .check_explicit(&processed.agent_name, &processed.raw_response);
        }

        let analysis = self.detector.analyze_response(
            &processed.agent_name,
            &processed.content,
            spoken_contents,
            spoken_agents,
        );
        processed.consensus
            || (analysis.implicit_consensus && self.detector.is_consensus_reached(participants))
    }

    /// Content of the last assistant message, as the first agent whose
    /// processing leaves non-empty text sees it. Falls back to the raw
    /// message when every policy strips it bare.
    fn forced_content(&self, messages: &[Message]) -> Option<String> {
        let message = messages.iter().rev().find(|m| m.is_assistant())?;
        self.agents
            .iter()
            .map(|agent| agent.process_response(&message.content).content)
            .find(|content| !content.is_empty())
            .or_else(|| {
                let raw = message.content.trim();
                (!raw.is_empty()).then(|| raw.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedProvider, agent, agents, fast_params, registry};
    use saloon_domain::{ResponsePolicy, TurnStrategy};
    use std::sync::Mutex;

    fn coordinator(
        provider: &Arc<ScriptedProvider>,
        params: CollaborationParams,
    ) -> CollaborationCoordinator {
        CollaborationCoordinator::new(agents(), &registry(provider), params).unwrap()
    }

    #[tokio::test]
    async fn test_explicit_consensus_turn_count() {
        let provider = ScriptedProvider::texts(&[
            "First idea\nConsensus: False",
            "Refined idea\nHANDOFF: Zero\nConsensus: True",
        ]);
        let mut coordinator = coordinator(&provider, fast_params());

        let result = coordinator
            .run(CollaborationInput::new("Let's go"))
            .await
            .unwrap();

        assert!(result.consensus);
        assert!(!result.forced_consensus);
        assert_eq!(result.turns, 2);
        // Gustave (second agent) preserves markers
        assert_eq!(
            result.content.as_deref(),
            Some("Refined idea\nHANDOFF: Zero\nConsensus: True")
        );
        assert_eq!(result.messages.len(), 3);
        assert_eq!(result.messages[0], Message::user("Let's go"));
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_consensus_on_first_turn_strips_handoff() {
        let provider = ScriptedProvider::texts(&["Done.\nHANDOFF: Gustave\nConsensus: True"]);
        let mut coordinator = coordinator(&provider, fast_params());

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert_eq!(result.turns, 1);
        assert_eq!(result.content.as_deref(), Some("Done.\nConsensus: True"));
    }

    #[tokio::test]
    async fn test_forced_consensus_after_budget() {
        let provider = ScriptedProvider::texts(&[
            "one\nConsensus: False",
            "two",
            "three\nHANDOFF: Gustave\nConsensus: False",
        ]);
        let mut coordinator = coordinator(&provider, fast_params().with_max_turns(3));

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.consensus);
        assert!(result.forced_consensus);
        assert_eq!(result.turns, 3);
        // Last message processed by the first agent's policy (strip)
        assert_eq!(result.content.as_deref(), Some("three\nConsensus: False"));
        assert_eq!(result.assistant_turns(), 3);
    }

    #[tokio::test]
    async fn test_no_consensus_without_forcing() {
        let provider = ScriptedProvider::texts(&["a", "b"]);
        let mut coordinator = coordinator(
            &provider,
            fast_params().with_max_turns(2).with_force_consensus(false),
        );

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(!result.consensus);
        assert!(!result.forced_consensus);
        assert!(result.content.is_none());
        assert_eq!(result.turns, 2);
    }

    #[tokio::test]
    async fn test_retries_do_not_count_as_turns() {
        let provider = ScriptedProvider::new(vec![
            Err(ProviderError::Timeout),
            Err(ProviderError::Connection("reset".into())),
            Ok("recovered\nConsensus: True".to_string()),
        ]);
        let mut coordinator = coordinator(&provider, fast_params());

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.consensus);
        assert_eq!(result.turns, 1);
        assert_eq!(provider.calls(), 3);
        assert_eq!(result.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_three_failures_abort() {
        let provider = ScriptedProvider::new(vec![
            Ok("first".to_string()),
            Err(ProviderError::Timeout),
            Err(ProviderError::Timeout),
            Err(ProviderError::Timeout),
            Ok("never sent".to_string()),
        ]);
        let mut coordinator = coordinator(&provider, fast_params().with_force_consensus(false));

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.aborted);
        assert!(!result.consensus);
        assert_eq!(result.turns, 1);
        assert_eq!(provider.calls(), 4);
    }

    #[tokio::test]
    async fn test_abort_then_force_uses_last_message() {
        let provider = ScriptedProvider::new(vec![
            Ok("draft one".to_string()),
            Err(ProviderError::Timeout),
            Err(ProviderError::Timeout),
            Err(ProviderError::Timeout),
        ]);
        let mut coordinator = coordinator(&provider, fast_params());

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.aborted);
        assert!(result.forced_consensus);
        assert_eq!(result.turns, 1);
        assert_eq!(result.content.as_deref(), Some("draft one"));
    }

    #[tokio::test]
    async fn test_forced_content_never_skips_the_last_message() {
        let provider = ScriptedProvider::texts(&["older draft", "HANDOFF: Zero"]);
        let strippers = vec![
            agent("Zero", ResponsePolicy::StripHandoffMarkers),
            agent("Camille", ResponsePolicy::StripHandoffMarkers),
        ];
        let mut coordinator = CollaborationCoordinator::new(
            strippers,
            &registry(&provider),
            fast_params().with_max_turns(2),
        )
        .unwrap();

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.forced_consensus);
        assert_eq!(result.turns, 2);
        assert_eq!(result.content.as_deref(), Some("HANDOFF: Zero"));
    }

    #[tokio::test]
    async fn test_forced_without_any_answer_has_no_content() {
        let provider = ScriptedProvider::new(vec![
            Err(ProviderError::Timeout),
            Err(ProviderError::Timeout),
            Err(ProviderError::Timeout),
        ]);
        let mut coordinator = coordinator(&provider, fast_params());

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.forced_consensus);
        assert_eq!(result.turns, 0);
        assert!(result.content.is_none());
    }

    #[tokio::test]
    async fn test_permanent_error_aborts_when_enabled() {
        let provider = ScriptedProvider::new(vec![
            Err(ProviderError::Authentication("bad key".into())),
            Ok("unused".to_string()),
        ]);
        let mut coordinator = coordinator(
            &provider,
            fast_params()
                .with_abort_on_permanent_error(true)
                .with_force_consensus(false),
        );

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.aborted);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_whitespace_response_is_a_failure() {
        let provider = ScriptedProvider::texts(&["   \n", "real\nConsensus: True"]);
        let mut coordinator = coordinator(&provider, fast_params());

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert_eq!(result.turns, 1);
        assert_eq!(result.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_metadata_reaches_next_turn_context() {
        let provider = ScriptedProvider::texts(&[
            "Book Title: Salt and Stone\nConsensus: False",
            "Agreed\nConsensus: True",
        ]);
        let mut coordinator = coordinator(&provider, fast_params());

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        let contexts = provider.contexts();
        assert!(contexts[0].get_str("book_title").is_none());
        assert_eq!(contexts[1].get_str("book_title"), Some("Salt and Stone"));
        // Final metadata only carries the agreeing turn's own signals
        assert!(result.metadata.is_empty());
    }

    #[tokio::test]
    async fn test_request_carries_agent_settings() {
        let provider = ScriptedProvider::texts(&["x\nConsensus: True"]);
        let mut coordinator = coordinator(&provider, fast_params());

        coordinator
            .run(CollaborationInput::new("go").starting_at(1))
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests[0].model, "model-gustave");
        assert_eq!(requests[0].instructions, "You are Gustave");
        assert_eq!(requests[0].temperature, 0.7);
        assert_eq!(requests[0].message_count, 1);
    }

    #[tokio::test]
    async fn test_round_robin_wraps() {
        let provider = ScriptedProvider::texts(&["a", "b", "c", "d\nConsensus: True"]);
        let mut coordinator = coordinator(&provider, fast_params());

        coordinator.run(CollaborationInput::new("go")).await.unwrap();

        let models: Vec<_> = provider.requests().into_iter().map(|r| r.model).collect();
        assert_eq!(
            models,
            vec!["model-zero", "model-gustave", "model-zero", "model-gustave"]
        );
    }

    #[tokio::test]
    async fn test_named_handoff_strategy() {
        let provider = ScriptedProvider::texts(&[
            "draft\nHANDOFF: Camille - check it",
            "checked\nConsensus: True",
        ]);
        let roster = vec![
            agent("Zero", ResponsePolicy::StripHandoffMarkers),
            agent("Gustave", ResponsePolicy::PreserveAll),
            agent("Camille", ResponsePolicy::StripHandoffMarkers),
        ];
        let mut coordinator = CollaborationCoordinator::new(
            roster,
            &registry(&provider),
            fast_params().with_turn_strategy(TurnStrategy::NamedHandoff),
        )
        .unwrap();

        coordinator.run(CollaborationInput::new("go")).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests[1].model, "model-camille");
        assert_eq!(
            provider.contexts()[1].get_str("handoff_message"),
            Some("check it")
        );
    }

    #[tokio::test]
    async fn test_implicit_consensus_when_enabled() {
        let provider = ScriptedProvider::texts(&[
            "The Quiet Engine",
            "the quiet engine",
            "never reached",
        ]);
        let mut coordinator = coordinator(&provider, fast_params().with_implicit_consensus(true));

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.consensus);
        assert!(!result.forced_consensus);
        assert_eq!(result.turns, 2);
        assert_eq!(result.content.as_deref(), Some("the quiet engine"));
    }

    #[tokio::test]
    async fn test_implicit_consensus_disabled_by_default() {
        let provider = ScriptedProvider::texts(&["same", "same"]);
        let mut coordinator = coordinator(&provider, fast_params().with_max_turns(2));

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.forced_consensus);
    }

    #[tokio::test]
    async fn test_provider_timeout() {
        let provider = ScriptedProvider::delayed(
            &["slow", "fine\nConsensus: True"],
            std::time::Duration::from_millis(200),
        );
        let mut coordinator = coordinator(
            &provider,
            fast_params()
                .with_provider_timeout(Some(std::time::Duration::from_millis(10)))
                .with_force_consensus(false),
        );

        let result = coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert!(result.aborted);
        assert_eq!(result.turns, 0);
    }

    #[tokio::test]
    async fn test_detector_reset_between_runs() {
        let provider = ScriptedProvider::texts(&["a\nConsensus: True", "b", "c"]);
        let mut coordinator = coordinator(
            &provider,
            fast_params().with_implicit_consensus(true).with_max_turns(2),
        );

        coordinator.run(CollaborationInput::new("first")).await.unwrap();
        let second = coordinator.run(CollaborationInput::new("second")).await.unwrap();

        assert!(second.forced_consensus);
        assert_eq!(second.turns, 2);
    }

    #[test]
    fn test_not_enough_agents() {
        let provider = ScriptedProvider::texts(&[]);
        let result = CollaborationCoordinator::new(
            vec![agent("Zero", ResponsePolicy::default())],
            &registry(&provider),
            fast_params(),
        );
        assert!(matches!(
            result,
            Err(CollaborationError::Configuration(
                DomainError::NotEnoughAgents { found: 1 }
            ))
        ));
    }

    #[test]
    fn test_unknown_provider() {
        let provider = ScriptedProvider::texts(&[]);
        let roster = vec![
            agent("Zero", ResponsePolicy::default()),
            agent("Gustave", ResponsePolicy::default()).with_provider("mistral"),
        ];
        let result = CollaborationCoordinator::new(roster, &registry(&provider), fast_params());
        match result {
            Err(CollaborationError::Configuration(err)) => assert!(err.is_unknown_provider()),
            _ => panic!("expected configuration error"),
        }
    }

    #[tokio::test]
    async fn test_invalid_starting_agent() {
        let provider = ScriptedProvider::texts(&[]);
        let mut coordinator = coordinator(&provider, fast_params());
        let result = coordinator
            .run(CollaborationInput::new("go").starting_at(5))
            .await;
        assert!(matches!(
            result,
            Err(CollaborationError::Configuration(
                DomainError::InvalidStartingAgent { index: 5, count: 2 }
            ))
        ));
    }

    struct Recorder(Mutex<Vec<&'static str>>);

    impl ConversationLogger for Recorder {
        fn log(&self, event: ConversationEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    #[tokio::test]
    async fn test_transcript_events() {
        let provider = ScriptedProvider::new(vec![
            Err(ProviderError::Timeout),
            Ok("a".to_string()),
            Ok("b\nConsensus: True".to_string()),
        ]);
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let mut coordinator = coordinator(&provider, fast_params()).with_logger(recorder.clone());

        coordinator.run(CollaborationInput::new("go")).await.unwrap();

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![
                "run_started",
                "turn_failed",
                "agent_turn",
                "agent_turn",
                "consensus_reached"
            ]
        );
    }
}
