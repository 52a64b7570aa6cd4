//! Collaboration parameters: turn loop control.
//!
//! [`CollaborationParams`] groups the static parameters that control the
//! turn loop in [`CollaborationCoordinator`](crate::use_cases::collaborate::CollaborationCoordinator).
//! Generators override `max_turns` and `force_consensus` per task.

use saloon_domain::TurnStrategy;
use saloon_domain::consensus::DEFAULT_SIMILARITY_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Temperature used for every provider call unless configured otherwise
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Turn loop control parameters.
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `max_turns` | 10 |
/// | `force_consensus` | true |
/// | `temperature` | 0.7 |
/// | `max_consecutive_failures` | 3 |
/// | `retry_backoff` | 1 s |
/// | `provider_timeout` | none |
/// | `detect_implicit_consensus` | false |
/// | `similarity_threshold` | 0.8 |
/// | `turn_strategy` | round robin |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationParams {
    /// Completed turns after which the run stops.
    pub max_turns: usize,
    /// Take the last turn as the result when the budget runs out.
    pub force_consensus: bool,
    pub temperature: f32,
    /// Consecutive provider failures that abort the run.
    pub max_consecutive_failures: usize,
    /// Pause before retrying a failed turn.
    pub retry_backoff: Duration,
    /// Upper bound for one provider call; `None` waits indefinitely.
    pub provider_timeout: Option<Duration>,
    /// Also end the run when two consecutive turns are nearly identical.
    pub detect_implicit_consensus: bool,
    pub similarity_threshold: f64,
    /// Agents whose agreement implicit consensus needs; `None` means all.
    pub required_agents: Option<Vec<String>>,
    pub turn_strategy: TurnStrategy,
    /// Abort immediately on errors that a retry cannot fix.
    pub abort_on_permanent_error: bool,
}

impl Default for CollaborationParams {
    fn default() -> Self {
        Self {
            max_turns: 10,
            force_consensus: true,
            temperature: DEFAULT_TEMPERATURE,
            max_consecutive_failures: 3,
            retry_backoff: Duration::from_secs(1),
            provider_timeout: None,
            detect_implicit_consensus: false,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            required_agents: None,
            turn_strategy: TurnStrategy::RoundRobin,
            abort_on_permanent_error: false,
        }
    }
}

impl CollaborationParams {
    // ==================== Builder Methods ====================

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_force_consensus(mut self, force: bool) -> Self {
        self.force_consensus = force;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_consecutive_failures(mut self, max: usize) -> Self {
        self.max_consecutive_failures = max;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_implicit_consensus(mut self, enabled: bool) -> Self {
        self.detect_implicit_consensus = enabled;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_required_agents(mut self, agents: Vec<String>) -> Self {
        self.required_agents = Some(agents);
        self
    }

    pub fn with_turn_strategy(mut self, strategy: TurnStrategy) -> Self {
        self.turn_strategy = strategy;
        self
    }

    pub fn with_abort_on_permanent_error(mut self, abort: bool) -> Self {
        self.abort_on_permanent_error = abort;
        self
    }
}
