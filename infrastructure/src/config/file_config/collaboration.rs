//! Collaboration configuration from TOML (`[collaboration]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use saloon_application::config::CollaborationParams;
use saloon_domain::TurnStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw turn loop configuration from TOML
///
/// # Example
///
/// ```toml
/// [collaboration]
/// temperature = 0.7
/// max_consecutive_failures = 3
/// retry_backoff_ms = 1000
/// provider_timeout_secs = 120      # unset waits indefinitely
/// detect_implicit_consensus = false
/// similarity_threshold = 0.8
/// required_agents = ["Zero", "Gustave"]
/// turn_strategy = "round_robin"    # "round_robin" or "named_handoff"
/// abort_on_permanent_error = false
/// ```
///
/// Turn budgets and forcing are per task, in `[generation]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCollaborationConfig {
    pub temperature: f32,
    pub max_consecutive_failures: usize,
    pub retry_backoff_ms: u64,
    pub provider_timeout_secs: Option<u64>,
    pub detect_implicit_consensus: bool,
    pub similarity_threshold: f64,
    pub required_agents: Option<Vec<String>>,
    pub turn_strategy: String,
    pub abort_on_permanent_error: bool,
}

impl Default for FileCollaborationConfig {
    fn default() -> Self {
        let params = CollaborationParams::default();
        Self {
            temperature: params.temperature,
            max_consecutive_failures: params.max_consecutive_failures,
            retry_backoff_ms: params.retry_backoff.as_millis() as u64,
            provider_timeout_secs: None,
            detect_implicit_consensus: params.detect_implicit_consensus,
            similarity_threshold: params.similarity_threshold,
            required_agents: None,
            turn_strategy: params.turn_strategy.as_str().to_string(),
            abort_on_permanent_error: params.abort_on_permanent_error,
        }
    }
}

impl FileCollaborationConfig {
    /// Parse turn_strategy, falling back to round robin with a warning.
    pub fn parse_turn_strategy(&self) -> (TurnStrategy, Vec<ConfigIssue>) {
        match self.turn_strategy.parse::<TurnStrategy>() {
            Ok(strategy) => (strategy, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "collaboration.turn_strategy".to_string(),
                        value: self.turn_strategy.clone(),
                        valid_values: vec![
                            "round_robin".to_string(),
                            "named_handoff".to_string(),
                        ],
                    },
                    format!(
                        "collaboration.turn_strategy: unknown value '{}', falling back to 'round_robin'",
                        self.turn_strategy
                    ),
                );
                (TurnStrategy::default(), vec![issue])
            }
        }
    }

    /// Convert to turn loop parameters, reporting out-of-range values.
    pub fn to_params(&self) -> (CollaborationParams, Vec<ConfigIssue>) {
        let (strategy, mut issues) = self.parse_turn_strategy();
        let defaults = CollaborationParams::default();

        let temperature = if (0.0..=2.0).contains(&self.temperature) {
            self.temperature
        } else {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "collaboration.temperature".to_string(),
                },
                format!(
                    "collaboration.temperature: {} is outside 0.0-2.0, using {}",
                    self.temperature, defaults.temperature
                ),
            ));
            defaults.temperature
        };

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "collaboration.similarity_threshold".to_string(),
                },
                format!(
                    "collaboration.similarity_threshold: {} is clamped to 0.0-1.0",
                    self.similarity_threshold
                ),
            ));
        }

        let max_failures = if self.max_consecutive_failures == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "collaboration.max_consecutive_failures".to_string(),
                },
                "collaboration.max_consecutive_failures cannot be 0, using 1",
            ));
            1
        } else {
            self.max_consecutive_failures
        };

        let mut params = defaults
            .with_temperature(temperature)
            .with_max_consecutive_failures(max_failures)
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
            .with_provider_timeout(self.provider_timeout_secs.map(Duration::from_secs))
            .with_implicit_consensus(self.detect_implicit_consensus)
            .with_similarity_threshold(self.similarity_threshold.clamp(0.0, 1.0))
            .with_turn_strategy(strategy)
            .with_abort_on_permanent_error(self.abort_on_permanent_error);
        params.required_agents = self.required_agents.clone();

        (params, issues)
    }
}
