//! Consensus detection for one collaboration run.

use super::similarity::jaccard_similarity;
use crate::agent::markers::ConsensusMarker;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default similarity at which two consecutive turns count as agreement
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Combined reading of one response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsensusAnalysis {
    pub explicit_consensus: bool,
    pub implicit_consensus: bool,
    pub consensus: bool,
}

/// Tracks which agents have agreed during a run.
///
/// Agreement is either explicit (`Consensus: True` marker) or implicit (the
/// latest turn is nearly the same text as the one before it). The agreement
/// map must be [`reset`](Self::reset) at the start of every run.
#[derive(Debug, Clone)]
pub struct ConsensusDetector {
    required_agents: Option<Vec<String>>,
    threshold: f64,
    agreement_map: HashMap<String, bool>,
}

impl Default for ConsensusDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl ConsensusDetector {
    /// Create a detector; the threshold is clamped to `[0, 1]`.
    pub fn new(threshold: f64) -> Self {
        Self {
            required_agents: None,
            threshold: threshold.clamp(0.0, 1.0),
            agreement_map: HashMap::new(),
        }
    }

    /// Restrict the agents whose agreement is needed
    pub fn with_required_agents(mut self, agents: Vec<String>) -> Self {
        self.required_agents = Some(agents);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn required_agents(&self) -> Option<&[String]> {
        self.required_agents.as_deref()
    }

    /// Current agreement of an agent, if it has spoken this run
    pub fn agreement(&self, agent_name: &str) -> Option<bool> {
        self.agreement_map.get(agent_name).copied()
    }

    pub fn reset(&mut self) {
        self.agreement_map.clear();
    }

    /// Record and return whether the content carries an agreeing marker.
    pub fn check_explicit(&mut self, agent_name: &str, content: &str) -> bool {
        let agreed = ConsensusMarker::scan(content).is_agree();
        self.agreement_map.insert(agent_name.to_string(), agreed);
        agreed
    }

    /// Compare the content with the most recent previous turn.
    ///
    /// When the similarity reaches the threshold both the current agent and
    /// the agent of that previous turn are marked as agreed.
    pub fn check_implicit(
        &mut self,
        agent_name: &str,
        current_content: &str,
        previous_contents: &[String],
        previous_agent_names: &[String],
    ) -> bool {
        let Some(previous) = previous_contents.last() else {
            return false;
        };

        let similarity = jaccard_similarity(current_content, previous);
        if similarity < self.threshold {
            return false;
        }

        self.agreement_map.insert(agent_name.to_string(), true);
        if let Some(previous_agent) = previous_agent_names.last() {
            self.agreement_map.insert(previous_agent.clone(), true);
        }
        true
    }

    /// Whether every required agent has agreed.
    ///
    /// Uses the configured subset when present, `participants` otherwise.
    /// An empty requirement never counts as agreement.
    pub fn is_consensus_reached(&self, participants: &[String]) -> bool {
        let required = self.required_agents.as_deref().unwrap_or(participants);
        !required.is_empty()
            && required
                .iter()
                .all(|name| self.agreement_map.get(name).copied().unwrap_or(false))
    }

    /// Explicit check, then implicit check when the explicit one failed and a
    /// previous turn exists.
    pub fn analyze_response(
        &mut self,
        agent_name: &str,
        content: &str,
        previous_contents: &[String],
        previous_agent_names: &[String],
    ) -> ConsensusAnalysis {
        let explicit_consensus = self.check_explicit(agent_name, content);
        let implicit_consensus = !explicit_consensus
            && !previous_contents.is_empty()
            && self.check_implicit(agent_name, content, previous_contents, previous_agent_names);

        ConsensusAnalysis {
            explicit_consensus,
            implicit_consensus,
            consensus: explicit_consensus || implicit_consensus,
        }
    }
}
