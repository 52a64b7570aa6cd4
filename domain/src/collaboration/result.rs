//! Outcome of one collaboration run.

use super::context::ContextVariables;
use crate::session::entities::Message;
use serde::{Deserialize, Serialize};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// An agent (or two matching turns) agreed
    ConsensusReached,
    /// The turn budget or failure limit ran out and agreement was forced
    ForcedConsensus,
    /// No agreement and forcing was disabled
    NoConsensus,
}

/// Immutable record produced once per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationResult {
    pub consensus: bool,
    pub forced_consensus: bool,
    /// Cleaned content of the agreeing (or last) turn; `None` without consensus
    pub content: Option<String>,
    /// Completed turns; retried attempts are not counted
    pub turns: usize,
    /// Full history, seed message first, raw assistant text after
    pub messages: Vec<Message>,
    /// Extracted signals of the final turn, or the run's context when forced
    pub metadata: ContextVariables,
    /// The run stopped because of consecutive provider failures
    #[serde(default)]
    pub aborted: bool,
}

impl CollaborationResult {
    pub fn outcome(&self) -> RunOutcome {
        match (self.consensus, self.forced_consensus) {
            (true, false) => RunOutcome::ConsensusReached,
            (true, true) => RunOutcome::ForcedConsensus,
            _ => RunOutcome::NoConsensus,
        }
    }

    /// Content, or an empty string when the run produced none
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Number of assistant messages in the history
    pub fn assistant_turns(&self) -> usize {
        self.messages.iter().filter(|m| m.is_assistant()).count()
    }
}
