//! Next-speaker selection.

use super::context::ContextVariables;
use super::handoff::{Handoff, HandoffManager};
use serde::{Deserialize, Serialize};

/// How the coordinator picks the agent for the next turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStrategy {
    /// Strict rotation through the roster
    #[default]
    RoundRobin,
    /// Follow `HANDOFF: <Agent>` lines, rotating when none resolves
    NamedHandoff,
}

impl TurnStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnStrategy::RoundRobin => "round_robin",
            TurnStrategy::NamedHandoff => "named_handoff",
        }
    }

    /// Index of the next speaker after a completed turn.
    pub fn next_index(
        &self,
        handoffs: &HandoffManager,
        current: usize,
        raw_response: &str,
        context: &mut ContextVariables,
    ) -> usize {
        match self {
            TurnStrategy::RoundRobin => handoffs.round_robin(current),
            TurnStrategy::NamedHandoff => match Handoff::parse(raw_response) {
                Some(handoff) => handoffs.resolve(&handoff, current, context),
                None => handoffs.round_robin(current),
            },
        }
    }
}

impl std::fmt::Display for TurnStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TurnStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "round_robin" | "roundrobin" => Ok(TurnStrategy::RoundRobin),
            "named_handoff" | "handoff" => Ok(TurnStrategy::NamedHandoff),
            other => Err(format!(
                "Unknown turn strategy: {}. Valid: round_robin, named_handoff",
                other
            )),
        }
    }
}
