//! Named handoff between agents.

use super::context::ContextVariables;
use crate::agent::markers;

/// Context key under which the handoff message is shared with the target
pub const HANDOFF_MESSAGE_KEY: &str = "handoff_message";

/// An agent's request that a specific agent take the next turn
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub target_agent_name: String,
    pub message: String,
    pub context_variables: ContextVariables,
}

impl Handoff {
    pub fn new(target_agent_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target_agent_name: target_agent_name.into(),
            message: message.into(),
            context_variables: ContextVariables::new(),
        }
    }

    pub fn with_context(mut self, context_variables: ContextVariables) -> Self {
        self.context_variables = context_variables;
        self
    }

    /// Parse the first `HANDOFF: <Agent> [- message]` line of a response.
    ///
    /// A non-empty message travels to the target as the `handoff_message`
    /// context variable.
    pub fn parse(text: &str) -> Option<Self> {
        let (target, message) = markers::handoff_target(text)?;
        let mut handoff = Handoff::new(target, message);
        if !handoff.message.is_empty() {
            handoff
                .context_variables
                .insert(HANDOFF_MESSAGE_KEY, handoff.message.clone());
        }
        Some(handoff)
    }
}

/// Resolves handoffs against the agent roster of a run
#[derive(Debug, Clone)]
pub struct HandoffManager {
    agent_names: Vec<String>,
}

impl HandoffManager {
    pub fn new(agent_names: Vec<String>) -> Self {
        Self { agent_names }
    }

    /// Index of an agent by name, ignoring case
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.agent_names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name.trim()))
    }

    /// Round-robin successor of `current`
    pub fn round_robin(&self, current: usize) -> usize {
        if self.agent_names.is_empty() {
            0
        } else {
            (current + 1) % self.agent_names.len()
        }
    }

    /// Next speaker after `current`.
    ///
    /// Carried context variables are merged before the target is looked up.
    /// An unknown target, or a handoff to the current speaker, falls back to
    /// round robin.
    pub fn resolve(
        &self,
        handoff: &Handoff,
        current: usize,
        context: &mut ContextVariables,
    ) -> usize {
        context.merge(&handoff.context_variables);

        match self.index_of(&handoff.target_agent_name) {
            Some(index) if index != current => index,
            _ => self.round_robin(current),
        }
    }
}
