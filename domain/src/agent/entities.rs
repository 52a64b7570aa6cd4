//! Agent domain entities

use super::response::{ProcessedResponse, ResponsePolicy};
use serde::{Deserialize, Serialize};

/// A persona bound to a model and a provider.
///
/// The provider id must resolve in the provider registry handed to the
/// coordinator; the coordinator refuses to start otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique display name (e.g. "Zero")
    pub name: String,
    /// Persona system instructions
    pub instructions: String,
    /// Model identifier passed verbatim to the provider
    pub model: String,
    /// Provider identifier (e.g. "openai", "anthropic")
    pub provider: String,
    /// Content-cleaning policy applied to this agent's output
    #[serde(default)]
    pub policy: ResponsePolicy,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        model: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: model.into(),
            provider: provider.into(),
            policy: ResponsePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Extract consensus, cleaned content and metadata from raw model text.
    pub fn process_response(&self, raw: &str) -> ProcessedResponse {
        self.policy.process(&self.name, raw)
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Agent (model: {}, provider: {})",
            self.name, self.model, self.provider
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_response_uses_policy_and_name() {
        let agent = Agent::new("Gustave", "refine", "gpt-4", "openai")
            .with_policy(ResponsePolicy::PreserveAll);
        let processed = agent.process_response("Better\nHANDOFF: Zero\n");
        assert_eq!(processed.agent_name, "Gustave");
        assert_eq!(processed.content, "Better\nHANDOFF: Zero");
    }

    #[test]
    fn test_display() {
        let agent = Agent::new("Zero", "", "gpt-4", "openai");
        assert_eq!(agent.to_string(), "Zero Agent (model: gpt-4, provider: openai)");
    }
}
