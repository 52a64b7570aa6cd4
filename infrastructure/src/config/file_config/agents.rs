//! Agent roster configuration from TOML (`[agents]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use saloon_application::use_cases::write_book::BookAgents;
use saloon_domain::{Agent, Persona, ResponsePolicy, Task};
use serde::{Deserialize, Serialize};

/// Per-persona overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonaConfig {
    pub model: Option<String>,
    pub provider: Option<String>,
    /// Replaces the built-in instructions for every task
    pub instructions: Option<String>,
    /// "strip_handoff_markers" or "preserve_all"
    pub policy: Option<String>,
}

/// Raw roster configuration from TOML
///
/// # Example
///
/// ```toml
/// [agents]
/// roster = ["zero", "gustave", "camille"]
///
/// [agents.camille]
/// model = "claude-3-5-sonnet-20241022"
/// provider = "anthropic"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    /// Speaking order of the personas
    pub roster: Vec<String>,
    pub zero: FilePersonaConfig,
    pub gustave: FilePersonaConfig,
    pub camille: FilePersonaConfig,
}

impl Default for FileAgentsConfig {
    fn default() -> Self {
        Self {
            roster: Persona::default_roster()
                .iter()
                .map(|p| p.key().to_string())
                .collect(),
            zero: FilePersonaConfig::default(),
            gustave: FilePersonaConfig::default(),
            camille: FilePersonaConfig::default(),
        }
    }
}

impl FileAgentsConfig {
    fn overrides(&self, persona: Persona) -> &FilePersonaConfig {
        match persona {
            Persona::Zero => &self.zero,
            Persona::Gustave => &self.gustave,
            Persona::Camille => &self.camille,
        }
    }

    /// Parse roster names into personas, skipping unknown and repeated names.
    pub fn parse_roster(&self) -> (Vec<Persona>, Vec<ConfigIssue>) {
        let mut personas = Vec::new();
        let mut issues = Vec::new();

        for name in &self.roster {
            match name.parse::<Persona>() {
                Ok(persona) if !personas.contains(&persona) => personas.push(persona),
                Ok(_) => {}
                Err(_) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "agents.roster".to_string(),
                        value: name.clone(),
                        valid_values: Persona::all()
                            .iter()
                            .map(|p| p.key().to_string())
                            .collect(),
                    },
                    format!("agents.roster: unknown agent '{}', skipping", name),
                )),
            }
        }

        if personas.len() < 2 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::RosterTooSmall {
                    found: personas.len(),
                },
                format!(
                    "agents.roster: at least two agents are required (got {})",
                    personas.len()
                ),
            ));
        }

        (personas, issues)
    }

    fn agent(&self, persona: Persona, task: Task, issues: &mut Vec<ConfigIssue>) -> Agent {
        let overrides = self.overrides(persona);
        let mut agent = persona.agent(task);

        // An overridden provider without a model falls back to that provider's default
        if let Some(provider) = &overrides.provider {
            agent = agent.with_provider(provider.as_str());
            if overrides.model.is_none() && provider != persona.default_provider() {
                let fallback = Persona::all()
                    .into_iter()
                    .find(|p| p.default_provider() == provider)
                    .map(|p| p.default_model());
                if let Some(model) = fallback {
                    agent = agent.with_model(model);
                }
            }
        }
        if let Some(model) = &overrides.model {
            agent = agent.with_model(model.as_str());
        }
        if let Some(instructions) = &overrides.instructions {
            agent = agent.with_instructions(instructions.as_str());
        }
        if let Some(policy) = &overrides.policy {
            match policy.parse::<ResponsePolicy>() {
                Ok(policy) => agent = agent.with_policy(policy),
                Err(_) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("agents.{}.policy", persona.key()),
                        value: policy.clone(),
                        valid_values: vec![
                            "strip_handoff_markers".to_string(),
                            "preserve_all".to_string(),
                        ],
                    },
                    format!(
                        "agents.{}.policy: unknown value '{}', keeping the persona default",
                        persona.key(),
                        policy
                    ),
                )),
            }
        }
        agent
    }

    /// Agents for one task, in roster order
    pub fn agents_for(&self, task: Task) -> (Vec<Agent>, Vec<ConfigIssue>) {
        let (personas, mut issues) = self.parse_roster();
        let agents = personas
            .into_iter()
            .map(|persona| self.agent(persona, task, &mut issues))
            .collect();
        (agents, issues)
    }

    /// Rosters for the title, outline and section tasks
    pub fn book_agents(&self) -> (BookAgents, Vec<ConfigIssue>) {
        let (title, issues) = self.agents_for(Task::Title);
        // Issues do not depend on the task
        let (toc, _) = self.agents_for(Task::Toc);
        let (section, _) = self.agents_for(Task::Section);
        (BookAgents { title, toc, section }, issues)
    }
}
