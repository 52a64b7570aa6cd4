//! Built-in personas.
//!
//! | Persona | Role | Default provider | Policy |
//! |---------|------|------------------|--------|
//! | Zero | enthusiastic writer, proposes first drafts | openai | strip handoff markers |
//! | Gustave | eloquent editor, refines | openai | preserve everything |
//! | Camille | critical reviewer | anthropic | strip handoff markers |
//!
//! Gustave keeps markers so the whole exchange stays visible to the
//! consensus checks; the other two hand clean prose to the next speaker.

use super::entities::Agent;
use super::response::ResponsePolicy;
use crate::prompt::PersonaPromptTemplate;
use serde::{Deserialize, Serialize};

/// What a collaboration is producing; selects persona instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Title,
    Toc,
    Section,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Title => "title",
            Task::Toc => "toc",
            Task::Section => "section",
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Zero,
    Gustave,
    Camille,
}

impl Persona {
    pub fn all() -> [Persona; 3] {
        [Persona::Zero, Persona::Gustave, Persona::Camille]
    }

    /// Roster used when none is configured
    pub fn default_roster() -> Vec<Persona> {
        vec![Persona::Zero, Persona::Gustave]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Persona::Zero => "Zero",
            Persona::Gustave => "Gustave",
            Persona::Camille => "Camille",
        }
    }

    /// Lowercase key used for commentary tags and config sections
    pub fn key(&self) -> &'static str {
        match self {
            Persona::Zero => "zero",
            Persona::Gustave => "gustave",
            Persona::Camille => "camille",
        }
    }

    pub fn policy(&self) -> ResponsePolicy {
        match self {
            Persona::Gustave => ResponsePolicy::PreserveAll,
            Persona::Zero | Persona::Camille => ResponsePolicy::StripHandoffMarkers,
        }
    }

    pub fn default_provider(&self) -> &'static str {
        match self {
            Persona::Camille => "anthropic",
            Persona::Zero | Persona::Gustave => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self.default_provider() {
            "anthropic" => "claude-3-5-sonnet-20241022",
            _ => "gpt-4",
        }
    }

    pub fn instructions(&self, task: Task) -> String {
        PersonaPromptTemplate::instructions(*self, task)
    }

    /// Build an agent with this persona's defaults for the given task.
    pub fn agent(&self, task: Task) -> Agent {
        Agent::new(
            self.name(),
            self.instructions(task),
            self.default_model(),
            self.default_provider(),
        )
        .with_policy(self.policy())
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" => Ok(Persona::Zero),
            "gustave" => Ok(Persona::Gustave),
            "camille" => Ok(Persona::Camille),
            other => Err(format!(
                "Unknown agent type: {}. Valid: zero, gustave, camille",
                other
            )),
        }
    }
}
