//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application values
//! ([`CollaborationParams`], [`GenerationConfig`], [`BookAgents`]) on demand.

mod agents;
mod collaboration;
mod generation;
mod logging;
mod providers;

pub use agents::{FileAgentsConfig, FilePersonaConfig};
pub use collaboration::FileCollaborationConfig;
pub use generation::{FileGenerationConfig, FileSectionConfig, FileTitleConfig, FileTocConfig};
pub use logging::FileLoggingConfig;
pub use providers::{FileAnthropicConfig, FileOpenAiConfig, FileProvidersConfig};

use super::issue::ConfigIssue;
use saloon_application::config::{CollaborationParams, GenerationConfig};
use saloon_application::use_cases::write_book::BookAgents;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider credentials and endpoints
    pub providers: FileProvidersConfig,
    /// Turn loop settings shared by every task
    pub collaboration: FileCollaborationConfig,
    /// Per-task budgets and bounds
    pub generation: FileGenerationConfig,
    /// Roster and persona overrides
    pub agents: FileAgentsConfig,
    pub logging: FileLoggingConfig,
}

/// Application values assembled from a [`FileConfig`]
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub params: CollaborationParams,
    pub generation: GenerationConfig,
    pub agents: BookAgents,
}

impl FileConfig {
    /// Convert every section, collecting all detected issues.
    ///
    /// Values with issues are replaced by defaults; callers should refuse to
    /// run when any issue is an error.
    pub fn resolve(&self) -> (ResolvedConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let (params, found) = self.collaboration.to_params();
        issues.extend(found);
        let (generation, found) = self.generation.to_config();
        issues.extend(found);
        let (agents, found) = self.agents.book_agents();
        issues.extend(found);

        (
            ResolvedConfig {
                params,
                generation,
                agents,
            },
            issues,
        )
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.resolve().1
    }
}
