//! Configuration file loading for agent-saloon
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SALOON_<SECTION>__<KEY>` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./saloon.toml` or `./.saloon.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/agent-saloon/config.toml`
//! 5. Default values

mod file_config;
pub mod issue;
mod loader;

pub use file_config::{
    FileAgentsConfig, FileAnthropicConfig, FileCollaborationConfig, FileConfig,
    FileGenerationConfig, FileLoggingConfig, FileOpenAiConfig, FilePersonaConfig,
    FileProvidersConfig, FileSectionConfig, FileTitleConfig, FileTocConfig, ResolvedConfig,
};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use loader::ConfigLoader;

/// Reasons a configuration cannot be used
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {}", summarize(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .filter(|issue| issue.is_error())
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl FileConfig {
    /// Resolve into application values, failing when any issue is an error.
    ///
    /// Warnings are returned alongside the values so the caller can print them.
    pub fn into_resolved(self) -> Result<(ResolvedConfig, Vec<ConfigIssue>), ConfigError> {
        let (resolved, issues) = self.resolve();
        if issues.iter().any(ConfigIssue::is_error) {
            return Err(ConfigError::Invalid(issues));
        }
        Ok((resolved, issues))
    }
}
