//! Domain error types

use thiserror::Error;

/// Domain-level errors.
///
/// Every variant describes a configuration problem: they are raised when a
/// collaboration is assembled or started, never while turns are running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("At least two agents are required for collaboration (got {found})")]
    NotEnoughAgents { found: usize },

    #[error("Agent '{agent}' uses unknown provider '{provider}'")]
    UnknownProvider { agent: String, provider: String },

    #[error("Invalid starting agent index {index} for {count} agents")]
    InvalidStartingAgent { index: usize, count: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    /// Check if this error came from a provider id that could not be resolved
    pub fn is_unknown_provider(&self) -> bool {
        matches!(self, DomainError::UnknownProvider { .. })
    }
}
