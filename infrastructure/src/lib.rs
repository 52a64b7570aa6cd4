//! Infrastructure layer for agent-saloon
//!
//! Adapters for the application ports: HTTP providers for OpenAI and
//! Anthropic, layered TOML configuration and JSONL transcripts.

pub mod config;
pub mod logging;
pub mod providers;

pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileConfig, ResolvedConfig, Severity,
};
pub use logging::JsonlConversationLogger;
pub use providers::{
    anthropic::AnthropicProvider, build_registry, openai::OpenAiProvider,
};
