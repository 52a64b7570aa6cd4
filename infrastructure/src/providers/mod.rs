//! HTTP provider adapters
//!
//! | Provider id | Adapter | Endpoint |
//! |-------------|---------|----------|
//! | `openai` | [`OpenAiProvider`] | `POST {base_url}/v1/chat/completions` |
//! | `anthropic` | [`AnthropicProvider`] | `POST {base_url}/v1/messages` |
//!
//! Both adapters render the run's context variables into the system prompt
//! and map HTTP failures onto [`ProviderError`] the same way.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use crate::config::FileProvidersConfig;
use reqwest::StatusCode;
use saloon_application::ports::provider::{ProviderError, ProviderRegistry};
use saloon_domain::ContextVariables;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Whole-request timeout of the HTTP client
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(600);

/// Longest error body carried into an error message
const MAX_ERROR_BODY: usize = 500;

/// System prompt with the blackboard state appended
pub(crate) fn system_prompt(instructions: &str, context: &ContextVariables) -> String {
    if context.is_empty() {
        return instructions.to_string();
    }
    let rendered = serde_json::to_string_pretty(&context.to_json()).unwrap_or_default();
    format!("{}\n\nContext variables:\n{}", instructions, rendered)
}

/// Map a non-success status and its body to a provider error
pub(crate) fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let message = saloon_domain::core::string::truncate(body.trim(), MAX_ERROR_BODY);
    match status.as_u16() {
        401 | 403 => ProviderError::Authentication(message),
        429 => ProviderError::RateLimited(message),
        code if code >= 500 => ProviderError::Server {
            status: code,
            message,
        },
        _ => ProviderError::InvalidRequest(format!("{}: {}", status, message)),
    }
}

pub(crate) fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_decode() {
        ProviderError::MalformedResponse(e.to_string())
    } else {
        ProviderError::Connection(e.to_string())
    }
}

/// Build the registry of every provider whose credentials are available.
///
/// Providers without an API key are skipped with a warning; agents that
/// name them fail at coordinator construction.
pub fn build_registry(config: &FileProvidersConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    match OpenAiProvider::try_new(&config.openai) {
        Some(provider) => {
            info!(base_url = %config.openai.base_url, "OpenAI provider initialized");
            registry.register(Arc::new(provider));
        }
        None => warn!("OpenAI provider not available"),
    }

    match AnthropicProvider::try_new(&config.anthropic) {
        Some(provider) => {
            info!(base_url = %config.anthropic.base_url, "Anthropic provider initialized");
            registry.register(Arc::new(provider));
        }
        None => warn!("Anthropic provider not available"),
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_without_context() {
        assert_eq!(system_prompt("Be brief.", &ContextVariables::new()), "Be brief.");
    }

    #[test]
    fn test_system_prompt_with_context() {
        let context = ContextVariables::new().with("book_title", "Moss");
        let prompt = system_prompt("Be brief.", &context);
        assert!(prompt.starts_with("Be brief.\n\nContext variables:\n"));
        assert!(prompt.contains("\"book_title\": \"Moss\""));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "bad key"),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, ""),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ProviderError::RateLimited(_)
        ));
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY, "upstream"),
            ProviderError::Server {
                status: 502,
                message: "upstream".to_string()
            }
        );
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "no model"),
            ProviderError::InvalidRequest(_)
        ));
    }

    #[test]
    fn test_registry_skips_providers_without_keys() {
        let mut config = FileProvidersConfig::default();
        config.openai.api_key_env = "SALOON_TEST_UNSET_OPENAI_KEY".to_string();
        config.anthropic.api_key_env = "SALOON_TEST_UNSET_ANTHROPIC_KEY".to_string();
        config.anthropic.api_key = Some("sk-test".to_string());

        let registry = build_registry(&config);
        assert_eq!(registry.ids(), vec!["anthropic".to_string()]);
    }
}
