//! Anthropic messages adapter

use super::{HTTP_TIMEOUT, status_error, system_prompt, transport_error};
use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use reqwest::Client;
use saloon_application::ports::provider::{
    ProviderAdapter, ProviderError, ProviderRequest, ProviderResponse,
};
use saloon_domain::{ContextVariables, Role};
use serde_json::{Value, json};
use tracing::debug;

pub const ANTHROPIC_PROVIDER: &str = "anthropic";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    api_version: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Other(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Build from file configuration.
    ///
    /// Returns `None` when no API key is configured or the client cannot be built.
    pub fn try_new(config: &FileAnthropicConfig) -> Option<Self> {
        let api_key = config.resolve_api_key()?;
        Some(
            Self::new(api_key, config.base_url.clone())
                .ok()?
                .with_api_version(config.api_version.clone())
                .with_max_tokens(config.max_tokens),
        )
    }

    /// Opening user message for histories without one
    fn opening_message(context: &ContextVariables) -> String {
        if context.is_empty() {
            "Let's begin the task.".to_string()
        } else {
            format!(
                "Let's begin with this context: {}",
                serde_json::to_string(&context.to_json()).unwrap_or_default()
            )
        }
    }

    fn payload(&self, request: &ProviderRequest<'_>) -> Value {
        let mut messages: Vec<Value> = request
            .messages
            .iter()
            .map(|m| {
                json!({
                    "role": m.role.as_str(),
                    "content": m.content.trim(),
                })
            })
            .collect();

        // The API requires the conversation to contain a user turn
        if !request.messages.iter().any(|m| m.role == Role::User) {
            messages.insert(
                0,
                json!({
                    "role": "user",
                    "content": Self::opening_message(request.context),
                }),
            );
        }

        json!({
            "model": request.model,
            "max_tokens": self.max_tokens,
            "system": system_prompt(request.instructions, request.context),
            "messages": messages,
            "temperature": request.temperature,
        })
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(transport_error)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(status_error(status, &body))
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    fn provider_id(&self) -> &str {
        ANTHROPIC_PROVIDER
    }

    async fn complete(
        &self,
        request: ProviderRequest<'_>,
    ) -> Result<ProviderResponse, ProviderError> {
        debug!(
            model = request.model,
            messages = request.messages.len(),
            "Anthropic request"
        );
        let response = self.post(self.payload(&request)).await?;

        let blocks = response
            .get("content")
            .and_then(|c| c.as_array())
            .ok_or_else(|| ProviderError::MalformedResponse("missing content".to_string()))?;

        let text = blocks
            .iter()
            .find_map(|block| block.get("text").and_then(|t| t.as_str()))
            .ok_or(ProviderError::EmptyResponse)?;

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(ProviderResponse::new(text, ANTHROPIC_PROVIDER, request.model))
    }
}
