//! Provider adapter port
//!
//! Defines the interface for sending one collaboration turn to a model
//! backend.

use async_trait::async_trait;
use saloon_domain::{ContextVariables, Message};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during a provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout")]
    Timeout,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Whether retrying the same request may succeed.
    ///
    /// Authentication and request validation failures will not change on
    /// retry; everything else might.
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            ProviderError::Authentication(_) | ProviderError::InvalidRequest(_)
        )
    }

    /// Short identifier for transcripts
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Connection(_) => "connection",
            ProviderError::Timeout => "timeout",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::Server { .. } => "server",
            ProviderError::Authentication(_) => "authentication",
            ProviderError::InvalidRequest(_) => "invalid_request",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::Other(_) => "other",
        }
    }
}

/// One turn's request: everything the model sees
#[derive(Debug, Clone, Copy)]
pub struct ProviderRequest<'a> {
    /// Persona system instructions
    pub instructions: &'a str,
    /// Full history of the run so far
    pub messages: &'a [Message],
    pub temperature: f32,
    /// Blackboard state of the run
    pub context: &'a ContextVariables,
    /// Model identifier, passed verbatim
    pub model: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub content: String,
    pub metadata: ProviderMetadata,
}

impl ProviderResponse {
    pub fn new(
        content: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            metadata: ProviderMetadata {
                provider: provider.into(),
                model: model.into(),
            },
        }
    }
}

/// Adapter for one model backend
///
/// Implementations live in the infrastructure layer. One adapter instance
/// may serve several concurrent runs, so it must hold no per-call state.
/// An empty completion must be reported as [`ProviderError::EmptyResponse`].
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Identifier agents use to select this adapter (e.g. "openai")
    fn provider_id(&self) -> &str;

    /// Send one request and return the raw completion text
    async fn complete(&self, request: ProviderRequest<'_>) -> Result<ProviderResponse, ProviderError>;
}

/// Provider adapters by id
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own provider id, replacing any previous one
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.provider_id().to_string(), adapter);
    }

    pub fn with(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(provider_id).cloned()
    }

    pub fn contains(&self, provider_id: &str) -> bool {
        self.adapters.contains_key(provider_id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.adapters.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}
