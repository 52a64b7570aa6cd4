//! Scripted providers shared by the use case tests.

use crate::config::CollaborationParams;
use crate::ports::provider::{
    ProviderAdapter, ProviderError, ProviderRegistry, ProviderRequest, ProviderResponse,
};
use async_trait::async_trait;
use saloon_domain::{Agent, ContextVariables, ResponsePolicy};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SCRIPTED_PROVIDER: &str = "scripted";

/// What the provider saw on one call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub instructions: String,
    pub model: String,
    pub temperature: f32,
    pub message_count: usize,
    pub last_message: String,
    pub context: ContextVariables,
}

impl RecordedRequest {
    fn from_request(request: &ProviderRequest<'_>) -> Self {
        Self {
            instructions: request.instructions.to_string(),
            model: request.model.to_string(),
            temperature: request.temperature,
            message_count: request.messages.len(),
            last_message: request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default(),
            context: request.context.clone(),
        }
    }
}

/// Mock provider that returns scripted responses in order
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        })
    }

    pub fn texts(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn delayed(texts: &[&str], delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(texts.iter().map(|t| Ok(t.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
            delay: Some(delay),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn contexts(&self) -> Vec<ContextVariables> {
        self.requests().into_iter().map(|r| r.context).collect()
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedProvider {
    fn provider_id(&self) -> &str {
        SCRIPTED_PROVIDER
    }

    async fn complete(
        &self,
        request: ProviderRequest<'_>,
    ) -> Result<ProviderResponse, ProviderError> {
        self.requests
            .lock()
            .unwrap()
            .push(RecordedRequest::from_request(&request));
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok("(no more responses)".to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        next.map(|content| ProviderResponse::new(content, SCRIPTED_PROVIDER, request.model))
    }
}

type Reply = dyn Fn(&RecordedRequest) -> String + Send + Sync;

/// Mock provider that answers from the request itself; order independent
pub struct ReplyProvider {
    reply: Box<Reply>,
    calls: Mutex<usize>,
}

impl ReplyProvider {
    pub fn new(reply: impl Fn(&RecordedRequest) -> String + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ProviderAdapter for ReplyProvider {
    fn provider_id(&self) -> &str {
        SCRIPTED_PROVIDER
    }

    async fn complete(
        &self,
        request: ProviderRequest<'_>,
    ) -> Result<ProviderResponse, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        tokio::task::yield_now().await;
        let content = (self.reply)(&RecordedRequest::from_request(&request));
        Ok(ProviderResponse::new(content, SCRIPTED_PROVIDER, request.model))
    }
}

pub fn agent(name: &str, policy: ResponsePolicy) -> Agent {
    Agent::new(
        name,
        format!("You are {}", name),
        format!("model-{}", name.to_lowercase()),
        SCRIPTED_PROVIDER,
    )
    .with_policy(policy)
}

/// Zero (strips handoff markers) and Gustave (preserves everything)
pub fn agents() -> Vec<Agent> {
    vec![
        agent("Zero", ResponsePolicy::StripHandoffMarkers),
        agent("Gustave", ResponsePolicy::PreserveAll),
    ]
}

pub fn registry(provider: &Arc<impl ProviderAdapter + 'static>) -> ProviderRegistry {
    ProviderRegistry::new().with(provider.clone())
}

/// Default parameters without retry backoff
pub fn fast_params() -> CollaborationParams {
    CollaborationParams::default().with_retry_backoff(Duration::ZERO)
}
