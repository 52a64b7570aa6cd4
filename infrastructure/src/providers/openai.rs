//! OpenAI chat completions adapter

use super::{HTTP_TIMEOUT, status_error, system_prompt, transport_error};
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use reqwest::Client;
use saloon_application::ports::provider::{
    ProviderAdapter, ProviderError, ProviderRequest, ProviderResponse,
};
use serde_json::{Value, json};
use tracing::debug;

pub const OPENAI_PROVIDER: &str = "openai";

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    max_tokens: Option<u32>,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        max_tokens: Option<u32>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Other(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            max_tokens,
        })
    }

    /// Build from file configuration.
    ///
    /// Returns `None` when no API key is configured or the client cannot be built.
    pub fn try_new(config: &FileOpenAiConfig) -> Option<Self> {
        let api_key = config.resolve_api_key()?;
        Self::new(api_key, config.base_url.clone(), config.max_tokens).ok()
    }

    fn payload(request: &ProviderRequest<'_>, max_tokens: Option<u32>) -> Value {
        let mut messages = vec![json!({
            "role": "system",
            "content": system_prompt(request.instructions, request.context),
        })];
        messages.extend(request.messages.iter().map(|m| {
            json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        }));

        let mut payload = json!({
            "model": request.model,
            "messages": messages,
            "temperature": request.temperature,
        });
        if let (Some(tokens), Some(map)) = (max_tokens, payload.as_object_mut()) {
            map.insert("max_tokens".to_string(), json!(tokens));
        }
        payload
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
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
impl ProviderAdapter for OpenAiProvider {
    fn provider_id(&self) -> &str {
        OPENAI_PROVIDER
    }

    async fn complete(
        &self,
        request: ProviderRequest<'_>,
    ) -> Result<ProviderResponse, ProviderError> {
        debug!(
            model = request.model,
            messages = request.messages.len(),
            "OpenAI request"
        );
        let response = self.post(Self::payload(&request, self.max_tokens)).await?;

        let content = response
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.pointer("/message/content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| {
                ProviderError::MalformedResponse(
                    "missing choices[0].message.content".to_string(),
                )
            })?;

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(ProviderResponse::new(
            content,
            OPENAI_PROVIDER,
            request.model,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saloon_domain::{ContextVariables, Message};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_mock_server(status: u16, response_body: Value) -> (MockServer, OpenAiProvider) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test_api_key"))
            .respond_with(ResponseTemplate::new(status).set_body_json(response_body))
            .mount(&mock_server)
            .await;

        let provider = OpenAiProvider::new("test_api_key", mock_server.uri(), None).unwrap();
        (mock_server, provider)
    }

    fn request<'a>(messages: &'a [Message], context: &'a ContextVariables) -> ProviderRequest<'a> {
        ProviderRequest {
            instructions: "You are Zero",
            messages,
            temperature: 0.7,
            context,
            model: "gpt-4",
        }
    }

    #[tokio::test]
    async fn test_complete_basic() {
        let (_server, provider) = setup_mock_server(
            200,
            json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Book Title: Moss\nConsensus: True"},
                    "finish_reason": "stop"
                }]
            }),
        )
        .await;

        let messages = vec![Message::user("Title please")];
        let context = ContextVariables::new();
        let response = provider.complete(request(&messages, &context)).await.unwrap();

        assert_eq!(response.content, "Book Title: Moss\nConsensus: True");
        assert_eq!(response.metadata.provider, "openai");
        assert_eq!(response.metadata.model, "gpt-4");
    }

    #[tokio::test]
    async fn test_payload_has_system_message_first() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system"},
                    {"role": "user", "content": "Title please"},
                    {"role": "assistant", "content": "How about Moss?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let provider = OpenAiProvider::new("k", mock_server.uri(), Some(256)).unwrap();

        let messages = vec![Message::user("Title please"), Message::assistant("How about Moss?")];
        let context = ContextVariables::new().with("book_topic", "moss");
        let response = provider.complete(request(&messages, &context)).await.unwrap();
        assert_eq!(response.content, "ok");
    }

    #[test]
    fn test_payload_renders_context() {
        let messages = vec![Message::user("go")];
        let context = ContextVariables::new().with("section_id", "1.2");
        let payload = OpenAiProvider::payload(&request(&messages, &context), Some(64));

        let system = payload["messages"][0]["content"].as_str().unwrap();
        assert!(system.starts_with("You are Zero"));
        assert!(system.contains("\"section_id\": \"1.2\""));
        assert_eq!(payload["max_tokens"], 64);
    }

    #[tokio::test]
    async fn test_empty_content_is_an_error() {
        let (_server, provider) = setup_mock_server(
            200,
            json!({"choices": [{"message": {"role": "assistant", "content": "  "}}]}),
        )
        .await;

        let messages = vec![Message::user("go")];
        let context = ContextVariables::new();
        let err = provider.complete(request(&messages, &context)).await.unwrap_err();
        assert_eq!(err, ProviderError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_missing_choices_is_malformed() {
        let (_server, provider) = setup_mock_server(200, json!({"choices": []})).await;

        let messages = vec![Message::user("go")];
        let context = ContextVariables::new();
        let err = provider.complete(request(&messages, &context)).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_rate_limit_status() {
        let (_server, provider) =
            setup_mock_server(429, json!({"error": {"message": "slow down"}})).await;

        let messages = vec![Message::user("go")];
        let context = ContextVariables::new();
        let err = provider.complete(request(&messages, &context)).await.unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited(_)));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_unauthorized_status() {
        let (_server, provider) =
            setup_mock_server(401, json!({"error": {"message": "bad key"}})).await;

        let messages = vec![Message::user("go")];
        let context = ContextVariables::new();
        let err = provider.complete(request(&messages, &context)).await.unwrap_err();
        assert!(matches!(err, ProviderError::Authentication(_)));
        assert!(!err.is_transient());
    }
}
