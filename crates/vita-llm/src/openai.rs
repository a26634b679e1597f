use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use vita_core::{ChatRequest, ChatResponse, ChatUsage};

use crate::error::{LlmError, Result};
use crate::provider::{ChatProvider, ProviderConfig};

/// OpenAI-compatible chat-completion provider.
///
/// Works against api.openai.com and any endpoint speaking the same wire
/// schema. One request per `chat` call; no retry, no backoff, no streaming.
pub struct OpenAiProvider {
    config: ProviderConfig,
    http_client: Client,
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn build_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let bearer = format!("Bearer {}", self.config.api_key);
        let value = header::HeaderValue::from_str(&bearer)
            .map_err(|e| LlmError::Config(format!("invalid api key header: {}", e)))?;
        headers.insert(header::AUTHORIZATION, value);
        Ok(headers)
    }

    fn build_body(&self, request: &ChatRequest) -> Value {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.to_string(),
                    "content": msg.content,
                })
            })
            .collect();

        let mut body = json!({
            "model": request.model,
            "messages": messages,
        });
        if let Some(temp) = request.options.temperature {
            body["temperature"] = json!(temp);
        }
        if let Some(max) = request.options.max_tokens {
            body["max_tokens"] = json!(max);
        }
        body
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn provider_id(&self) -> &str {
        &self.config.provider_id
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = self.build_body(&request);
        let headers = self.build_headers()?;

        debug!(model = %request.model, messages = request.messages.len(), "sending chat completion request");

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Auth(error_text),
                429 => LlmError::RateLimited,
                _ => LlmError::Api {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Parse("response contained no choices".to_string()))?;

        let mut reply = ChatResponse::new(completion.model, choice.message.content);
        if let Some(usage) = completion.usage {
            reply = reply.with_usage(ChatUsage::new(usage.prompt_tokens, usage.completion_tokens));
        }
        Ok(reply)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: String,
    choices: Vec<CompletionChoice>,
    usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::Message;

    fn provider() -> OpenAiProvider {
        let config = ProviderConfig::new("openai", "https://api.openai.com/v1")
            .with_api_key("sk-test")
            .with_model("gpt-4o-mini");
        OpenAiProvider::new(config).unwrap()
    }

    #[test]
    fn test_build_body_includes_roles_in_order() {
        let request = ChatRequest::new("gpt-4o-mini")
            .with_message(Message::system("persona"))
            .with_message(Message::user("hello"))
            .temperature(0.7);

        let body = provider().build_body(&request);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["temperature"], 0.7);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_parse_completion_response() {
        let raw = r#"{
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "Hi there"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let completion: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(completion.choices[0].message.content, "Hi there");
        assert_eq!(completion.usage.as_ref().unwrap().prompt_tokens, 12);
    }

    #[test]
    fn test_auth_header() {
        let headers = provider().build_headers().unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer sk-test"
        );
    }
}
