use std::time::Duration;

use async_trait::async_trait;
use vita_core::{ChatRequest, ChatResponse};

use crate::error::Result;

/// The chat-completion seam. The gateway only ever talks to this trait,
/// which keeps the live HTTP provider swappable for a stub in tests.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn provider_id(&self) -> &str;

    /// One synchronous round trip: full message context in, generated text
    /// out. Implementations make exactly one attempt; retrying is the
    /// caller's decision (and the gateway never retries).
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// Provider connection settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider_id: String,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(provider_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            base_url: base_url.into(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_builder() {
        let config = ProviderConfig::new("openai", "https://api.openai.com/v1")
            .with_api_key("sk-test")
            .with_model("gpt-4o")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.provider_id, "openai");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
