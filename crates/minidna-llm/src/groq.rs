//! Groq Provider Implementation
//!
//! Talks to Groq's OpenAI-compatible chat-completions API.
//!
//! Each call sends the prompt as a single user message at the configured
//! temperature (0 by default, so extraction is as repeatable as the model
//! allows). Requests carry their own timeout and are never retried; a failed
//! call fails the submission that made it.
//!
//! # Examples
//!
//! ```no_run
//! use minidna_llm::{GroqConfig, GroqProvider};
//!
//! let config = GroqConfig {
//!     api_key: "gsk_...".to_string(),
//!     ..GroqConfig::default()
//! };
//! let provider = GroqProvider::new(config).unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use minidna_domain::traits::CompletionProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Groq API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com";

/// Default chat model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default timeout for completion requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// Connection settings for the Groq API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroqConfig {
    /// API base URL
    pub endpoint: String,

    /// Model to request
    pub model: String,

    /// Bearer token; usually injected from `GROQ_API_KEY`
    pub api_key: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            temperature: 0.0,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Groq chat-completions provider
pub struct GroqProvider {
    config: GroqConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqProvider {
    /// Create a new Groq provider
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Config` if no API key is configured or the HTTP
    /// client cannot be built.
    pub fn new(config: GroqConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("api_key is required".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!(
            "{}{}",
            self.config.endpoint.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        }
    }
}

/// First choice's content, or the empty string when the API returned none
fn first_choice_content(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    LlmError::Authentication(error_text)
                }
                reqwest::StatusCode::NOT_FOUND => {
                    LlmError::ModelNotAvailable(self.config.model.clone())
                }
                reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = first_choice_content(body);
        debug!(model = %self.config.model, chars = content.len(), "Groq completion received");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GroqConfig {
        GroqConfig {
            api_key: "test-key".to_string(),
            ..GroqConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = GroqConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.temperature, 0.0);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_provider_requires_api_key() {
        let result = GroqProvider::new(GroqConfig::default());
        assert!(matches!(result, Err(LlmError::Config(_))));
    }

    #[test]
    fn test_completions_url() {
        let mut config = test_config();
        config.endpoint = "http://localhost:8000/".to_string();
        let provider = GroqProvider::new(config).unwrap();
        assert_eq!(
            provider.completions_url(),
            "http://localhost:8000/openai/v1/chat/completions"
        );
        assert_eq!(provider.model_name(), DEFAULT_MODEL);
    }

    #[test]
    fn test_request_body_shape() {
        let provider = GroqProvider::new(test_config()).unwrap();
        let body = serde_json::to_value(provider.request_body("extract this")).unwrap();

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "extract this");
    }

    #[test]
    fn test_first_choice_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"supported\": false}"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_content(response), r#"{"supported": false}"#);
    }

    #[test]
    fn test_missing_content_is_empty() {
        let no_choices: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_choice_content(no_choices), "");

        let null_content: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(first_choice_content(null_content), "");
    }

    #[tokio::test]
    async fn test_groq_error_handling() {
        // Use invalid endpoint to trigger error
        let mut config = test_config();
        config.endpoint = "http://localhost:99999".to_string();
        let provider = GroqProvider::new(config).unwrap();

        let result = provider.generate("test").await;
        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }

    // Integration test (requires GROQ_API_KEY and network access)
    #[tokio::test]
    #[ignore]
    async fn test_groq_generate_integration() {
        let Ok(api_key) = std::env::var("GROQ_API_KEY") else {
            return;
        };
        let provider = GroqProvider::new(GroqConfig {
            api_key,
            ..GroqConfig::default()
        })
        .unwrap();
        let response = provider.generate("Say 'hello' and nothing else").await.unwrap();
        assert!(!response.is_empty());
    }
}
