//! Perplexity chat-completions rewrite provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::{TaskError, TaskResult};

use super::prompt::{build_rewrite_prompt, REWRITE_SYSTEM_PROMPT};
use super::RewriteProvider;

/// Perplexity API endpoint.
const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";

/// Model used for rewrites.
const MODEL: &str = "llama-3.1-sonar-small-128k-online";

/// Upper bound on the rewrite call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Rewrite provider backed by the Perplexity API.
///
/// The credential is read from `PERPLEXITY_API_KEY`; its absence is reported
/// only through [`RewriteProvider::is_configured`] and error messages never
/// carry the key itself.
pub struct PerplexityProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl PerplexityProvider {
    /// Create a provider with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key.into()),
            base_url: PERPLEXITY_API_URL.to_string(),
        }
    }

    /// Create from the `PERPLEXITY_API_KEY` environment variable.
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: std::env::var("PERPLEXITY_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            base_url: PERPLEXITY_API_URL.to_string(),
        }
    }

    /// Point the provider at a different endpoint (tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for PerplexityProvider {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl RewriteProvider for PerplexityProvider {
    fn name(&self) -> &str {
        "perplexity"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn rewrite(&self, text: &str, style: &str) -> TaskResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| TaskError::upstream("PERPLEXITY_API_KEY not set"))?;

        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: REWRITE_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_rewrite_prompt(text, style),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| TaskError::upstream(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TaskError::upstream(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(TaskError::upstream(format!(
                "Perplexity API error ({status}): {body}"
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| TaskError::upstream(format!("failed to parse response: {e}")))?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| TaskError::upstream("empty response from Perplexity"))?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let provider = PerplexityProvider::new("key");
        assert_eq!(provider.name(), "perplexity");
        assert!(provider.is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_without_leaking() {
        let provider = PerplexityProvider {
            client: Client::new(),
            api_key: None,
            base_url: PERPLEXITY_API_URL.to_string(),
        };
        assert!(!provider.is_configured());

        let err = provider.rewrite("texte", "professional").await.unwrap_err();
        assert!(matches!(err, TaskError::Upstream { .. }));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "bonjour".to_string(),
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], MODEL);
        assert_eq!(json["max_tokens"], 500);
    }
}
