use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::CompletionClient;
use crate::domain::DomainError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error payload shape: `{"error": {"message": "..."}}`.
#[derive(Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for the OpenAI chat-completions API (and compatible
/// endpoints).
///
/// Implements [`CompletionClient`] so the relay stays decoupled from
/// transport and serialization details. Configuration comes from the
/// environment:
///
/// ```text
/// OPENAI_API_KEY=sk-...                   # required
/// OPENAI_MODEL=gpt-4o-mini                # optional
/// OPENAI_BASE_URL=https://api.openai.com  # optional; any compatible server
/// ```
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Construct from environment variables. Fails when `OPENAI_API_KEY` is
    /// absent — the relay refuses to start without a credential.
    pub fn from_env() -> Result<Self, DomainError> {
        let key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            DomainError::invalid_input(
                "Missing OPENAI_API_KEY in environment. \
                 Export OPENAI_API_KEY=sk-... before starting the relay.",
            )
        })?;
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(key, model, base))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Pull the most specific diagnostic out of a non-2xx response body,
    /// falling back to the status line when the body isn't the documented
    /// error shape.
    fn extract_error_message(status: reqwest::StatusCode, body: &str) -> String {
        serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map(|e| e.message)
            .unwrap_or_else(|| format!("API returned {status}"))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            max_tokens,
            temperature,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system,
                },
                ApiMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::completion(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}: {body}");
            return Err(DomainError::completion(Self::extract_error_message(
                status, &body,
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::completion(format!("failed to parse response: {e}")))?;

        Ok(api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_error_message_prefers_payload_message() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#;
        let msg =
            OpenAiClient::extract_error_message(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(msg, "You exceeded your current quota");
    }

    #[test]
    fn extract_error_message_falls_back_to_status() {
        let msg = OpenAiClient::extract_error_message(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>upstream gone</html>",
        );
        assert_eq!(msg, "API returned 502 Bad Gateway");
    }

    #[test]
    fn new_normalizes_trailing_slash() {
        let client = OpenAiClient::new("k", "m", "http://localhost:1234/");
        assert_eq!(client.url, "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn from_env_requires_api_key() {
        // Scoped: the test runner may carry a real key.
        let saved = std::env::var("OPENAI_API_KEY").ok();
        std::env::remove_var("OPENAI_API_KEY");

        let err = OpenAiClient::from_env().unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.detail().contains("OPENAI_API_KEY"));

        if let Some(key) = saved {
            std::env::set_var("OPENAI_API_KEY", key);
        }
    }
}
