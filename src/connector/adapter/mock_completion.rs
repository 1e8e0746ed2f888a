use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::DomainError;

/// Deterministic [`CompletionClient`] for tests and offline runs: echoes a
/// recognizable answer derived from the query, or fails with a configured
/// message.
pub struct MockCompletion {
    failure: Option<String>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self { failure: None }
    }

    /// A mock whose every call fails with `message`, for exercising the
    /// error path end to end.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
        }
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(
        &self,
        _system: &str,
        user: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, DomainError> {
        if let Some(message) = &self.failure {
            return Err(DomainError::completion(message.clone()));
        }

        debug!("Generated mock answer for query ({} chars)", user.len());
        Ok(format!("Mock answer: {user}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_answer_reflects_query() {
        let mock = MockCompletion::new();
        let answer = mock.complete("sys", "What is 2+2?", 700, 0.2).await.unwrap();
        assert_eq!(answer, "Mock answer: What is 2+2?");
    }

    #[tokio::test]
    async fn failing_mock_reports_configured_message() {
        let mock = MockCompletion::failing("remote down");
        let err = mock.complete("sys", "q", 700, 0.2).await.unwrap_err();
        assert_eq!(err.detail(), "remote down");
    }
}
