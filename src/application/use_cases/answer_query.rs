use std::sync::Arc;

use tracing::info;

use crate::application::CompletionClient;
use crate::domain::DomainError;

/// System directive sent with every query: concise, plain-text answers.
const SYSTEM_PROMPT: &str = "You are a helpful assistant that gives concise, \
accurate answers and links or examples when useful. Format the response in \
plain text.";

/// Output bound per answer.
const MAX_TOKENS: u32 = 700;
/// Low randomness to favor reproducible, focused answers.
const TEMPERATURE: f32 = 0.2;
/// Substituted when the remote API returns no content.
const EMPTY_FALLBACK: &str = "No response";

/// Validation message for an absent or empty query. Also the literal body of
/// the relay's 400 response.
pub const QUERY_REQUIRED: &str = "Query required";

/// Turns one user query into one answer via the completion port.
///
/// A single attempt per call — no retries. Failures from the completion
/// client pass through untouched so the caller can surface the most specific
/// diagnostic available.
pub struct AnswerQueryUseCase {
    completion: Arc<dyn CompletionClient>,
}

impl AnswerQueryUseCase {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    pub async fn execute(&self, query: &str) -> Result<String, DomainError> {
        if query.is_empty() {
            return Err(DomainError::invalid_input(QUERY_REQUIRED));
        }

        info!("Answering query ({} chars)", query.len());

        let text = self
            .completion
            .complete(SYSTEM_PROMPT, query, MAX_TOKENS, TEMPERATURE)
            .await?;

        let answer = text.trim();
        Ok(if answer.is_empty() {
            EMPTY_FALLBACK.to_string()
        } else {
            answer.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedCompletion {
        reply: String,
    }

    #[async_trait]
    impl CompletionClient for CannedCompletion {
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _max_tokens: u32,
            _temperature: f32,
        ) -> Result<String, DomainError> {
            Ok(self.reply.clone())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl CompletionClient for FailingCompletion {
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _max_tokens: u32,
            _temperature: f32,
        ) -> Result<String, DomainError> {
            Err(DomainError::completion("quota exceeded"))
        }
    }

    fn use_case(reply: &str) -> AnswerQueryUseCase {
        AnswerQueryUseCase::new(Arc::new(CannedCompletion {
            reply: reply.to_string(),
        }))
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let err = use_case("4").execute("").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.detail(), QUERY_REQUIRED);
    }

    #[tokio::test]
    async fn answer_is_trimmed() {
        let answer = use_case("  42  \n").execute("What is 6*7?").await.unwrap();
        assert_eq!(answer, "42");
    }

    #[tokio::test]
    async fn blank_content_falls_back() {
        let answer = use_case("   \n\t").execute("anything").await.unwrap();
        assert_eq!(answer, EMPTY_FALLBACK);
    }

    #[tokio::test]
    async fn completion_failure_passes_through() {
        let use_case = AnswerQueryUseCase::new(Arc::new(FailingCompletion));
        let err = use_case.execute("why").await.unwrap_err();
        assert!(err.is_completion_error());
        assert_eq!(err.detail(), "quota exceeded");
    }
}
