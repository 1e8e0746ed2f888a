use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending chat-style prompts to an LLM and receiving text
/// responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (e.g. [`crate::application::AnswerQueryUseCase`]) remain
/// decoupled from any particular provider or HTTP client library, and tests
/// substitute a deterministic stub.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a `system` context message followed by a `user` prompt and return
    /// the assistant's response text, bounded by `max_tokens` and sampled at
    /// `temperature`.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, DomainError>;
}
