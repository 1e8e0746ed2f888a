use async_trait::async_trait;

use crate::domain::DomainError;

/// The client's view of the relay: one question in, one answer out.
///
/// The terminal client talks to a remote relay over HTTP through this port;
/// controller tests plug in a canned source instead.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn answer(&self, query: &str) -> Result<String, DomainError>;
}
