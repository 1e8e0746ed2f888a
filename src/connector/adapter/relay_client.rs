use async_trait::async_trait;
use serde::Deserialize;

use crate::application::AnswerSource;
use crate::domain::DomainError;

const SEARCH_PATH: &str = "/api/search";
/// Substituted when a 200 response somehow carries no answer field.
const NO_ANSWER: &str = "No answer returned.";

#[derive(serde::Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    answer: Option<String>,
    error: Option<String>,
}

/// [`AnswerSource`] over HTTP: posts the query to a running relay and maps
/// its JSON contract back to domain terms. Non-OK statuses surface the
/// relay's error body when present, so the user sees the same diagnostic the
/// relay logged.
pub struct RelayClient {
    client: reqwest::Client,
    url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), SEARCH_PATH);
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AnswerSource for RelayClient {
    async fn answer(&self, query: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SearchRequest { query })
            .send()
            .await
            .map_err(|e| DomainError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: Option<SearchResponse> = response.json().await.ok();
            let message = body
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("Server error: {status}"));
            return Err(DomainError::transport(message));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| DomainError::transport(format!("malformed relay response: {e}")))?;

        Ok(body.answer.unwrap_or_else(|| NO_ANSWER.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_anchored_at_search_route() {
        let client = RelayClient::new("http://localhost:5174/");
        assert_eq!(client.url(), "http://localhost:5174/api/search");
    }
}
