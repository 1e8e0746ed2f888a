use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::AnswerQueryUseCase;

/// Shared state behind the relay's single route.
#[derive(Clone)]
pub struct RelayState {
    answer: Arc<AnswerQueryUseCase>,
}

impl RelayState {
    pub fn new(answer: Arc<AnswerQueryUseCase>) -> Self {
        Self { answer }
    }
}

#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    query: String,
}

#[derive(Serialize)]
struct SearchResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/api/search", post(search))
        .with_state(state)
}

/// `POST /api/search` — the relay's one operation.
///
/// 200 `{"answer": ...}` on success, 400 `{"error": "Query required"}` when
/// the query is missing or empty, 500 `{"error": ...}` with the most
/// specific diagnostic for anything that goes wrong upstream.
async fn search(
    State(state): State<RelayState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    match state.answer.execute(&request.query).await {
        Ok(answer) => (StatusCode::OK, Json(SearchResponse { answer })).into_response(),
        Err(e) => {
            let status = if e.is_invalid_input() {
                StatusCode::BAD_REQUEST
            } else {
                error!("Relay call failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(ErrorResponse { error: e.detail() })).into_response()
        }
    }
}
