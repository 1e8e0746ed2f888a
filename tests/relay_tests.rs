//! Integration tests for the relay's HTTP contract.
//!
//! Each test spawns the real router on an ephemeral port with a mock
//! completion client and talks to it over HTTP.

use std::sync::Arc;

use serde_json::{json, Value};

use answerbox::{router, AnswerQueryUseCase, AnswerSource, MockCompletion, RelayClient, RelayState};

async fn spawn_relay(mock: MockCompletion) -> String {
    let use_case = Arc::new(AnswerQueryUseCase::new(Arc::new(mock)));
    let app = router(RelayState::new(use_case));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn valid_query_returns_answer() {
    let base = spawn_relay(MockCompletion::new()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/search"))
        .json(&json!({ "query": "What is 2+2?" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let answer = body["answer"].as_str().expect("answer field missing");
    assert!(!answer.is_empty());
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let base = spawn_relay(MockCompletion::new()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/search"))
        .json(&json!({ "query": "" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Query required" }));
}

#[tokio::test]
async fn missing_query_field_is_rejected() {
    let base = spawn_relay(MockCompletion::new()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/search"))
        .json(&json!({}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn upstream_failure_maps_to_server_error() {
    let base = spawn_relay(MockCompletion::failing("You exceeded your current quota")).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/search"))
        .json(&json!({ "query": "anything" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "You exceeded your current quota");
}

#[tokio::test]
async fn relay_client_round_trips() {
    let base = spawn_relay(MockCompletion::new()).await;
    let client = RelayClient::new(base);

    let answer = client.answer("ping").await.expect("Relay call failed");
    assert_eq!(answer, "Mock answer: ping");
}

#[tokio::test]
async fn relay_client_surfaces_error_body() {
    let base = spawn_relay(MockCompletion::failing("remote down")).await;
    let client = RelayClient::new(base);

    let err = client.answer("ping").await.unwrap_err();
    assert_eq!(err.detail(), "remote down");
}
