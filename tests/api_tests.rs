//! HTTP surface tests using axum-test against stub backends.

mod common {
    pub mod mocks;
}

use axum_test::TestServer;
use common::mocks::stub_orchestrator;
use serde_json::{json, Value};
use std::sync::Arc;
use triad::{api::routes::create_app, AppState, TriadConfig};

fn create_test_server() -> TestServer {
    create_test_server_with(TriadConfig::default())
}

fn create_test_server_with(config: TriadConfig) -> TestServer {
    let (orchestrator, _) = stub_orchestrator();
    let state = AppState {
        config: Arc::new(config),
        orchestrator: Arc::new(orchestrator),
    };
    TestServer::new(create_app(state)).expect("Failed to create test server")
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/api/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_process_routes_request() {
    let server = create_test_server();

    let response = server
        .post("/api/process")
        .json(&json!({"message": "document our research findings"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "completed");
    assert_eq!(body["conversation_id"], 0);
    assert_eq!(body["request"], "document our research findings");
    assert_eq!(body["results"]["research"]["status"], "completed");
    assert_eq!(body["results"]["documentation"]["status"], "completed");
    assert!(body["results"].get("coding").is_none());
}

#[tokio::test]
async fn test_process_with_explicit_agents() {
    let server = create_test_server();

    let response = server
        .post("/api/process")
        .json(&json!({"message": "write code for a parser", "agents": ["coding"]}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let results = body["results"].as_object().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        body["results"]["coding"]["payload"]["code_blocks"][0]["code"],
        "print('ok')"
    );
}

#[tokio::test]
async fn test_process_empty_message_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/api/process")
        .json(&json!({"message": "   "}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_process_unknown_agent_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/process")
        .json(&json!({"message": "hi", "agents": ["finance"]}))
        .expect_failure()
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_history_after_requests() {
    let server = create_test_server();

    for message in ["research one", "research two", "research three"] {
        server
            .post("/api/process")
            .json(&json!({"message": message}))
            .await
            .assert_status_ok();
    }

    let response = server
        .get("/api/history")
        .add_query_param("limit", 2)
        .await;
    response.assert_status_ok();

    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[1]["id"], 2);
    assert_eq!(body[1]["request"]["text"], "research three");
    assert_eq!(body[1]["capabilities"], json!(["research"]));
}

#[tokio::test]
async fn test_history_default_limit_comes_from_config() {
    let mut config = TriadConfig::default();
    config.orchestrator.history_limit = 1;
    let server = create_test_server_with(config);

    for message in ["research a", "research b"] {
        server
            .post("/api/process")
            .json(&json!({"message": message}))
            .await;
    }

    let body: Vec<Value> = server.get("/api/history").await.json();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], 1);
}

#[tokio::test]
async fn test_get_conversation() {
    let server = create_test_server();
    server
        .post("/api/process")
        .json(&json!({"message": "research rust"}))
        .await;

    let response = server.get("/api/history/0").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["request"]["text"], "research rust");

    server
        .get("/api/history/7")
        .expect_failure()
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_status() {
    let server = create_test_server();
    server
        .post("/api/process")
        .json(&json!({"message": "research rust"}))
        .await;

    let response = server.get("/api/status").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["agents"], json!(["research", "documentation", "coding"]));
    assert_eq!(body["agent_models"]["coding"], "qwen");
    assert_eq!(body["loaded_models"], 3);
    assert_eq!(body["conversation_count"], 1);
}

#[tokio::test]
async fn test_list_agents() {
    let server = create_test_server();

    let response = server.get("/api/agents").await;
    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 3);
    assert_eq!(body[0]["capability"], "research");
    assert_eq!(body[0]["model"], "phi3");
    assert!(body[2]["description"].as_str().unwrap().contains("code"));
}
