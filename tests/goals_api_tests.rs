//! Goals API tests

use axum::http::StatusCode;
use axum_test::TestServer;
use goalsetter::auth::{core::TokenService, MemoryUserStorage, SqliteUserStorage};
use goalsetter::goals::{MemoryGoalStorage, SqliteGoalStorage};
use goalsetter::{create_router, AppConfig, AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

fn test_config() -> AppConfig {
    let mut config = AppConfig::with_secret("goals-integration-test-secret-0123456789");
    config.bcrypt_cost = 4;
    config
}

fn create_test_server() -> TestServer {
    let config = test_config();

    let state = AppState::new(
        Arc::new(MemoryUserStorage::new()),
        Arc::new(MemoryGoalStorage::new()),
        &config,
    )
    .unwrap();
    TestServer::new(create_router(state)).unwrap()
}

/// Register a user and return (id, token)
async fn sign_up(server: &TestServer, name: &str, email: &str) -> (String, String) {
    let response = server
        .post("/api/users")
        .json(&json!({ "name": name, "email": email, "password": "secret1" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    (
        body["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

async fn add_goal(server: &TestServer, token: &str, text: &str) -> Value {
    let response = server
        .post("/api/goals")
        .authorization_bearer(token)
        .json(&json!({ "text": text }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_goals_require_token() {
    let server = create_test_server();

    let list = server.get("/api/goals").await;
    assert_eq!(list.status_code(), StatusCode::UNAUTHORIZED);

    let create = server.post("/api/goals").json(&json!({ "text": "x" })).await;
    assert_eq!(create.status_code(), StatusCode::UNAUTHORIZED);

    let delete = server.delete("/api/goals/some-id").await;
    assert_eq!(delete.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_goals() {
    let server = create_test_server();
    let (user_id, token) = sign_up(&server, "Ann", "ann@x.com").await;

    let created = add_goal(&server, &token, "Learn Rust").await;
    assert_eq!(created["text"], "Learn Rust");
    assert_eq!(created["user"], user_id.as_str());
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    add_goal(&server, &token, "Ship it").await;

    let response = server.get("/api/goals").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let goals: Vec<Value> = response.json();
    let texts: Vec<&str> = goals.iter().map(|g| g["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["Learn Rust", "Ship it"]);
}

#[tokio::test]
async fn test_create_goal_without_text() {
    let server = create_test_server();
    let (_, token) = sign_up(&server, "Ann", "ann@x.com").await;

    let response = server
        .post("/api/goals")
        .authorization_bearer(&token)
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Please add a text field");
}

#[tokio::test]
async fn test_update_and_delete_goal() {
    let server = create_test_server();
    let (_, token) = sign_up(&server, "Ann", "ann@x.com").await;
    let goal = add_goal(&server, &token, "Learn Rust").await;
    let id = goal["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/goals/{}", id))
        .authorization_bearer(&token)
        .json(&json!({ "text": "Learn more Rust" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["text"], "Learn more Rust");

    let response = server
        .delete(&format!("/api/goals/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({ "id": id }));

    let goals: Vec<Value> = server.get("/api/goals").authorization_bearer(&token).await.json();
    assert!(goals.is_empty());
}

#[tokio::test]
async fn test_unknown_goal_is_not_found() {
    let server = create_test_server();
    let (_, token) = sign_up(&server, "Ann", "ann@x.com").await;

    let response = server
        .delete("/api/goals/does-not-exist")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Goal not found");
}

#[tokio::test]
async fn test_goals_are_scoped_to_owner() {
    let server = create_test_server();
    let (_, ann) = sign_up(&server, "Ann", "ann@x.com").await;
    let (_, bob) = sign_up(&server, "Bob", "bob@x.com").await;
    let goal = add_goal(&server, &ann, "Ann's goal").await;
    let id = goal["id"].as_str().unwrap();

    let bobs: Vec<Value> = server.get("/api/goals").authorization_bearer(&bob).await.json();
    assert!(bobs.is_empty());

    let response = server
        .put(&format!("/api/goals/{}", id))
        .authorization_bearer(&bob)
        .json(&json!({ "text": "hijacked" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User not authorized");

    let response = server
        .delete(&format!("/api/goals/{}", id))
        .authorization_bearer(&bob)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let anns: Vec<Value> = server.get("/api/goals").authorization_bearer(&ann).await.json();
    assert_eq!(anns.len(), 1);
    assert_eq!(anns[0]["text"], "Ann's goal");
}

#[tokio::test]
async fn test_unreadable_goal_bodies() {
    let server = create_test_server();
    let (_, token) = sign_up(&server, "Ann", "ann@x.com").await;
    let goal = add_goal(&server, &token, "Learn Rust").await;
    let id = goal["id"].as_str().unwrap();

    let wrong_type = server
        .post("/api/goals")
        .authorization_bearer(&token)
        .json(&json!({ "text": 42 }))
        .await;
    let broken = server
        .put(&format!("/api/goals/{}", id))
        .authorization_bearer(&token)
        .text("{\"text\":")
        .content_type("application/json")
        .await;
    let plain = server
        .post("/api/goals")
        .authorization_bearer(&token)
        .text("Learn Rust")
        .await;

    for response in [wrong_type, broken, plain] {
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Please add a text field");
    }

    let goals: Vec<Value> = server.get("/api/goals").authorization_bearer(&token).await.json();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0]["text"], "Learn Rust");
}

#[tokio::test]
async fn test_valid_token_for_vanished_user_cannot_create_goals() {
    let config = test_config();
    let pool = goalsetter::storage::connect("sqlite::memory:").await.unwrap();
    let state = AppState::new(
        Arc::new(SqliteUserStorage::new(pool.clone())),
        Arc::new(SqliteGoalStorage::new(pool)),
        &config,
    )
    .unwrap();
    let server = TestServer::new(create_router(state)).unwrap();

    // Signed with the live secret, but no such row exists (e.g. after a database reset)
    let token = TokenService::from_config(&config)
        .unwrap()
        .generate_token("vanished-user")
        .unwrap();

    let response = server
        .post("/api/goals")
        .authorization_bearer(&token)
        .json(&json!({ "text": "Orphan" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Not authorized");
}
