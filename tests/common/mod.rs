//! Shared helpers for HTTP API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderValue};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};

use roomchat::config::{AccountsConfig, WebConfig};
use roomchat::web::{create_router, AppState};
use roomchat::Database;

/// Password used by every test account.
pub const PASSWORD: &str = "password123";

/// Create a test configuration.
pub fn create_test_config() -> WebConfig {
    WebConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret-key-for-testing-only".to_string(),
        ..WebConfig::default()
    }
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<Database>) {
    let config = create_test_config();
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    let app_state = Arc::new(AppState::new(db.clone(), &config, AccountsConfig::default()));
    let router = create_router(app_state, &config.cors_origins);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Attach a bearer token to a request.
pub fn with_token(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

/// Register an account with the shared test password.
pub async fn register(server: &TestServer, email: &str) -> Value {
    server
        .post("/register")
        .form(&json!({
            "email": email,
            "password": PASSWORD,
            "confirm_password": PASSWORD
        }))
        .await
        .json::<Value>()
}

/// Log in and return the session token.
pub async fn login(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/login")
        .form(&json!({ "email": email, "password": PASSWORD }))
        .await;
    response.json::<Value>()["data"]["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

/// Register and log in; returns the session token.
pub async fn register_and_login(server: &TestServer, email: &str) -> String {
    register(server, email).await;
    login(server, email).await
}

/// Create a room and return its `data` object.
pub async fn create_chat(server: &TestServer, token: &str, name: &str, private: bool) -> Value {
    let form = if private {
        json!({ "chat_name": name, "is_private": "on" })
    } else {
        json!({ "chat_name": name })
    };
    with_token(server.post("/create_chat"), token)
        .form(&form)
        .await
        .json::<Value>()["data"]
        .clone()
}

/// Post a message and return the response body.
pub async fn send_message(server: &TestServer, token: &str, room_id: i64, content: &str) -> Value {
    with_token(server.post("/send_message"), token)
        .form(&json!({ "chat_id": room_id, "content": content }))
        .await
        .json::<Value>()
}
