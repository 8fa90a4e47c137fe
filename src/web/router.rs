//! Router configuration.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    chat, create_chat, dashboard, join_chat, login, logout, register, send_message, AppState,
};
use super::middleware::create_cors_layer;

/// Create the application router.
///
/// Authentication is enforced per handler by the `AuthUser` extractor, so
/// public and protected routes share one router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let account_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout));

    let room_routes = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/create_chat", post(create_chat))
        .route("/join_chat", post(join_chat))
        .route("/chat/:room_id", get(chat))
        .route("/send_message", post(send_message));

    Router::new()
        .merge(account_routes)
        .merge(room_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
        .merge(create_health_router())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_router() {
        let response = create_health_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
