//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::{AccountsConfig, WebConfig};
use crate::db::SessionRepository;
use crate::{ChatError, Database, Result};

use super::handlers::{AppState, SharedDatabase};
use super::router::create_router;

/// Interval between sweeps of expired and revoked sessions.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Web server for the chat API.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &WebConfig, accounts: AccountsConfig, db: SharedDatabase) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| {
                ChatError::Config(format!(
                    "invalid listen address {}:{}: {e}",
                    config.host, config.port
                ))
            })?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(db, config, accounts)),
            cors_origins: config.cors_origins.clone(),
        })
    }

    /// Create a new web server from a raw Database.
    pub fn from_database(
        config: &WebConfig,
        accounts: AccountsConfig,
        db: Database,
    ) -> Result<Self> {
        Self::new(config, accounts, Arc::new(db))
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Periodically delete expired and revoked session rows.
    fn start_session_cleanup_task(db: SharedDatabase) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                match SessionRepository::new(db.pool()).cleanup_expired().await {
                    Ok(0) => tracing::debug!("No expired sessions to clean up"),
                    Ok(count) => {
                        tracing::info!(deleted_count = count, "Cleaned up expired/revoked sessions")
                    }
                    Err(e) => tracing::warn!(error = %e, "Failed to clean up sessions"),
                }
            }
        });
    }

    async fn bind(self) -> std::io::Result<(TcpListener, Router)> {
        let db = self.app_state.db.clone();
        let router =
            create_router(self.app_state, &self.cors_origins).layer(CompressionLayer::new());

        let listener = TcpListener::bind(self.addr).await?;

        // Start the sweeper only once the listener is bound
        Self::start_session_cleanup_task(db);
        tracing::info!("Session cleanup task started (runs every hour)");
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);

        Ok((listener, router))
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> std::io::Result<()> {
        let (listener, router) = self.bind().await?;
        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the bound address.
    ///
    /// Useful for tests that bind to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let (listener, router) = self.bind().await?;
        let local_addr = listener.local_addr()?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn create_test_config() -> WebConfig {
        WebConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "test-secret-key".to_string(),
            ..WebConfig::default()
        }
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let db = Database::open_in_memory().await.unwrap();
        let server =
            WebServer::from_database(&create_test_config(), AccountsConfig::default(), db)
                .unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_rejects_bad_address() {
        let db = Database::open_in_memory().await.unwrap();
        let config = WebConfig {
            host: "not an address".to_string(),
            ..create_test_config()
        };
        let result = WebServer::from_database(&config, AccountsConfig::default(), db);
        assert!(matches!(result, Err(ChatError::Config(_))));
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let db = Database::open_in_memory().await.unwrap();
        let server =
            WebServer::from_database(&create_test_config(), AccountsConfig::default(), db)
                .unwrap();
        let addr = server.run_with_addr().await.unwrap();

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        // Compression makes the body chunked
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("\r\nOK\r\n"));
    }
}
