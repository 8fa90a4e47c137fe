//! Configuration module for roomchat.

use serde::Deserialize;
use std::path::Path;

use crate::{ChatError, Result};

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Secret used to sign session tokens (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_expiry")]
    pub session_expiry_secs: u64,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    5000
}

/// Longest session lifetime accepted by [`Config::validate`] (ten years).
pub const MAX_SESSION_EXPIRY_SECS: u64 = 10 * 365 * 86_400;

fn default_session_expiry() -> u64 {
    86_400 // 1 day
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            jwt_secret: String::new(),
            session_expiry_secs: default_session_expiry(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/roomchat.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file, appended to across restarts. Empty disables file logging.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/roomchat.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Account configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsConfig {
    /// Avatar file names handed out at random on registration.
    #[serde(default = "default_avatars")]
    pub avatars: Vec<String>,
    /// Minimum password length in characters.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Maximum password length in characters.
    #[serde(default = "default_max_password_length")]
    pub max_password_length: usize,
}

fn default_avatars() -> Vec<String> {
    (1..=4).map(|i| format!("avatar{i}.png")).collect()
}

fn default_min_password_length() -> usize {
    8
}

fn default_max_password_length() -> usize {
    128
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            avatars: default_avatars(),
            min_password_length: default_min_password_length(),
            max_password_length: default_max_password_length(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web server configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Account configuration.
    #[serde(default)]
    pub accounts: AccountsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ChatError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ChatError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ROOMCHAT_JWT_SECRET`: Override the session signing secret
    /// - `ROOMCHAT_DATABASE_PATH`: Override the database path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("ROOMCHAT_JWT_SECRET") {
            if !secret.is_empty() {
                self.web.jwt_secret = secret;
            }
        }
        if let Ok(path) = std::env::var("ROOMCHAT_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.web.jwt_secret.is_empty() {
            return Err(ChatError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via ROOMCHAT_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.web.session_expiry_secs == 0
            || self.web.session_expiry_secs > MAX_SESSION_EXPIRY_SECS
        {
            return Err(ChatError::Config(format!(
                "session_expiry_secs must be between 1 and {MAX_SESSION_EXPIRY_SECS}, got {}",
                self.web.session_expiry_secs
            )));
        }
        if self.accounts.min_password_length == 0
            || self.accounts.min_password_length > self.accounts.max_password_length
        {
            return Err(ChatError::Config(format!(
                "invalid password length bounds: {}..={}",
                self.accounts.min_password_length, self.accounts.max_password_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 5000);
        assert!(config.web.cors_origins.is_empty());
        assert!(config.web.jwt_secret.is_empty());
        assert_eq!(config.web.session_expiry_secs, 86_400);

        assert_eq!(config.database.path, "data/roomchat.db");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/roomchat.log");

        assert_eq!(
            config.accounts.avatars,
            vec!["avatar1.png", "avatar2.png", "avatar3.png", "avatar4.png"]
        );
        assert_eq!(config.accounts.min_password_length, 8);
        assert_eq!(config.accounts.max_password_length, 128);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[web]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:3000"]
jwt_secret = "test-secret-key"
session_expiry_secs = 600

[database]
path = "custom/chat.sqlite"

[logging]
level = "debug"
file = "custom/logs/app.log"

[accounts]
avatars = ["cat.png", "dog.png"]
min_password_length = 10
max_password_length = 64
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.web.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.web.jwt_secret, "test-secret-key");
        assert_eq!(config.web.session_expiry_secs, 600);

        assert_eq!(config.database.path, "custom/chat.sqlite");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");

        assert_eq!(config.accounts.avatars, vec!["cat.png", "dog.png"]);
        assert_eq!(config.accounts.min_password_length, 10);
        assert_eq!(config.accounts.max_password_length, 64);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[web]
port = 8081
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.web.port, 8081);
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/roomchat.db");
        assert_eq!(config.accounts.min_password_length, 8);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.web.port, 5000);
        assert_eq!(config.database.path, "data/roomchat.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(ChatError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(ChatError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[web]\njwt_secret = \"from-file\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.web.jwt_secret, "from-file");
    }

    #[test]
    fn test_apply_env_overrides() {
        let original = std::env::var("ROOMCHAT_JWT_SECRET").ok();

        std::env::set_var("ROOMCHAT_JWT_SECRET", "env-secret-key");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.web.jwt_secret, "env-secret-key");

        // Empty values leave the configured secret untouched
        std::env::set_var("ROOMCHAT_JWT_SECRET", "");
        let mut config = Config::default();
        config.web.jwt_secret = "original-secret".to_string();
        config.apply_env_overrides();
        assert_eq!(config.web.jwt_secret, "original-secret");

        if let Some(val) = original {
            std::env::set_var("ROOMCHAT_JWT_SECRET", val);
        } else {
            std::env::remove_var("ROOMCHAT_JWT_SECRET");
        }
    }

    #[test]
    fn test_validate_missing_secret() {
        let config = Config::default();
        let result = config.validate();
        assert!(matches!(result, Err(ChatError::Config(ref msg)) if msg.contains("jwt_secret")));
    }

    #[test]
    fn test_validate_password_bounds() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();
        assert!(config.validate().is_ok());

        config.accounts.min_password_length = 20;
        config.accounts.max_password_length = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_session_expiry_bounds() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();

        config.web.session_expiry_secs = MAX_SESSION_EXPIRY_SECS;
        assert!(config.validate().is_ok());

        for bad in [0, MAX_SESSION_EXPIRY_SECS + 1, u64::MAX] {
            config.web.session_expiry_secs = bad;
            assert!(
                matches!(config.validate(), Err(ChatError::Config(ref msg)) if msg.contains("session_expiry_secs")),
                "{bad}"
            );
        }
    }
}
