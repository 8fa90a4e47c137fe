//! Error types for roomchat.

use thiserror::Error;

use crate::auth::PasswordError;

/// Common error type for roomchat.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant unless a caller maps
    /// a specific constraint violation to a domain error first.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The email is already registered.
    #[error("email is already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// No room carries the given join code.
    #[error("chat room not found")]
    RoomNotFound,

    /// Caller is not a member of the room.
    #[error("access denied")]
    AccessDenied,

    /// No authenticated session.
    #[error("authentication required")]
    Unauthenticated,

    /// Password hashing error.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Session token could not be issued.
    #[error("token error: {0}")]
    Token(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),
}

impl From<sqlx::Error> for ChatError {
    fn from(e: sqlx::Error) -> Self {
        ChatError::Database(e.to_string())
    }
}

/// Result type alias for roomchat operations.
pub type Result<T> = std::result::Result<T, ChatError>;
