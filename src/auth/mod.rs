//! Authentication module for roomchat.
//!
//! This module provides password hashing, the credential store, and the
//! session gateway.

mod credentials;
mod password;
mod session;

pub use credentials::{validate_email, CredentialStore, MAX_EMAIL_LENGTH};
pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use session::{Caller, IssuedSession, SessionClaims, SessionGateway, TokenKeys};
