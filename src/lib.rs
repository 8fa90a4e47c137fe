//! roomchat - multi-room chat service
//!
//! Users register and log in, create public rooms or private rooms protected
//! by a 6-character join code, and exchange persisted messages. Every read
//! and write of a room's messages is gated on membership.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod message;
pub mod room;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, Caller, CredentialStore, IssuedSession,
    PasswordError, SessionGateway, TokenKeys,
};
pub use config::Config;
pub use db::{Database, User, UserId};
pub use error::{ChatError, Result};
pub use message::{Message, MessageLog, PostOutcome};
pub use room::{JoinOutcome, Room, RoomDirectory, RoomId};
pub use web::{create_router, AppState, WebServer};
