//! HTTP interface for roomchat.
//!
//! Form-encoded requests, JSON responses. Sessions travel as a bearer token
//! or the `session` cookie.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
