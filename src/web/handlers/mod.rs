//! HTTP handlers.

pub mod auth;
pub mod messages;
pub mod rooms;

pub use auth::*;
pub use messages::*;
pub use rooms::*;
