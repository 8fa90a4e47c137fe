//! Message log for roomchat.

mod repository;
mod service;
mod types;

pub use repository::MessageRepository;
pub use service::MessageLog;
pub use types::{Message, MessageId, PostOutcome, MAX_CONTENT_LENGTH};
