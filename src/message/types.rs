//! Message types.

use crate::db::UserId;
use crate::room::RoomId;

/// Message identifier.
pub type MessageId = i64;

/// Maximum message length in characters.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// A stored message together with its author's display fields.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Message {
    /// Message ID.
    pub id: MessageId,
    /// Room the message belongs to.
    pub room_id: RoomId,
    /// Author.
    pub user_id: UserId,
    /// Author email.
    pub author_email: String,
    /// Author avatar file name.
    pub author_avatar: String,
    /// Trimmed message text.
    pub content: String,
    /// UTC timestamp with microseconds (`YYYY-MM-DD HH:MM:SS.ffffff`).
    pub created_at: String,
}

/// Outcome of posting a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// The message was stored.
    Posted(Message),
    /// Content was blank; nothing was stored.
    Ignored,
}
