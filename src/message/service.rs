//! Message log: membership-gated append and chronological read.

use tracing::debug;

use super::repository::MessageRepository;
use super::types::{Message, PostOutcome, MAX_CONTENT_LENGTH};
use crate::datetime::now_db_timestamp;
use crate::db::UserId;
use crate::room::{RoomDirectory, RoomId};
use crate::{ChatError, Database, Result};

/// Message log service.
pub struct MessageLog<'a> {
    db: &'a Database,
}

impl<'a> MessageLog<'a> {
    /// Create a new MessageLog.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Append a message to a room.
    ///
    /// Content is stored as given. Blank content is not an error: it yields
    /// [`PostOutcome::Ignored`] and stores nothing.
    pub async fn post_message(
        &self,
        room_id: RoomId,
        user_id: UserId,
        content: &str,
    ) -> Result<PostOutcome> {
        RoomDirectory::new(self.db)
            .require_access(room_id, user_id)
            .await?;

        if content.trim().is_empty() {
            debug!(room_id, user_id, "ignoring blank message");
            return Ok(PostOutcome::Ignored);
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(ChatError::Validation(format!(
                "message must be at most {MAX_CONTENT_LENGTH} characters"
            )));
        }

        let message = MessageRepository::new(self.db.pool())
            .insert(room_id, user_id, content, &now_db_timestamp())
            .await?;
        debug!(room_id, user_id, message_id = message.id, "message posted");
        Ok(PostOutcome::Posted(message))
    }

    /// All messages of a room, oldest first.
    pub async fn list_messages(&self, room_id: RoomId, user_id: UserId) -> Result<Vec<Message>> {
        RoomDirectory::new(self.db)
            .require_access(room_id, user_id)
            .await?;
        MessageRepository::new(self.db.pool())
            .list_by_room(room_id)
            .await
    }
}
