//! Message repository.

use super::types::{Message, MessageId};
use crate::db::{DbPool, UserId};
use crate::room::RoomId;
use crate::Result;

const MESSAGE_SELECT: &str = "SELECT m.id, m.room_id, m.user_id,
            u.email AS author_email, u.avatar AS author_avatar,
            m.content, m.created_at
     FROM messages m
     JOIN users u ON u.id = m.user_id";

/// Repository for messages.
pub struct MessageRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a message and return it with author fields.
    pub async fn insert(
        &self,
        room_id: RoomId,
        user_id: UserId,
        content: &str,
        created_at: &str,
    ) -> Result<Message> {
        let id: MessageId = sqlx::query_scalar(
            "INSERT INTO messages (content, created_at, user_id, room_id)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(content)
        .bind(created_at)
        .bind(user_id)
        .bind(room_id)
        .fetch_one(self.pool)
        .await?;

        let sql = format!("{MESSAGE_SELECT} WHERE m.id = ?");
        let message = sqlx::query_as::<_, Message>(&sql)
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(message)
    }

    /// List all messages of a room in chronological order.
    ///
    /// Ties on the timestamp are broken by insertion order.
    pub async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Message>> {
        let sql = format!("{MESSAGE_SELECT} WHERE m.room_id = ? ORDER BY m.created_at ASC, m.id ASC");
        let messages = sqlx::query_as::<_, Message>(&sql)
            .bind(room_id)
            .fetch_all(self.pool)
            .await?;
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        UserRepository::new(db.pool())
            .create(&NewUser::new("a@example.com", "h").with_avatar("avatar2.png"))
            .await
            .unwrap();
        sqlx::query("INSERT INTO chat_rooms (name, created_by) VALUES ('Lobby', 1)")
            .execute(db.pool())
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_insert_carries_author() {
        let db = setup().await;
        let repo = MessageRepository::new(db.pool());

        let message = repo
            .insert(1, 1, "hello", "2024-01-01 10:00:00.000000")
            .await
            .unwrap();
        assert_eq!(message.content, "hello");
        assert_eq!(message.author_email, "a@example.com");
        assert_eq!(message.author_avatar, "avatar2.png");
        assert_eq!(message.created_at, "2024-01-01 10:00:00.000000");
    }

    #[tokio::test]
    async fn test_list_orders_by_time_then_id() {
        let db = setup().await;
        let repo = MessageRepository::new(db.pool());

        repo.insert(1, 1, "third", "2024-01-01 10:00:02.000000").await.unwrap();
        repo.insert(1, 1, "first", "2024-01-01 10:00:01.000000").await.unwrap();
        repo.insert(1, 1, "second", "2024-01-01 10:00:01.000000").await.unwrap();

        let contents: Vec<_> = repo
            .list_by_room(1)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert!(repo.list_by_room(2).await.unwrap().is_empty());
    }
}
