//! Room and membership repository.

use super::types::{Room, RoomId};
use crate::db::{DbPool, UserId};
use crate::Result;

const ROOM_COLUMNS: &str = "id, name, is_private, code, created_by, created_at";

/// Repository for rooms and memberships.
pub struct RoomRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> RoomRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Get a room by ID.
    pub async fn get_by_id(&self, id: RoomId) -> Result<Option<Room>> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM chat_rooms WHERE id = ?");
        let room = sqlx::query_as::<_, Room>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(room)
    }

    /// Get a room by join code (exact match).
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Room>> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM chat_rooms WHERE code = ?");
        let room = sqlx::query_as::<_, Room>(&sql)
            .bind(code)
            .fetch_optional(self.pool)
            .await?;
        Ok(room)
    }

    /// Check whether a join code is taken.
    pub async fn code_exists(&self, code: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM chat_rooms WHERE code = ?)")
                .bind(code)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }

    /// Check membership.
    pub async fn is_member(&self, room_id: RoomId, user_id: UserId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM room_members WHERE room_id = ? AND user_id = ?)",
        )
        .bind(room_id)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// Add a member. Returns false if the pair already existed.
    pub async fn add_member(&self, room_id: RoomId, user_id: UserId) -> Result<bool> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO room_members (user_id, room_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(room_id)
                .execute(self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the rooms a user belongs to, oldest first.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT r.id, r.name, r.is_private, r.code, r.created_by, r.created_at
             FROM chat_rooms r
             JOIN room_members m ON m.room_id = r.id
             WHERE m.user_id = ?
             ORDER BY r.created_at ASC, r.id ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rooms)
    }

    /// List member ids of a room in ascending order.
    pub async fn member_ids(&self, room_id: RoomId) -> Result<Vec<UserId>> {
        let ids: Vec<UserId> = sqlx::query_scalar(
            "SELECT user_id FROM room_members WHERE room_id = ? ORDER BY user_id",
        )
        .bind(room_id)
        .fetch_all(self.pool)
        .await?;
        Ok(ids)
    }
}
