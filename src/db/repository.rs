//! User repository for roomchat.
//!
//! This module provides CRUD operations for users in the database.

use super::user::{NewUser, User, UserId};
use super::{is_unique_violation, DbPool};
use crate::{ChatError, Result};

const USER_COLUMNS: &str = "id, email, password_hash, avatar, online, is_active, created_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Email uniqueness is enforced by the schema; a conflicting insert is
    /// reported as [`ChatError::DuplicateEmail`].
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: UserId = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash, avatar) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.avatar)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ChatError::DuplicateEmail
            } else {
                ChatError::Database(e.to_string())
            }
        })?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ChatError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by email (exact match).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Set the presence flag.
    ///
    /// Returns false if the user does not exist.
    pub async fn set_online(&self, id: UserId, online: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET online = ? WHERE id = ?")
            .bind(online)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

}
