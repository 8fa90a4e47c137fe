//! Login session records backing issued session tokens.

use super::user::UserId;
use super::DbPool;
use crate::{ChatError, Result};

const SQL_NOW: &str = "datetime('now')";

/// Session record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    /// Row ID.
    pub id: i64,
    /// Token identifier carried in the token's `jti` claim.
    pub token_id: String,
    /// Owning user.
    pub user_id: UserId,
    /// Expiration timestamp (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub expires_at: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Revocation timestamp (None while the session is live).
    pub revoked_at: Option<String>,
}

/// New session for creation.
pub struct NewSession {
    /// Token identifier.
    pub token_id: String,
    /// Owning user.
    pub user_id: UserId,
    /// Expiration timestamp (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub expires_at: String,
}

/// Repository for session records.
pub struct SessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new session record.
    pub async fn create(&self, new_session: &NewSession) -> Result<SessionRecord> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO sessions (token_id, user_id, expires_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_session.token_id)
        .bind(new_session.user_id)
        .bind(&new_session.expires_at)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ChatError::NotFound("session".to_string()))
    }

    /// Get a session by row ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<SessionRecord>> {
        let session = sqlx::query_as::<_, SessionRecord>(
            "SELECT id, token_id, user_id, expires_at, created_at, revoked_at
             FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(session)
    }

    /// Get a live (unexpired, unrevoked) session by token identifier.
    pub async fn get_active(&self, token_id: &str) -> Result<Option<SessionRecord>> {
        let sql = format!(
            "SELECT id, token_id, user_id, expires_at, created_at, revoked_at
             FROM sessions
             WHERE token_id = ?
               AND revoked_at IS NULL
               AND expires_at > {SQL_NOW}"
        );
        let session = sqlx::query_as::<_, SessionRecord>(&sql)
            .bind(token_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(session)
    }

    /// Revoke a session. Returns false if it was unknown or already revoked.
    pub async fn revoke(&self, token_id: &str) -> Result<bool> {
        let sql = format!(
            "UPDATE sessions SET revoked_at = {SQL_NOW} WHERE token_id = ? AND revoked_at IS NULL"
        );
        let result = sqlx::query(&sql)
            .bind(token_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete expired and revoked sessions.
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let sql =
            format!("DELETE FROM sessions WHERE expires_at < {SQL_NOW} OR revoked_at IS NOT NULL");
        let result = sqlx::query(&sql).execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        UserRepository::new(db.pool())
            .create(&NewUser::new("session@example.com", "hash"))
            .await
            .unwrap();
        db
    }

    fn new_session(token_id: &str, expires_at: &str) -> NewSession {
        NewSession {
            token_id: token_id.to_string(),
            user_id: 1,
            expires_at: expires_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_active() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        let session = repo
            .create(&new_session("tok-1", "2099-12-31 23:59:59"))
            .await
            .unwrap();
        assert_eq!(session.user_id, 1);
        assert!(session.revoked_at.is_none());

        let active = repo.get_active("tok-1").await.unwrap().unwrap();
        assert_eq!(active.id, session.id);
        assert!(repo.get_active("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_inactive() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&new_session("old", "2000-01-01 00:00:00"))
            .await
            .unwrap();
        assert!(repo.get_active("old").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revoke() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&new_session("tok-2", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        assert!(repo.revoke("tok-2").await.unwrap());
        assert!(!repo.revoke("tok-2").await.unwrap());
        assert!(repo.get_active("tok-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&new_session("live", "2099-12-31 23:59:59"))
            .await
            .unwrap();
        repo.create(&new_session("expired", "2000-01-01 00:00:00"))
            .await
            .unwrap();
        repo.create(&new_session("revoked", "2099-12-31 23:59:59"))
            .await
            .unwrap();
        repo.revoke("revoked").await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 2);
        assert!(repo.get_active("live").await.unwrap().is_some());
    }
}
