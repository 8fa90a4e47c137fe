//! User model for roomchat.

/// User identifier.
pub type UserId = i64;

/// Default avatar when no avatar list is configured.
pub const DEFAULT_AVATAR: &str = "default.png";

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email (unique, compared as stored).
    pub email: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Avatar file name.
    pub avatar: String,
    /// Best-effort presence flag.
    ///
    /// Set at login and cleared at logout; never reconciled after a crash or
    /// an abandoned session, so treat it as eventually consistent.
    pub online: bool,
    /// Whether the account is active.
    pub is_active: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password_hash: String,
    /// Avatar file name.
    pub avatar: String,
}

impl NewUser {
    /// Create a new user with the default avatar.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            avatar: DEFAULT_AVATAR.to_string(),
        }
    }

    /// Set the avatar.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new("a@example.com", "hash");
        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.password_hash, "hash");
        assert_eq!(user.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn test_new_user_with_avatar() {
        let user = NewUser::new("a@example.com", "hash").with_avatar("avatar2.png");
        assert_eq!(user.avatar, "avatar2.png");
    }
}
