//! Credential store: account creation and password verification.

use rand::Rng;
use tracing::{debug, info};

use crate::auth::{hash_password, validate_password, verify_password, PasswordError};
use crate::config::AccountsConfig;
use crate::db::{NewUser, User, UserId, UserRepository, DEFAULT_AVATAR};
use crate::{ChatError, Database, Result};

/// Maximum email length in characters.
pub const MAX_EMAIL_LENGTH: usize = 120;

/// Check the shape of an email address.
///
/// Emails are stored and compared exactly as given.
pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(ChatError::Validation("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(ChatError::Validation("email must contain '@'".to_string()));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ChatError::Validation(format!(
            "email must be at most {MAX_EMAIL_LENGTH} characters"
        )));
    }
    Ok(())
}

fn pick_avatar(avatars: &[String]) -> String {
    if avatars.is_empty() {
        return DEFAULT_AVATAR.to_string();
    }
    let index = rand::rng().random_range(0..avatars.len());
    avatars[index].clone()
}

/// User identity and password verification.
pub struct CredentialStore<'a> {
    db: &'a Database,
    accounts: &'a AccountsConfig,
}

impl<'a> CredentialStore<'a> {
    /// Create a credential store over the given database.
    pub fn new(db: &'a Database, accounts: &'a AccountsConfig) -> Self {
        Self { db, accounts }
    }

    /// Register a new account and return its id.
    ///
    /// A second registration of the same email fails with
    /// [`ChatError::DuplicateEmail`]; the check is the UNIQUE constraint, so
    /// concurrent registrations cannot both succeed.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserId> {
        validate_email(email)?;
        validate_password(
            password,
            self.accounts.min_password_length,
            self.accounts.max_password_length,
        )
        .map_err(|e| ChatError::Validation(e.to_string()))?;

        let password_hash = hash_password(password)?;
        let avatar = pick_avatar(&self.accounts.avatars);

        let user = UserRepository::new(self.db.pool())
            .create(&NewUser::new(email, password_hash).with_avatar(avatar))
            .await?;

        info!(user_id = user.id, "registered new account");
        Ok(user.id)
    }

    /// Verify an email/password pair.
    ///
    /// Unknown email and wrong password produce the same error. Presence is
    /// left untouched.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserId> {
        let user = UserRepository::new(self.db.pool())
            .get_by_email(email)
            .await?
            .filter(|user| user.is_active)
            .ok_or(ChatError::InvalidCredentials)?;

        match verify_password(password, &user.password_hash) {
            Ok(()) => Ok(user.id),
            Err(PasswordError::VerificationFailed) => {
                debug!(user_id = user.id, "password mismatch");
                Err(ChatError::InvalidCredentials)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Set the presence flag. Setting the current value again is a no-op.
    pub async fn set_online(&self, user_id: UserId, online: bool) -> Result<()> {
        let updated = UserRepository::new(self.db.pool())
            .set_online(user_id, online)
            .await?;
        if !updated {
            return Err(ChatError::NotFound("user".to_string()));
        }
        Ok(())
    }

    /// Get a user by id.
    pub async fn get_user(&self, user_id: UserId) -> Result<User> {
        UserRepository::new(self.db.pool())
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| ChatError::NotFound("user".to_string()))
    }
}
