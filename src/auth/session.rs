//! Session gateway.
//!
//! Maps a presented session token to a caller identity. Tokens are HS256 JWTs
//! whose `jti` names a row in the `sessions` table, so a logout revokes the
//! token server-side even before it expires.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::CredentialStore;
use crate::config::AccountsConfig;
use crate::datetime::DB_SECONDS_FORMAT;
use crate::db::{NewSession, SessionRepository, User, UserId};
use crate::{ChatError, Database, Result};

/// Who is making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// No valid session.
    Anonymous,
    /// Logged-in user.
    Authenticated(UserId),
}

impl Caller {
    /// The user id, if authenticated.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(id) => Some(*id),
        }
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID).
    pub sub: UserId,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// Session row identifier.
    pub jti: String,
}

/// Signing and verification keys for session tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry_secs: u64,
}

impl TokenKeys {
    /// Build keys from a shared secret.
    pub fn new(secret: &str, expiry_secs: u64) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_secs,
        }
    }

    /// Token lifetime in seconds.
    pub fn expiry_secs(&self) -> u64 {
        self.expiry_secs
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| ChatError::Token(e.to_string()))
    }

    fn verify(&self, token: &str) -> Option<SessionClaims> {
        match decode::<SessionClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!("session token rejected: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Signed session token.
    pub token: String,
    /// The logged-in user.
    pub user: User,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Authenticates callers and issues/revokes sessions.
pub struct SessionGateway<'a> {
    db: &'a Database,
    keys: &'a TokenKeys,
    accounts: &'a AccountsConfig,
}

impl<'a> SessionGateway<'a> {
    /// Create a gateway.
    pub fn new(db: &'a Database, keys: &'a TokenKeys, accounts: &'a AccountsConfig) -> Self {
        Self { db, keys, accounts }
    }

    fn credentials(&self) -> CredentialStore<'a> {
        CredentialStore::new(self.db, self.accounts)
    }

    /// Verify credentials, mark the user online and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession> {
        let credentials = self.credentials();
        let user_id = credentials.authenticate(email, password).await?;

        let now = Utc::now();
        let expires_at = i64::try_from(self.keys.expiry_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ChatError::Config(format!(
                    "session lifetime of {}s is out of range",
                    self.keys.expiry_secs
                ))
            })?;
        let token_id = Uuid::new_v4().to_string();

        SessionRepository::new(self.db.pool())
            .create(&NewSession {
                token_id: token_id.clone(),
                user_id,
                expires_at: expires_at.format(DB_SECONDS_FORMAT).to_string(),
            })
            .await?;

        let token = self.keys.sign(&SessionClaims {
            sub: user_id,
            iat: now.timestamp() as u64,
            exp: expires_at.timestamp() as u64,
            jti: token_id,
        })?;

        credentials.set_online(user_id, true).await?;
        let user = credentials.get_user(user_id).await?;

        info!(user_id, "user logged in");
        Ok(IssuedSession {
            token,
            user,
            expires_in: self.keys.expiry_secs,
        })
    }

    /// Resolve a token to a caller.
    ///
    /// Bad signatures, expired tokens, and revoked or unknown sessions all
    /// resolve to [`Caller::Anonymous`].
    pub async fn resolve(&self, token: &str) -> Result<Caller> {
        let Some(claims) = self.keys.verify(token) else {
            return Ok(Caller::Anonymous);
        };

        let session = SessionRepository::new(self.db.pool())
            .get_active(&claims.jti)
            .await?;

        match session {
            Some(session) if session.user_id == claims.sub => {
                Ok(Caller::Authenticated(session.user_id))
            }
            _ => Ok(Caller::Anonymous),
        }
    }

    /// Resolve an optional token, failing with [`ChatError::Unauthenticated`]
    /// unless it names a live session.
    pub async fn require(&self, token: Option<&str>) -> Result<UserId> {
        let Some(token) = token else {
            return Err(ChatError::Unauthenticated);
        };
        self.resolve(token)
            .await?
            .user_id()
            .ok_or(ChatError::Unauthenticated)
    }

    /// Revoke the session behind a token and clear the user's presence.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let claims = self.keys.verify(token).ok_or(ChatError::Unauthenticated)?;

        let revoked = SessionRepository::new(self.db.pool())
            .revoke(&claims.jti)
            .await?;
        if !revoked {
            return Err(ChatError::Unauthenticated);
        }

        self.credentials().set_online(claims.sub, false).await?;
        info!(user_id = claims.sub, "user logged out");
        Ok(())
    }
}
