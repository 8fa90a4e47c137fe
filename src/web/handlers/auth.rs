//! Account and session handlers.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::auth::{CredentialStore, SessionGateway, TokenKeys};
use crate::config::{AccountsConfig, WebConfig};
use crate::web::dto::{
    ApiResponse, LoginForm, LoginResponse, MessageResponse, RegisterForm, RegisterResponse,
    UserInfo, ValidatedForm,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, SESSION_COOKIE};
use crate::Database;

/// Database handle shared by handlers.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool.
    pub db: SharedDatabase,
    /// Session token keys.
    pub keys: TokenKeys,
    /// Account policy.
    pub accounts: AccountsConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: SharedDatabase, web: &WebConfig, accounts: AccountsConfig) -> Self {
        Self {
            db,
            keys: TokenKeys::new(&web.jwt_secret, web.session_expiry_secs),
            accounts,
        }
    }

    /// Session gateway over this state.
    pub fn gateway(&self) -> SessionGateway<'_> {
        SessionGateway::new(&self.db, &self.keys, &self.accounts)
    }

    /// Credential store over this state.
    pub fn credentials(&self) -> CredentialStore<'_> {
        CredentialStore::new(&self.db, &self.accounts)
    }
}

/// POST /register - Create an account.
///
/// Does not log the new user in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedForm(form): ValidatedForm<RegisterForm>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    if form.password != form.confirm_password {
        return Err(ApiError::unprocessable("Passwords do not match"));
    }

    let id = state
        .credentials()
        .register(&form.email, &form.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RegisterResponse {
            id,
            email: form.email,
        })),
    ))
}

/// POST /login - Verify credentials and open a session.
///
/// The token is returned in the body and set as an HTTP-only cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let issued = state.gateway().login(&form.email, &form.password).await?;

    let cookie = Cookie::build((SESSION_COOKIE, issued.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    let response = LoginResponse {
        token: issued.token,
        expires_in: issued.expires_in,
        user: UserInfo::from(&issued.user),
    };

    Ok((jar.add(cookie), Json(ApiResponse::new(response))))
}

/// GET /logout - Revoke the current session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.gateway().logout(&auth.token).await?;

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((
        jar,
        Json(ApiResponse::new(MessageResponse {
            message: "Logged out".to_string(),
        })),
    ))
}
