//! Room handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::AppState;
use crate::room::RoomDirectory;
use crate::web::dto::{
    ApiResponse, CreateChatForm, DashboardResponse, JoinChatForm, JoinResponse, RoomInfo,
    UserInfo, ValidatedForm,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /dashboard - The caller and the rooms they belong to.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let user = state.credentials().get_user(auth.user_id).await?;
    let rooms = RoomDirectory::new(&state.db)
        .rooms_for_user(auth.user_id)
        .await?;

    Ok(Json(ApiResponse::new(DashboardResponse {
        user: UserInfo::from(&user),
        rooms: rooms.into_iter().map(RoomInfo::from).collect(),
    })))
}

/// POST /create_chat - Create a room owned by the caller.
pub async fn create_chat(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ValidatedForm(form): ValidatedForm<CreateChatForm>,
) -> Result<(StatusCode, Json<ApiResponse<RoomInfo>>), ApiError> {
    let room = RoomDirectory::new(&state.db)
        .create_room(&form.chat_name, form.is_private, auth.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RoomInfo::from(room))),
    ))
}

/// POST /join_chat - Join a private room by code.
///
/// Joining a room twice is not an error.
pub async fn join_chat(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ValidatedForm(form): ValidatedForm<JoinChatForm>,
) -> Result<Json<ApiResponse<JoinResponse>>, ApiError> {
    let outcome = RoomDirectory::new(&state.db)
        .join_by_code(&form.code, auth.user_id)
        .await?;

    Ok(Json(ApiResponse::new(JoinResponse::from(outcome))))
}
