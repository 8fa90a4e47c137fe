//! Message handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::message::MessageLog;
use crate::room::{RoomDirectory, RoomId};
use crate::web::dto::{
    ApiResponse, ChatResponse, MessageInfo, RoomInfo, SendMessageForm, SendMessageResponse,
    ValidatedForm,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /chat/{room_id} - Room header and full history, members only.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(room_id): Path<RoomId>,
) -> Result<Json<ApiResponse<ChatResponse>>, ApiError> {
    let rooms = RoomDirectory::new(&state.db);
    let room = rooms.get_room(room_id, auth.user_id).await?;
    let members = rooms.members(room_id).await?;
    let messages = MessageLog::new(&state.db)
        .list_messages(room_id, auth.user_id)
        .await?;

    Ok(Json(ApiResponse::new(ChatResponse {
        room: RoomInfo::from(room),
        members,
        messages: messages.into_iter().map(MessageInfo::from).collect(),
    })))
}

/// POST /send_message - Append a message, members only.
///
/// Blank content answers 200 with status `ignored`.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ValidatedForm(form): ValidatedForm<SendMessageForm>,
) -> Result<Json<ApiResponse<SendMessageResponse>>, ApiError> {
    let room_id = form
        .chat_id
        .ok_or_else(|| ApiError::unprocessable("Chat id is required"))?;
    let outcome = MessageLog::new(&state.db)
        .post_message(room_id, auth.user_id, &form.content)
        .await?;

    Ok(Json(ApiResponse::new(SendMessageResponse::from(outcome))))
}
