//! Response DTOs.

use serde::Serialize;

use crate::datetime::to_rfc3339;
use crate::db::{User, UserId};
use crate::message::{Message, PostOutcome};
use crate::room::{JoinOutcome, Room};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

// ============================================================================
// Account DTOs
// ============================================================================

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: UserId,
    /// Email.
    pub email: String,
    /// Avatar file name.
    pub avatar: String,
    /// Best-effort presence flag.
    pub online: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            online: user.online,
        }
    }
}

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New user ID.
    pub id: UserId,
    /// Registered email.
    pub email: String,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token (JWT), also set as the `session` cookie.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Logged-in user.
    pub user: UserInfo,
}

// ============================================================================
// Room DTOs
// ============================================================================

/// Room information.
#[derive(Debug, Serialize)]
pub struct RoomInfo {
    /// Room ID.
    pub id: i64,
    /// Room name.
    pub name: String,
    /// Whether the room is private.
    pub is_private: bool,
    /// Join code (private rooms only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Creator.
    pub created_by: UserId,
    /// Creation time (RFC 3339).
    pub created_at: String,
}

impl From<Room> for RoomInfo {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            is_private: room.is_private,
            code: room.code,
            created_by: room.created_by,
            created_at: to_rfc3339(&room.created_at),
        }
    }
}

/// Dashboard: the caller and their rooms.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Caller.
    pub user: UserInfo,
    /// Rooms the caller belongs to, oldest first.
    pub rooms: Vec<RoomInfo>,
}

/// Join result.
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    /// `joined` or `already_member`.
    pub status: &'static str,
    /// The room.
    pub room: RoomInfo,
}

impl From<JoinOutcome> for JoinResponse {
    fn from(outcome: JoinOutcome) -> Self {
        match outcome {
            JoinOutcome::Joined(room) => Self {
                status: "joined",
                room: room.into(),
            },
            JoinOutcome::AlreadyMember(room) => Self {
                status: "already_member",
                room: room.into(),
            },
        }
    }
}

// ============================================================================
// Message DTOs
// ============================================================================

/// Message author.
#[derive(Debug, Serialize)]
pub struct AuthorInfo {
    /// User ID.
    pub id: UserId,
    /// Email.
    pub email: String,
    /// Avatar file name.
    pub avatar: String,
}

/// Message information.
#[derive(Debug, Serialize)]
pub struct MessageInfo {
    /// Message ID.
    pub id: i64,
    /// Room ID.
    pub room_id: i64,
    /// Text.
    pub content: String,
    /// Author.
    pub author: AuthorInfo,
    /// Post time (RFC 3339, microseconds).
    pub created_at: String,
}

impl From<Message> for MessageInfo {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            room_id: message.room_id,
            content: message.content,
            author: AuthorInfo {
                id: message.user_id,
                email: message.author_email,
                avatar: message.author_avatar,
            },
            created_at: to_rfc3339(&message.created_at),
        }
    }
}

/// Chat page: room header, members and full history.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The room.
    pub room: RoomInfo,
    /// Member user IDs.
    pub members: Vec<UserId>,
    /// Messages, oldest first.
    pub messages: Vec<MessageInfo>,
}

/// Send result.
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    /// `posted` or `ignored`.
    pub status: &'static str,
    /// The stored message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageInfo>,
}

impl From<PostOutcome> for SendMessageResponse {
    fn from(outcome: PostOutcome) -> Self {
        match outcome {
            PostOutcome::Posted(message) => Self {
                status: "posted",
                message: Some(message.into()),
            },
            PostOutcome::Ignored => Self {
                status: "ignored",
                message: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room {
            id: 1,
            name: "Team".to_string(),
            is_private: true,
            code: Some("Abc123".to_string()),
            created_by: 1,
            created_at: "2024-01-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_room_info_serialization() {
        let json = serde_json::to_value(RoomInfo::from(room())).unwrap();
        assert_eq!(json["code"], "Abc123");
        assert_eq!(json["created_at"], "2024-01-01T10:00:00Z");

        let public = Room {
            is_private: false,
            code: None,
            ..room()
        };
        let json = serde_json::to_value(RoomInfo::from(public)).unwrap();
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_join_response_status() {
        assert_eq!(JoinResponse::from(JoinOutcome::Joined(room())).status, "joined");
        assert_eq!(
            JoinResponse::from(JoinOutcome::AlreadyMember(room())).status,
            "already_member"
        );
    }

    #[test]
    fn test_send_message_response() {
        let ignored = serde_json::to_value(SendMessageResponse::from(PostOutcome::Ignored)).unwrap();
        assert_eq!(ignored["status"], "ignored");
        assert!(ignored.get("message").is_none());

        let posted = SendMessageResponse::from(PostOutcome::Posted(Message {
            id: 3,
            room_id: 1,
            user_id: 2,
            author_email: "b@example.com".to_string(),
            author_avatar: "avatar1.png".to_string(),
            content: "world".to_string(),
            created_at: "2024-01-01 10:00:00.123456".to_string(),
        }));
        let json = serde_json::to_value(posted).unwrap();
        assert_eq!(json["message"]["author"]["email"], "b@example.com");
        assert_eq!(json["message"]["created_at"], "2024-01-01T10:00:00.123456Z");
    }
}
