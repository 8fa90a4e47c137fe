//! Room types.

use crate::db::UserId;

/// Room identifier.
pub type RoomId = i64;

/// Maximum room name length in characters.
pub const MAX_ROOM_NAME_LENGTH: usize = 100;

/// A chat room.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Room {
    /// Room ID.
    pub id: RoomId,
    /// Display name (not unique).
    pub name: String,
    /// Whether the room is joined by code.
    pub is_private: bool,
    /// Join code, present iff the room is private.
    pub code: Option<String>,
    /// Creator.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: String,
}

/// Outcome of joining a room by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Membership was created.
    Joined(Room),
    /// The caller was already a member; nothing changed.
    AlreadyMember(Room),
}

impl JoinOutcome {
    /// The joined room.
    pub fn room(&self) -> &Room {
        match self {
            JoinOutcome::Joined(room) | JoinOutcome::AlreadyMember(room) => room,
        }
    }

    /// Whether a new membership was created.
    pub fn is_new(&self) -> bool {
        matches!(self, JoinOutcome::Joined(_))
    }
}
