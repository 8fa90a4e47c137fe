//! Room directory for roomchat.
//!
//! Rooms are public or private. Private rooms carry a unique 6-character join
//! code; membership gates every read and write of a room's messages.

mod code;
mod repository;
mod service;
mod types;

pub use code::{generate_join_code, is_valid_join_code, JOIN_CODE_ALPHABET, JOIN_CODE_LENGTH};
pub use repository::RoomRepository;
pub use service::{validate_room_name, RoomDirectory, MAX_CODE_ATTEMPTS};
pub use types::{JoinOutcome, Room, RoomId, MAX_ROOM_NAME_LENGTH};
