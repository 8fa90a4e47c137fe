//! Room directory: creation, join-by-code, and access checks.

use tracing::{debug, info, warn};

use super::code::generate_join_code;
use super::repository::RoomRepository;
use super::types::{JoinOutcome, Room, RoomId, MAX_ROOM_NAME_LENGTH};
use crate::db::{is_unique_violation, UserId};
use crate::{ChatError, Database, Result};

/// Attempts at drawing an unused join code before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 16;

/// Trim and check a room name.
pub fn validate_room_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ChatError::Validation("chat name is required".to_string()));
    }
    if name.chars().count() > MAX_ROOM_NAME_LENGTH {
        return Err(ChatError::Validation(format!(
            "chat name must be at most {MAX_ROOM_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

/// Room directory service.
pub struct RoomDirectory<'a> {
    db: &'a Database,
}

impl<'a> RoomDirectory<'a> {
    /// Create a new RoomDirectory.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> RoomRepository<'a> {
        RoomRepository::new(self.db.pool())
    }

    /// Create a room with the creator as its first member.
    ///
    /// Private rooms get a fresh join code. A code that loses a race to a
    /// concurrent insert is replaced and the insert retried.
    pub async fn create_room(
        &self,
        name: &str,
        is_private: bool,
        creator_id: UserId,
    ) -> Result<Room> {
        let name = validate_room_name(name)?;
        let repo = self.repo();

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = if is_private {
                let code = generate_join_code();
                if repo.code_exists(&code).await? {
                    debug!(attempt, "join code already taken, drawing again");
                    continue;
                }
                Some(code)
            } else {
                None
            };

            match self.insert_room(&name, code.as_deref(), creator_id).await {
                Ok(room_id) => {
                    let room = repo
                        .get_by_id(room_id)
                        .await?
                        .ok_or_else(|| ChatError::NotFound("room".to_string()))?;
                    info!(room_id, creator_id, is_private, "created chat room");
                    return Ok(room);
                }
                Err(e) if code.is_some() && is_unique_violation(&e) => {
                    warn!(attempt, "join code collided on insert, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ChatError::Database(format!(
            "no unused join code after {MAX_CODE_ATTEMPTS} attempts"
        )))
    }

    /// Insert a room and its creator membership in one transaction.
    async fn insert_room(
        &self,
        name: &str,
        code: Option<&str>,
        creator_id: UserId,
    ) -> std::result::Result<RoomId, sqlx::Error> {
        let mut tx = self.db.pool().begin().await?;

        let room_id: RoomId = sqlx::query_scalar(
            "INSERT INTO chat_rooms (name, is_private, code, created_by)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(code.is_some())
        .bind(code)
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO room_members (user_id, room_id) VALUES (?, ?)")
            .bind(creator_id)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(room_id)
    }

    /// Join the room carrying `code`. Surrounding whitespace is ignored.
    pub async fn join_by_code(&self, code: &str, user_id: UserId) -> Result<JoinOutcome> {
        let code = code.trim();
        let repo = self.repo();

        let room = repo
            .get_by_code(code)
            .await?
            .ok_or(ChatError::RoomNotFound)?;

        if repo.add_member(room.id, user_id).await? {
            info!(room_id = room.id, user_id, "user joined chat room");
            Ok(JoinOutcome::Joined(room))
        } else {
            Ok(JoinOutcome::AlreadyMember(room))
        }
    }

    /// Whether the user is a member of the room.
    pub async fn check_access(&self, room_id: RoomId, user_id: UserId) -> Result<bool> {
        self.repo().is_member(room_id, user_id).await
    }

    /// Fail with [`ChatError::AccessDenied`] unless the user is a member.
    ///
    /// Unknown rooms are reported the same way.
    pub async fn require_access(&self, room_id: RoomId, user_id: UserId) -> Result<()> {
        if self.check_access(room_id, user_id).await? {
            Ok(())
        } else {
            Err(ChatError::AccessDenied)
        }
    }

    /// Get a room the user belongs to.
    pub async fn get_room(&self, room_id: RoomId, user_id: UserId) -> Result<Room> {
        self.require_access(room_id, user_id).await?;
        self.repo()
            .get_by_id(room_id)
            .await?
            .ok_or(ChatError::AccessDenied)
    }

    /// Rooms the user belongs to, oldest first.
    pub async fn rooms_for_user(&self, user_id: UserId) -> Result<Vec<Room>> {
        self.repo().list_for_user(user_id).await
    }

    /// Member ids of a room.
    pub async fn members(&self, room_id: RoomId) -> Result<Vec<UserId>> {
        self.repo().member_ids(room_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::room::is_valid_join_code;

    async fn setup() -> (Database, UserId, UserId) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let a = users.create(&NewUser::new("a@example.com", "h")).await.unwrap();
        let b = users.create(&NewUser::new("b@example.com", "h")).await.unwrap();
        (db, a.id, b.id)
    }

    #[tokio::test]
    async fn test_create_private_room() {
        let (db, a, _) = setup().await;
        let rooms = RoomDirectory::new(&db);

        let room = rooms.create_room("  Team  ", true, a).await.unwrap();
        assert_eq!(room.name, "Team");
        assert!(room.is_private);
        assert!(is_valid_join_code(room.code.as_deref().unwrap()));
        assert_eq!(room.created_by, a);
        assert_eq!(rooms.members(room.id).await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn test_create_public_room_has_no_code() {
        let (db, a, _) = setup().await;
        let rooms = RoomDirectory::new(&db);

        let room = rooms.create_room("Lobby", false, a).await.unwrap();
        assert!(!room.is_private);
        assert!(room.code.is_none());
        assert!(rooms.check_access(room.id, a).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_room_validates_name() {
        let (db, a, _) = setup().await;
        let rooms = RoomDirectory::new(&db);

        assert!(matches!(
            rooms.create_room("   ", true, a).await,
            Err(ChatError::Validation(_))
        ));
        assert!(matches!(
            rooms.create_room(&"x".repeat(101), true, a).await,
            Err(ChatError::Validation(_))
        ));
        assert!(rooms.create_room(&"x".repeat(100), true, a).await.is_ok());
    }

    #[tokio::test]
    async fn test_room_names_are_not_unique() {
        let (db, a, _) = setup().await;
        let rooms = RoomDirectory::new(&db);

        let first = rooms.create_room("Team", true, a).await.unwrap();
        let second = rooms.create_room("Team", true, a).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_ne!(first.code, second.code);
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_no_room() {
        let (db, _, _) = setup().await;
        let rooms = RoomDirectory::new(&db);

        // Unknown creator violates the foreign key
        assert!(rooms.create_room("Ghost", true, 999).await.is_err());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_rooms")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_join_by_code_scenario() {
        let (db, a, b) = setup().await;
        let rooms = RoomDirectory::new(&db);

        let room = rooms.create_room("Team", true, a).await.unwrap();
        let code = room.code.clone().unwrap();

        let first = rooms.join_by_code(&code, b).await.unwrap();
        assert_eq!(first, JoinOutcome::Joined(room.clone()));

        let second = rooms.join_by_code(&code, b).await.unwrap();
        assert_eq!(second, JoinOutcome::AlreadyMember(room.clone()));
        assert!(!second.is_new());

        assert_eq!(rooms.members(room.id).await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_join_trims_code() {
        let (db, a, b) = setup().await;
        let rooms = RoomDirectory::new(&db);

        let room = rooms.create_room("Team", true, a).await.unwrap();
        let padded = format!(" {} ", room.code.unwrap());
        assert!(rooms.join_by_code(&padded, b).await.unwrap().is_new());
    }

    #[tokio::test]
    async fn test_join_unknown_code() {
        let (db, _, b) = setup().await;
        let rooms = RoomDirectory::new(&db);

        assert!(matches!(
            rooms.join_by_code("Nope42", b).await,
            Err(ChatError::RoomNotFound)
        ));
        assert!(matches!(
            rooms.join_by_code("", b).await,
            Err(ChatError::RoomNotFound)
        ));
    }

    #[tokio::test]
    async fn test_require_access() {
        let (db, a, b) = setup().await;
        let rooms = RoomDirectory::new(&db);
        let room = rooms.create_room("Team", true, a).await.unwrap();

        assert!(rooms.require_access(room.id, a).await.is_ok());
        assert!(matches!(
            rooms.require_access(room.id, b).await,
            Err(ChatError::AccessDenied)
        ));
        assert!(matches!(
            rooms.require_access(999, a).await,
            Err(ChatError::AccessDenied)
        ));
        assert!(matches!(
            rooms.get_room(room.id, b).await,
            Err(ChatError::AccessDenied)
        ));
        assert_eq!(rooms.get_room(room.id, a).await.unwrap(), room);
    }

    #[tokio::test]
    async fn test_rooms_for_user() {
        let (db, a, b) = setup().await;
        let rooms = RoomDirectory::new(&db);

        let team = rooms.create_room("Team", true, a).await.unwrap();
        let lobby = rooms.create_room("Lobby", false, a).await.unwrap();
        rooms
            .join_by_code(team.code.as_deref().unwrap(), b)
            .await
            .unwrap();

        assert_eq!(rooms.rooms_for_user(a).await.unwrap(), vec![team.clone(), lobby]);
        assert_eq!(rooms.rooms_for_user(b).await.unwrap(), vec![team]);
    }
}
