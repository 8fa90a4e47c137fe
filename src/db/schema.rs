//! Database schema and migrations for roomchat.
//!
//! Migrations are applied in order; the schema_version table records which
//! ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    email           TEXT NOT NULL UNIQUE,
    password_hash   TEXT NOT NULL,           -- Argon2 PHC string
    avatar          TEXT NOT NULL DEFAULT 'default.png',
    online          INTEGER NOT NULL DEFAULT 0,
    is_active       INTEGER NOT NULL DEFAULT 1,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: chat rooms and membership
    r#"
CREATE TABLE chat_rooms (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    is_private  INTEGER NOT NULL DEFAULT 0,
    code        TEXT UNIQUE,                 -- join code, private rooms only
    created_by  INTEGER NOT NULL REFERENCES users(id),
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    CHECK ((is_private = 1 AND code IS NOT NULL) OR (is_private = 0 AND code IS NULL))
);

CREATE TABLE room_members (
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    room_id     INTEGER NOT NULL REFERENCES chat_rooms(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, room_id)
);

CREATE INDEX idx_room_members_room_id ON room_members(room_id);
"#,
    // v3: messages
    r#"
CREATE TABLE messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL,               -- fixed-width microsecond UTC
    user_id     INTEGER NOT NULL REFERENCES users(id),
    room_id     INTEGER NOT NULL REFERENCES chat_rooms(id) ON DELETE CASCADE
);

CREATE INDEX idx_messages_room_created ON messages(room_id, created_at, id);
"#,
    // v4: login sessions
    r#"
CREATE TABLE sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    token_id    TEXT NOT NULL UNIQUE,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    revoked_at  TEXT
);

CREATE INDEX idx_sessions_user_id ON sessions(user_id);
"#,
];
