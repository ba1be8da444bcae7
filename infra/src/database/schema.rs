//! Table definitions applied by `DatabasePool::run_migrations`.
//!
//! Every statement is idempotent. Identifiers are stored as `CHAR(36)`
//! hyphenated UUIDs; refresh tokens are stored only as SHA-256 hex digests.

pub const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id CHAR(36) NOT NULL PRIMARY KEY,
    email VARCHAR(256) NOT NULL,
    display_name VARCHAR(256) NULL,
    password_hash VARCHAR(128) NULL,
    created_at DATETIME(6) NOT NULL,
    UNIQUE KEY uq_users_email (email)
)
"#;

pub const CREATE_USER_ROLES: &str = r#"
CREATE TABLE IF NOT EXISTS user_roles (
    user_id CHAR(36) NOT NULL,
    role VARCHAR(64) NOT NULL,
    PRIMARY KEY (user_id, role),
    CONSTRAINT fk_user_roles_user FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
)
"#;

pub const CREATE_REFRESH_TOKENS: &str = r#"
CREATE TABLE IF NOT EXISTS refresh_tokens (
    id CHAR(36) NOT NULL PRIMARY KEY,
    user_id CHAR(36) NOT NULL,
    token_hash CHAR(64) NOT NULL,
    created_at DATETIME(6) NOT NULL,
    expires_at DATETIME(6) NOT NULL,
    is_revoked BOOLEAN NOT NULL DEFAULT FALSE,
    UNIQUE KEY uq_refresh_tokens_hash (token_hash),
    KEY ix_refresh_tokens_user (user_id),
    CONSTRAINT fk_refresh_tokens_user FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
)
"#;

pub const CREATE_TODO_ITEMS: &str = r#"
CREATE TABLE IF NOT EXISTS todo_items (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(1024) NOT NULL,
    is_completed BOOLEAN NOT NULL DEFAULT FALSE,
    owner_id CHAR(36) NOT NULL,
    created_at DATETIME(6) NOT NULL,
    KEY ix_todo_items_owner (owner_id),
    CONSTRAINT fk_todo_items_owner FOREIGN KEY (owner_id) REFERENCES users (id) ON DELETE CASCADE
)
"#;

/// In dependency order
pub const STATEMENTS: [&str; 4] = [
    CREATE_USERS,
    CREATE_USER_ROLES,
    CREATE_REFRESH_TOKENS,
    CREATE_TODO_ITEMS,
];
