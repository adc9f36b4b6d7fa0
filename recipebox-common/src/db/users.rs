//! User accounts

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::auth::{generate_salt, hash_password, validate_password, validate_username, verify_password};
use crate::{Error, Result};

/// Stored user row; credentials never leave this module except for verification
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub guid: String,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub guid: String,
    pub username: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            guid: record.guid,
            username: record.username,
        }
    }
}

pub async fn create_user(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    validate_username(username)?;
    validate_password(password)?;

    let guid = Uuid::new_v4().to_string();
    let salt = generate_salt();
    let hash = hash_password(password, &salt);

    sqlx::query(
        "INSERT INTO users (guid, username, password_hash, password_salt) VALUES (?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(username)
    .bind(&hash)
    .bind(&salt)
    .execute(pool)
    .await
    .map_err(|e| Error::from_insert(e, &format!("user '{}'", username)))?;

    info!("Created user '{}'", username);

    Ok(User {
        guid,
        username: username.to_string(),
    })
}

pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<UserRecord>> {
    let record = sqlx::query_as::<_, UserRecord>(
        "SELECT guid, username, password_hash, password_salt FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Check a username/password pair; `None` for unknown users and wrong passwords alike
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<Option<User>> {
    let Some(record) = find_user_by_username(pool, username).await? else {
        return Ok(None);
    };

    if verify_password(password, &record.password_salt, &record.password_hash) {
        Ok(Some(record.into()))
    } else {
        Ok(None)
    }
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT guid, username FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(users)
}
