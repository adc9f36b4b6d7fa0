//! Server-side login sessions

use chrono::{Duration, SecondsFormat, Utc};
use sqlx::SqlitePool;

use super::users::User;
use crate::auth::generate_session_token;
use crate::Result;

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Create a session for `user_guid` and return its token
pub async fn create_session(pool: &SqlitePool, user_guid: &str, ttl_hours: i64) -> Result<String> {
    let token = generate_session_token();
    let now = Utc::now();
    let expires_at = now + Duration::hours(ttl_hours);

    sqlx::query("INSERT INTO sessions (token, user_guid, created_at, expires_at) VALUES (?, ?, ?, ?)")
        .bind(&token)
        .bind(user_guid)
        .bind(now.to_rfc3339_opts(SecondsFormat::Millis, true))
        .bind(expires_at.to_rfc3339_opts(SecondsFormat::Millis, true))
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a session token to its user, ignoring expired sessions
///
/// Timestamps are stored as fixed-width UTC RFC 3339 strings, so string
/// comparison matches chronological order.
pub async fn find_session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.guid, u.username
         FROM sessions s
         JOIN users u ON u.guid = s.user_guid
         WHERE s.token = ? AND s.expires_at > ?",
    )
    .bind(token)
    .bind(now_rfc3339())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove expired sessions, returning how many were deleted
pub async fn purge_expired_sessions(pool: &SqlitePool) -> Result<u64> {
    let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now_rfc3339())
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted)
}
