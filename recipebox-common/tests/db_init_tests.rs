//! Database initialization tests
//!
//! Covers automatic database creation, idempotent re-open and the schema
//! constraints the repositories rely on.

use recipebox_common::db::{init_database, init_memory_database, SCHEMA_VERSION};
use tempfile::TempDir;

async fn table_names(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_database_created_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("recipebox.db");

    let pool = init_database(&db_path).await;
    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_reopens_existing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("recipebox.db");

    let first = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO categories (name, description) VALUES ('Soup', '')")
        .execute(&first)
        .await
        .unwrap();
    first.close().await;

    let second = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&second)
        .await
        .unwrap();
    assert_eq!(count, 1, "Existing rows must survive re-initialization");
}

#[tokio::test]
async fn test_connection_settings_apply_to_every_connection() {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("recipebox.db")).await.unwrap();

    // hold both so the second is a distinct pooled connection
    let mut first = pool.acquire().await.unwrap();
    let mut second = pool.acquire().await.unwrap();

    for conn in [&mut first, &mut second] {
        let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(foreign_keys, 1);

        let busy_timeout: i64 = sqlx::query_scalar("PRAGMA busy_timeout")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(busy_timeout, 5000);

        let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }
}

#[tokio::test]
async fn test_schema_tables_exist() {
    let pool = init_memory_database().await.unwrap();
    let tables = table_names(&pool).await;

    for expected in ["categories", "recipes", "schema_version", "sessions", "users"] {
        assert!(tables.contains(&expected.to_string()), "missing table {}", expected);
    }

    let version: i64 = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
}

#[tokio::test]
async fn test_recipe_name_length_enforced_by_schema() {
    let pool = init_memory_database().await.unwrap();
    let long_name = "x".repeat(121);

    let result = sqlx::query(
        "INSERT INTO recipes (name, description, ingredients, cooking_time, difficulty)
         VALUES (?, 'd', 'egg', 5, 'Easy')",
    )
    .bind(&long_name)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "121-character name should violate CHECK constraint");
}

#[tokio::test]
async fn test_cooking_time_must_be_positive() {
    let pool = init_memory_database().await.unwrap();

    let result = sqlx::query(
        "INSERT INTO recipes (name, description, ingredients, cooking_time, difficulty)
         VALUES ('Toast', 'd', 'bread', 0, 'Easy')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err());
}
