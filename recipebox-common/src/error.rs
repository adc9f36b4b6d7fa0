//! Error type shared by the recipebox crates

use thiserror::Error;

/// Result alias used throughout recipebox-common
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Query or connection failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file unreadable or a value out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Recipe, category or user lookup came back empty
    #[error("Not found: {0}")]
    NotFound(String),

    /// Value rejected by model validation (lengths, ranges, choices)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unique constraint hit, e.g. a username that is already taken
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl Error {
    /// Map a sqlx error to `Conflict` when it is a unique-constraint violation
    pub fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Error::Conflict(format!("{} already exists", what))
            }
            _ => Error::Database(err),
        }
    }
}
