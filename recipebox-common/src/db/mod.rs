//! Database initialization and repositories

pub mod categories;
pub mod init;
pub mod recipes;
pub mod sessions;
pub mod users;

pub use init::{init_database, init_memory_database, SCHEMA_VERSION};
pub use recipes::RecipeFilter;
pub use users::User;
