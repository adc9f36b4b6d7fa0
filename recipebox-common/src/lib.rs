//! # Recipebox Common Library
//!
//! Shared code for the recipebox service and its command-line tools:
//! - Recipe and category models, difficulty classification
//! - Database initialization and repositories
//! - Password hashing and credential checks
//! - Configuration loading and root folder resolution

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{calculate_difficulty, parse_ingredients, Category, Difficulty, Recipe};
