//! JSON API handlers
//!
//! `/health` is public; the recipe endpoints sit behind `require_login`
//! and answer anonymous callers with a 401 JSON error.

pub mod health;
pub mod recipes;

pub use health::health_routes;
pub use recipes::{list_recipes, search_recipes};
