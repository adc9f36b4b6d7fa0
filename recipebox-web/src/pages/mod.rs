//! HTML pages
//!
//! Every page is rendered server-side with `format!` into the shared layout.
//! Handlers return `WebResult` so failures render as HTML error pages.

use axum::{routing::get, Router};

use crate::{AppState, WebError};

pub mod auth;
pub mod categories;
pub mod home;
pub mod layout;
pub mod recipes;
pub mod search;

/// Routes reachable without logging in
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home_page))
        .route("/about/", get(home::about_page))
        .route("/login/", get(auth::login_form).post(auth::login))
        .route("/logout/", get(auth::logout).post(auth::logout))
        .route("/success/", get(auth::success_page))
        .route("/recipes/", get(recipes::recipe_overview))
        .route("/recipes/:id/", get(recipes::recipe_detail))
        .route("/categories/", get(categories::category_list))
        .route("/categories/:id/", get(categories::category_detail))
}

/// Fallback for unknown paths
pub async fn not_found() -> WebError {
    WebError::NotFound("The requested page does not exist.".to_string())
}

/// Parse a numeric path id; anything else is treated as a missing page
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64, WebError> {
    raw.parse::<i64>()
        .map_err(|_| WebError::NotFound(format!("No {} matches the given query.", what)))
}
