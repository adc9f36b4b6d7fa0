//! recipebox-web library
//!
//! HTTP service for browsing, searching and adding recipes. Pages are
//! rendered server-side; search results can carry an SVG chart.

use axum::Router;
use chrono::{DateTime, Utc};
use recipebox_common::config::ServiceConfig;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod charts;
pub mod error;
pub mod forms;
pub mod logging;
pub mod pages;
pub mod pagination;
pub mod search;
pub mod session;

pub use crate::error::{ApiError, WebError};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Lifetime of a login session
    pub session_ttl_hours: i64,
    /// Rows per page on the recipe overview and JSON listing
    pub page_size: i64,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, session_ttl_hours: i64, page_size: i64) -> Self {
        Self {
            db,
            session_ttl_hours,
            page_size,
            startup_time: Utc::now(),
        }
    }

    pub fn from_config(db: SqlitePool, config: &ServiceConfig) -> Self {
        Self::new(db, config.session_ttl_hours, config.page_size)
    }
}

/// Build application router
///
/// Every request passes through `session::load_user`; routes that need a
/// logged-in user additionally pass through `session::require_login`.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    let protected = Router::new()
        .route("/recipes/add/", get(pages::recipes::add_recipe_form).post(pages::recipes::add_recipe))
        .route("/recipes/search/", get(pages::search::search_page))
        .route("/api/recipes", get(api::list_recipes))
        .route("/api/recipes/search", get(api::search_recipes))
        .route_layer(middleware::from_fn(session::require_login));

    let public = Router::new()
        .merge(pages::public_routes())
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), session::load_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
