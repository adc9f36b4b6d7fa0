//! Error types for recipebox-web
//!
//! `WebError` renders an HTML error page for browser routes; `ApiError`
//! renders a JSON body for `/api/*` routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::pages::layout;

/// Error returned by HTML page handlers
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(#[from] crate::charts::ChartError),

    #[error(transparent)]
    Common(#[from] recipebox_common::Error),
}

impl WebError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            WebError::Common(recipebox_common::Error::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, format!("No {} found", msg))
            }
            WebError::Common(recipebox_common::Error::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            WebError::Chart(_) | WebError::Common(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong while handling this request.".to_string(),
            ),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let title = match status {
            StatusCode::NOT_FOUND => "Not found",
            StatusCode::BAD_REQUEST => "Bad request",
            _ => "Server error",
        };
        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/recipes/\">Back to all recipes</a></p>",
            title,
            layout::escape_html(&message)
        );

        (status, layout::render_page(title, None, &body)).into_response()
    }
}

/// Result type for HTML handlers
pub type WebResult<T> = Result<T, WebError>;

/// Error returned by JSON handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Chart error: {0}")]
    Chart(#[from] crate::charts::ChartError),

    #[error(transparent)]
    Common(#[from] recipebox_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            ApiError::Common(recipebox_common::Error::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            ApiError::Common(recipebox_common::Error::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Chart(err) => {
                error!("API chart rendering failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "CHART_ERROR", err.to_string())
            }
            ApiError::Common(ref err) => {
                error!("API request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    err.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
