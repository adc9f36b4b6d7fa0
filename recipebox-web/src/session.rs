//! Cookie sessions and login enforcement
//!
//! `load_user` runs on every request: it resolves the `recipebox_session`
//! cookie to a user and stores the user in request extensions. Handlers read
//! it back through the `MaybeUser` / `CurrentUser` extractors.
//! `require_login` guards protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use recipebox_common::db::{sessions, User};
use tracing::warn;

use crate::{ApiError, AppState};

/// Session cookie name
pub const SESSION_COOKIE: &str = "recipebox_session";

/// Where a successful login lands when no usable `next` was given
pub const DEFAULT_LOGIN_REDIRECT: &str = "/recipes/";

/// Extract the session token from the request's `Cookie` headers
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str, ttl_hours: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl_hours.saturating_mul(3600)
    )
}

/// `Set-Cookie` value that removes the session cookie
pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Accept only same-site relative paths as post-login redirect targets
///
/// # Examples
/// ```
/// use recipebox_web::session::is_safe_redirect;
///
/// assert!(is_safe_redirect("/recipes/3/"));
/// assert!(!is_safe_redirect("//evil.example"));
/// assert!(!is_safe_redirect("https://evil.example/"));
/// ```
pub fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control)
}

/// Resolve a requested `next` value to a safe redirect target
pub fn redirect_target(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(target) if is_safe_redirect(target) => target.to_string(),
        _ => DEFAULT_LOGIN_REDIRECT.to_string(),
    }
}

/// Login URL that returns to `path_and_query` afterwards
pub fn login_url(path_and_query: &str) -> String {
    format!("/login/?next={}", urlencoding::encode(path_and_query))
}

/// Resolve the session cookie to a user for every request
pub async fn load_user(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(token) = session_token(request.headers()) {
        match sessions::find_session_user(&state.db, &token).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(user);
            }
            Ok(None) => {}
            Err(e) => warn!("Session lookup failed: {}", e),
        }
    }

    next.run(request).await
}

/// Send anonymous visitors to the login page, or 401 for JSON routes
pub async fn require_login(request: Request, next: Next) -> Response {
    if request.extensions().get::<User>().is_some() {
        return next.run(request).await;
    }

    let uri = request.uri();
    if uri.path().starts_with("/api/") {
        return ApiError::Unauthorized.into_response();
    }

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    Redirect::to(&login_url(path_and_query)).into_response()
}

/// The logged-in user, if any
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<User>().cloned()))
    }
}

/// The logged-in user; only valid on routes behind `require_login`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<User>() {
            Some(user) => Ok(CurrentUser(user.clone())),
            None => {
                let path_and_query = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or_else(|| parts.uri.path());
                Err(Redirect::to(&login_url(path_and_query)).into_response())
            }
        }
    }
}
