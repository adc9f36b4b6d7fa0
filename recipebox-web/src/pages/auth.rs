//! Login, logout and the logged-out confirmation page

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use recipebox_common::db::{sessions, users, User};
use serde::Deserialize;
use tracing::{info, warn};

use super::layout::{escape_html, render_page};
use crate::error::WebResult;
use crate::session::{self, MaybeUser};
use crate::AppState;

/// Shown for unknown users and wrong passwords alike
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password.";

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

fn login_page(next: &str, username: &str, error: Option<&str>, user: Option<&User>) -> Html<String> {
    let error_html = error
        .map(|message| format!(r#"<p class="errors">{}</p>"#, escape_html(message)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Log in</h1>
{error}
<form method="post" action="/login/">
    <input type="hidden" name="next" value="{next}">
    <p><label for="id_username">Username</label>
       <input type="text" id="id_username" name="username" value="{username}" maxlength="150" autofocus required></p>
    <p><label for="id_password">Password</label>
       <input type="password" id="id_password" name="password" required></p>
    <p><button class="button" type="submit">Log in</button></p>
</form>"#,
        error = error_html,
        next = escape_html(next),
        username = escape_html(username),
    );

    render_page("Log in", user, &body)
}

/// GET /login/
pub async fn login_form(MaybeUser(user): MaybeUser, Query(query): Query<NextQuery>) -> Html<String> {
    let next = session::redirect_target(query.next.as_deref());
    login_page(&next, "", None, user.as_ref())
}

/// POST /login/
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> WebResult<Response> {
    let next = session::redirect_target(form.next.as_deref());
    let username = form.username.trim();

    let user = match users::authenticate(&state.db, username, &form.password).await? {
        Some(user) => user,
        None => {
            warn!("Failed login attempt for '{}'", username);
            return Ok(login_page(&next, username, Some(LOGIN_FAILED_MESSAGE), None).into_response());
        }
    };

    let token = sessions::create_session(&state.db, &user.guid, state.session_ttl_hours).await?;
    info!("User '{}' logged in", user.username);

    Ok((
        [(header::SET_COOKIE, session::session_cookie(&token, state.session_ttl_hours))],
        Redirect::to(&next),
    )
        .into_response())
}

/// GET or POST /logout/
pub async fn logout(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
) -> WebResult<Response> {
    if let Some(token) = session::session_token(&headers) {
        sessions::delete_session(&state.db, &token).await?;
    }
    if let Some(user) = user {
        info!("User '{}' logged out", user.username);
    }

    Ok((
        [(header::SET_COOKIE, session::expired_session_cookie())],
        Redirect::to("/success/"),
    )
        .into_response())
}

/// GET /success/
pub async fn success_page(MaybeUser(user): MaybeUser) -> Html<String> {
    let body = r#"<h1>You have been logged out</h1>
<p>Thanks for visiting Recipebox.</p>
<p><a class="button" href="/login/">Log in again</a> <a href="/recipes/">Keep browsing recipes</a></p>"#;

    render_page("Logged out", user.as_ref(), body)
}
