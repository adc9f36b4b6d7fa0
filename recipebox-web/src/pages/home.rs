//! Homepage and about page

use axum::{extract::State, response::Html};
use chrono::Utc;
use recipebox_common::db::recipes;

use super::layout::render_page;
use crate::error::WebResult;
use crate::session::MaybeUser;
use crate::AppState;

pub async fn home_page(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> WebResult<Html<String>> {
    let recipe_count = recipes::count_recipes(&state.db).await?;

    let greeting = match &user {
        Some(_) => r#"<p><a class="button" href="/recipes/search/">Search recipes</a>
<a class="button" href="/recipes/add/">Add a recipe</a></p>"#
            .to_string(),
        None => r#"<p><a class="button" href="/login/">Log in</a> to search and add recipes.</p>"#
            .to_string(),
    };

    let body = format!(
        r#"<h1>Welcome to Recipebox</h1>
<p>Browse, search and share recipes. Every recipe is rated Easy, Medium,
Intermediate or Hard from its cooking time and the number of ingredients.</p>
<p>The collection currently holds <strong>{}</strong> recipe{}.
<a href="/recipes/">Browse all recipes</a>.</p>
{}"#,
        recipe_count,
        if recipe_count == 1 { "" } else { "s" },
        greeting
    );

    Ok(render_page("Home", user.as_ref(), &body))
}

pub async fn about_page(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Html<String> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);

    let body = format!(
        r#"<h1>About Recipebox</h1>
<p>Recipebox keeps a shared collection of recipes organized by category.
Anyone can browse recipes; logged-in users can search, chart results and
add new recipes.</p>
<h2>Difficulty</h2>
<table>
<tr><th></th><th>Fewer than 4 ingredients</th><th>4 or more ingredients</th></tr>
<tr><th>Under 10 minutes</th><td>Easy</td><td>Medium</td></tr>
<tr><th>10 minutes or more</th><td>Intermediate</td><td>Hard</td></tr>
</table>
<h2>Build</h2>
<p><small>Version {} | Build {} ({}) | Built {} | Up {} s</small></p>"#,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP"),
        uptime.num_seconds().max(0)
    );

    render_page("About", user.as_ref(), &body)
}
