//! Category list and detail pages

use axum::{
    extract::{Path, State},
    response::Html,
};
use recipebox_common::db::{categories, recipes};

use super::layout::{escape_html, render_page};
use super::parse_id;
use super::recipes::recipe_table;
use crate::error::WebResult;
use crate::session::MaybeUser;
use crate::AppState;

/// GET /categories/
pub async fn category_list(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> WebResult<Html<String>> {
    let summaries = categories::list_category_summaries(&state.db).await?;

    let content = if summaries.is_empty() {
        "<p>No categories yet.</p>".to_string()
    } else {
        let rows: Vec<String> = summaries
            .iter()
            .map(|c| {
                format!(
                    r#"<tr><td><a href="/categories/{}/">{}</a></td><td>{}</td><td>{}</td></tr>"#,
                    c.id,
                    escape_html(&c.name),
                    escape_html(&c.description),
                    c.recipe_count
                )
            })
            .collect();
        format!(
            "<table>\n<tr><th>Category</th><th>Description</th><th>Recipes</th></tr>\n{}\n</table>",
            rows.join("\n")
        )
    };

    let body = format!("<h1>Categories</h1>\n{}", content);
    Ok(render_page("Categories", user.as_ref(), &body))
}

/// GET /categories/:id/
pub async fn category_detail(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> WebResult<Html<String>> {
    let id = parse_id(&id, "category")?;
    let category = categories::get_category(&state.db, id).await?;
    let members = recipes::list_recipes_in_category(&state.db, category.id).await?;

    let description = if category.description.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>\n", escape_html(&category.description))
    };

    let body = format!(
        "<h1>{}</h1>\n{}{}\n<p><a href=\"/categories/\">All categories</a></p>",
        escape_html(&category.name),
        description,
        recipe_table(&members)
    );

    Ok(render_page(&category.name, user.as_ref(), &body))
}
