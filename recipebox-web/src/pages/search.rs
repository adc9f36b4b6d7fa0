//! Recipe search page: form, results table and optional chart

use axum::{
    extract::{Query, State},
    response::Html,
};
use recipebox_common::db::categories;
use recipebox_common::Difficulty;

use super::layout::{escape_html, field_errors, render_page, select_options};
use super::recipes::recipe_table;
use crate::error::WebResult;
use crate::forms::FieldError;
use crate::search::{run_search, ChartKind, SearchParams};
use crate::session::CurrentUser;
use crate::{AppState, WebError};

fn value(field: &Option<String>) -> String {
    escape_html(field.as_deref().unwrap_or(""))
}

async fn search_form(
    state: &AppState,
    params: &SearchParams,
    errors: &[FieldError],
) -> WebResult<String> {
    let mut difficulty_options = vec![(String::new(), "Any".to_string())];
    difficulty_options.extend(
        Difficulty::ALL
            .iter()
            .map(|d| (d.as_str().to_string(), d.as_str().to_string())),
    );

    let mut chart_options = vec![(String::new(), "No chart".to_string())];
    chart_options.extend(
        ChartKind::ALL
            .iter()
            .map(|kind| (kind.code().to_string(), kind.label().to_string())),
    );

    let mut category_options = vec![(String::new(), "Any".to_string())];
    category_options.extend(
        categories::list_categories(&state.db)
            .await?
            .into_iter()
            .map(|c| (c.id.to_string(), c.name)),
    );

    Ok(format!(
        r#"<form method="get" action="/recipes/search/">
    <p><label for="id_recipe_name">Recipe name contains</label>
       <input type="text" id="id_recipe_name" name="recipe_name" value="{recipe_name}" maxlength="120">{recipe_name_errors}</p>
    <p><label for="id_ingredient">Ingredient contains</label>
       <input type="text" id="id_ingredient" name="ingredient" value="{ingredient}" maxlength="120">{ingredient_errors}</p>
    <p><label for="id_max_cooking_time">Max cooking time (min)</label>
       <input type="number" id="id_max_cooking_time" name="max_cooking_time" value="{max_cooking_time}" min="1">{max_cooking_time_errors}</p>
    <p><label for="id_difficulty">Difficulty</label>
       <select id="id_difficulty" name="difficulty">
{difficulty_options}
       </select>{difficulty_errors}</p>
    <p><label for="id_category">Category</label>
       <select id="id_category" name="category">
{category_options}
       </select>{category_errors}</p>
    <p><label for="id_chart_type">Chart</label>
       <select id="id_chart_type" name="chart_type">
{chart_options}
       </select>{chart_type_errors}</p>
    <p><button class="button" type="submit">Search</button></p>
</form>"#,
        recipe_name = value(&params.recipe_name),
        recipe_name_errors = field_errors(errors, "recipe_name"),
        ingredient = value(&params.ingredient),
        ingredient_errors = field_errors(errors, "ingredient"),
        max_cooking_time = value(&params.max_cooking_time),
        max_cooking_time_errors = field_errors(errors, "max_cooking_time"),
        difficulty_options = select_options(
            &difficulty_options,
            params.difficulty.as_deref().unwrap_or("").trim()
        ),
        difficulty_errors = field_errors(errors, "difficulty"),
        category_options = select_options(
            &category_options,
            params.category.as_deref().unwrap_or("").trim()
        ),
        category_errors = field_errors(errors, "category"),
        chart_options = select_options(
            &chart_options,
            params.chart_type.as_deref().unwrap_or("").trim()
        ),
        chart_type_errors = field_errors(errors, "chart_type"),
    ))
}

/// GET /recipes/search/
pub async fn search_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<SearchParams>,
) -> WebResult<Html<String>> {
    let mut errors = Vec::new();
    let mut results = String::new();

    if params.is_submitted() {
        match params.validate() {
            Ok(request) => {
                let outcome = run_search::<WebError>(&state.db, &request).await?;
                results = format!(
                    "<h2>Results</h2>\n<p>{} recipe{} found.</p>\n{}",
                    outcome.recipes.len(),
                    if outcome.recipes.len() == 1 { "" } else { "s" },
                    recipe_table(&outcome.recipes)
                );
                if let (Some(kind), Some(uri)) = (request.chart, outcome.chart_data_uri()) {
                    results.push_str(&format!(
                        "\n<div class=\"chart\"><img src=\"{}\" alt=\"{}\"></div>",
                        uri,
                        escape_html(kind.label())
                    ));
                }
            }
            Err(invalid) => errors = invalid,
        }
    }

    let body = format!(
        "<h1>Search recipes</h1>\n{}\n{}",
        search_form(&state, &params, &errors).await?,
        results
    );

    Ok(render_page("Search recipes", Some(&user), &body))
}
