//! Recipe overview, detail and add-recipe pages

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use recipebox_common::db::{categories, recipes};
use recipebox_common::{Error, Recipe};
use serde::Deserialize;
use tracing::info;

use super::layout::{escape_html, field_errors, render_page, select_options};
use super::parse_id;
use crate::error::WebResult;
use crate::forms::{FieldError, RecipeFormInput};
use crate::pagination::{calculate_pagination, Pagination};
use crate::session::{CurrentUser, MaybeUser};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Requested page; unparseable values fall back to the first page
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

/// Results table shared by the overview, category and search pages
pub(crate) fn recipe_table(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "<p>No recipes found.</p>".to_string();
    }

    let rows: Vec<String> = recipes
        .iter()
        .map(|recipe| {
            let category = match (recipe.category_id, &recipe.category_name) {
                (Some(id), Some(name)) => format!(
                    r#"<a href="/categories/{}/">{}</a>"#,
                    id,
                    escape_html(name)
                ),
                _ => "&mdash;".to_string(),
            };
            format!(
                r#"<tr><td><a href="{}">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                recipe.absolute_url(),
                escape_html(&recipe.name),
                recipe.cooking_time,
                escape_html(&recipe.difficulty),
                category
            )
        })
        .collect();

    format!(
        "<table>\n<tr><th>Recipe</th><th>Cooking time (min)</th><th>Difficulty</th><th>Category</th></tr>\n{}\n</table>",
        rows.join("\n")
    )
}

fn pager(pagination: &Pagination) -> String {
    if pagination.total_pages <= 1 {
        return String::new();
    }

    let previous = if pagination.has_previous() {
        format!(r#"<a href="/recipes/?page={}">&laquo; Previous</a>"#, pagination.page - 1)
    } else {
        String::new()
    };
    let next = if pagination.has_next() {
        format!(r#"<a href="/recipes/?page={}">Next &raquo;</a>"#, pagination.page + 1)
    } else {
        String::new()
    };

    format!(
        r#"<div class="pager">{}<span>Page {} of {}</span>{}</div>"#,
        previous, pagination.page, pagination.total_pages, next
    )
}

/// GET /recipes/
pub async fn recipe_overview(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<PageQuery>,
) -> WebResult<Html<String>> {
    let total = recipes::count_recipes(&state.db).await?;
    let pagination = calculate_pagination(total, query.page(), state.page_size);
    let page = recipes::list_recipes(&state.db, pagination.offset, pagination.page_size).await?;

    let body = format!(
        "<h1>All recipes</h1>\n<p>{} recipe{} in the collection.</p>\n{}\n{}",
        total,
        if total == 1 { "" } else { "s" },
        recipe_table(&page),
        pager(&pagination)
    );

    Ok(render_page("Recipes", user.as_ref(), &body))
}

/// GET /recipes/:id/
pub async fn recipe_detail(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> WebResult<Html<String>> {
    let id = parse_id(&id, "recipe")?;
    let recipe = recipes::get_recipe(&state.db, id).await?;

    let ingredients: Vec<String> = recipe
        .ingredients_list()
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();

    let category = match (recipe.category_id, &recipe.category_name) {
        (Some(id), Some(name)) => format!(
            r#"<a href="/categories/{}/">{}</a>"#,
            id,
            escape_html(name)
        ),
        _ => "Uncategorized".to_string(),
    };

    let body = format!(
        r#"<h1>{name}</h1>
<p>{description}</p>
<table>
<tr><th>Cooking time</th><td>{cooking_time} min</td></tr>
<tr><th>Difficulty</th><td>{difficulty}</td></tr>
<tr><th>Category</th><td>{category}</td></tr>
</table>
<h2>Ingredients</h2>
<ul>
{ingredients}
</ul>
<p><a href="/recipes/">Back to all recipes</a></p>"#,
        name = escape_html(&recipe.name),
        description = escape_html(&recipe.description),
        cooking_time = recipe.cooking_time,
        difficulty = recipe.calculate_difficulty(),
        category = category,
        ingredients = ingredients.join("\n"),
    );

    Ok(render_page(&recipe.name, user.as_ref(), &body))
}

async fn recipe_form_page(
    state: &AppState,
    user: &recipebox_common::db::User,
    input: &RecipeFormInput,
    errors: &[FieldError],
) -> WebResult<Html<String>> {
    let mut options = vec![(String::new(), "---------".to_string())];
    options.extend(
        categories::list_categories(&state.db)
            .await?
            .into_iter()
            .map(|c| (c.id.to_string(), c.name)),
    );

    let body = format!(
        r#"<h1>Add a recipe</h1>
<p>Difficulty is worked out from the cooking time and the number of ingredients.</p>
<form method="post" action="/recipes/add/">
    <p><label for="id_name">Name</label>
       <input type="text" id="id_name" name="name" value="{name}" maxlength="120" required>{name_errors}</p>
    <p><label for="id_description">Description</label>
       <textarea id="id_description" name="description" rows="4" cols="60" required>{description}</textarea>{description_errors}</p>
    <p><label for="id_ingredients">Ingredients</label>
       <input type="text" id="id_ingredients" name="ingredients" value="{ingredients}" size="60" placeholder="flour, milk, egg" required>{ingredients_errors}</p>
    <p><label for="id_cooking_time">Cooking time (min)</label>
       <input type="number" id="id_cooking_time" name="cooking_time" value="{cooking_time}" min="1" required>{cooking_time_errors}</p>
    <p><label for="id_category">Category</label>
       <select id="id_category" name="category">
{category_options}
       </select>{category_errors}</p>
    <p><button class="button" type="submit">Save recipe</button></p>
</form>"#,
        name = escape_html(&input.name),
        name_errors = field_errors(errors, "name"),
        description = escape_html(&input.description),
        description_errors = field_errors(errors, "description"),
        ingredients = escape_html(&input.ingredients),
        ingredients_errors = field_errors(errors, "ingredients"),
        cooking_time = escape_html(&input.cooking_time),
        cooking_time_errors = field_errors(errors, "cooking_time"),
        category_options = select_options(&options, input.category.trim()),
        category_errors = field_errors(errors, "category"),
    );

    Ok(render_page("Add recipe", Some(user), &body))
}

/// GET /recipes/add/
pub async fn add_recipe_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> WebResult<Html<String>> {
    recipe_form_page(&state, &user, &RecipeFormInput::default(), &[]).await
}

/// POST /recipes/add/
///
/// Invalid input re-renders the form with its messages; a saved recipe
/// redirects to its detail page.
pub async fn add_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(input): Form<RecipeFormInput>,
) -> WebResult<Response> {
    let new = match input.validate() {
        Ok(new) => new,
        Err(errors) => {
            return Ok(recipe_form_page(&state, &user, &input, &errors)
                .await?
                .into_response())
        }
    };

    let recipe = match recipes::insert_recipe(&state.db, &new).await {
        Ok(recipe) => recipe,
        Err(Error::InvalidInput(message)) => {
            let errors = vec![FieldError::new("category", message)];
            return Ok(recipe_form_page(&state, &user, &input, &errors)
                .await?
                .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "User '{}' added recipe {} '{}' ({})",
        user.username, recipe.id, recipe.name, recipe.difficulty
    );

    Ok(Redirect::to(&recipe.absolute_url()).into_response())
}
