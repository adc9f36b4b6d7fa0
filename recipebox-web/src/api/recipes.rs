//! JSON recipe listing and search

use axum::{
    extract::{Query, State},
    Json,
};
use recipebox_common::db::{recipes, RecipeFilter};
use recipebox_common::Recipe;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::pages::recipes::PageQuery;
use crate::pagination::{calculate_pagination, Pagination};
use crate::search::{run_search, ChartKind, SearchParams};
use crate::AppState;

/// Recipe as returned by the API, with its parsed ingredient list
#[derive(Debug, Serialize)]
pub struct RecipeItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub cooking_time: u32,
    pub difficulty: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub url: String,
}

impl From<Recipe> for RecipeItem {
    fn from(recipe: Recipe) -> Self {
        Self {
            ingredients: recipe.ingredients_list(),
            url: recipe.absolute_url(),
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            cooking_time: recipe.cooking_time,
            difficulty: recipe.difficulty,
            category_id: recipe.category_id,
            category_name: recipe.category_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub total: i64,
    pub pagination: Pagination,
    pub recipes: Vec<RecipeItem>,
}

#[derive(Debug, Serialize)]
pub struct RecipeSearchResponse {
    pub count: usize,
    pub filter: RecipeFilter,
    pub recipes: Vec<RecipeItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartKind>,
    /// `data:image/svg+xml` URI of the rendered chart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
}

/// GET /api/recipes?page=N
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<RecipeListResponse>> {
    let total = recipes::count_recipes(&state.db).await?;
    let pagination = calculate_pagination(total, query.page(), state.page_size);
    let page = recipes::list_recipes(&state.db, pagination.offset, pagination.page_size).await?;

    Ok(Json(RecipeListResponse {
        total,
        pagination,
        recipes: page.into_iter().map(RecipeItem::from).collect(),
    }))
}

/// GET /api/recipes/search
///
/// Accepts the same parameters as the search page.
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<RecipeSearchResponse>> {
    let request = params.validate().map_err(|errors| {
        let message = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        ApiError::BadRequest(message)
    })?;

    let outcome = run_search::<ApiError>(&state.db, &request).await?;
    let chart = outcome.chart_data_uri();

    Ok(Json(RecipeSearchResponse {
        count: outcome.recipes.len(),
        filter: request.filter,
        recipes: outcome.recipes.into_iter().map(RecipeItem::from).collect(),
        chart_type: request.chart,
        chart,
    }))
}
