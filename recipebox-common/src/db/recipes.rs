//! Recipe queries and the search filter

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::model::{Difficulty, NewRecipe, Recipe};
use crate::{Error, Result};

const RECIPE_COLUMNS: &str = "SELECT r.id, r.name, r.description, r.ingredients, r.cooking_time,
        r.difficulty, r.category_id, c.name AS category_name
 FROM recipes r
 LEFT JOIN categories c ON c.id = r.category_id";

const RECIPE_ORDER: &str = " ORDER BY r.name COLLATE NOCASE, r.id";

/// Optional search criteria; present fields are combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipeFilter {
    /// Case-insensitive substring of the recipe name
    pub name_contains: Option<String>,
    /// Case-insensitive substring of the ingredient list
    pub ingredient_contains: Option<String>,
    /// Inclusive upper bound on cooking time in minutes
    pub max_cooking_time: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub category_id: Option<i64>,
}

impl RecipeFilter {
    pub fn is_empty(&self) -> bool {
        *self == RecipeFilter::default()
    }
}

/// Escape `%`, `_` and the escape character itself for `LIKE ... ESCAPE '!'`
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Validate and insert a recipe; difficulty is computed, never supplied
pub async fn insert_recipe(pool: &SqlitePool, new: &NewRecipe) -> Result<Recipe> {
    new.validate()?;

    if let Some(category_id) = new.category_id {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(pool)
            .await?;
        if exists.is_none() {
            return Err(Error::InvalidInput(format!(
                "category {} does not exist",
                category_id
            )));
        }
    }

    let difficulty = new.difficulty();

    let id = sqlx::query(
        "INSERT INTO recipes (name, description, ingredients, cooking_time, difficulty, category_id)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(new.name.trim())
    .bind(new.description.trim())
    .bind(new.normalized_ingredients())
    .bind(new.cooking_time)
    .bind(difficulty.as_str())
    .bind(new.category_id)
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_recipe(pool, id).await
}

pub async fn get_recipe(pool: &SqlitePool, id: i64) -> Result<Recipe> {
    sqlx::query_as::<_, Recipe>(&format!("{} WHERE r.id = ?", RECIPE_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("recipe {}", id)))
}

pub async fn count_recipes(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// One page of recipes ordered by name
pub async fn list_recipes(pool: &SqlitePool, offset: i64, limit: i64) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(&format!(
        "{}{} LIMIT ? OFFSET ?",
        RECIPE_COLUMNS, RECIPE_ORDER
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

pub async fn list_recipes_in_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(&format!(
        "{} WHERE r.category_id = ?{}",
        RECIPE_COLUMNS, RECIPE_ORDER
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

/// Run the search pipeline: every present filter narrows the result set
pub async fn search_recipes(pool: &SqlitePool, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(RECIPE_COLUMNS);
    query.push(" WHERE 1 = 1");

    if let Some(name) = &filter.name_contains {
        query
            .push(" AND r.name LIKE ")
            .push_bind(format!("%{}%", escape_like(name)))
            .push(" ESCAPE '!'");
    }

    if let Some(ingredient) = &filter.ingredient_contains {
        query
            .push(" AND r.ingredients LIKE ")
            .push_bind(format!("%{}%", escape_like(ingredient)))
            .push(" ESCAPE '!'");
    }

    if let Some(max) = filter.max_cooking_time {
        query.push(" AND r.cooking_time <= ").push_bind(max);
    }

    if let Some(difficulty) = filter.difficulty {
        query
            .push(" AND r.difficulty = ")
            .push_bind(difficulty.as_str());
    }

    if let Some(category_id) = filter.category_id {
        query.push(" AND r.category_id = ").push_bind(category_id);
    }

    query.push(RECIPE_ORDER);

    let recipes = query.build_query_as::<Recipe>().fetch_all(pool).await?;
    Ok(recipes)
}
