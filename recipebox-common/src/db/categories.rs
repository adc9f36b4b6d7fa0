//! Category queries

use sqlx::SqlitePool;

use crate::model::{Category, NewCategory};
use crate::{Error, Result};

/// Category with the number of recipes filed under it
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub recipe_count: i64,
}

pub async fn insert_category(pool: &SqlitePool, new: &NewCategory) -> Result<Category> {
    new.validate()?;

    let name = new.name.trim();
    let description = new.description.trim();

    let id = sqlx::query("INSERT INTO categories (name, description) VALUES (?, ?)")
        .bind(name)
        .bind(description)
        .execute(pool)
        .await
        .map_err(|e| Error::from_insert(e, &format!("category '{}'", name)))?
        .last_insert_rowid();

    Ok(Category {
        id,
        name: name.to_string(),
        description: description.to_string(),
    })
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<Category> {
    sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("category {}", id)))
}

/// All categories ordered by name
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, description FROM categories ORDER BY name COLLATE NOCASE, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// All categories with recipe counts, ordered by name
pub async fn list_category_summaries(pool: &SqlitePool) -> Result<Vec<CategorySummary>> {
    let summaries = sqlx::query_as::<_, CategorySummary>(
        "SELECT c.id, c.name, c.description, COUNT(r.id) AS recipe_count
         FROM categories c
         LEFT JOIN recipes r ON r.category_id = c.id
         GROUP BY c.id
         ORDER BY c.name COLLATE NOCASE, c.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(summaries)
}

pub async fn count_recipes_in_category(pool: &SqlitePool, id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Delete a category; its recipes stay and lose their category
pub async fn delete_category(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    // Explicit detach so the result does not depend on the foreign_keys pragma
    sqlx::query("UPDATE recipes SET category_id = NULL WHERE category_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(Error::NotFound(format!("category {}", id)));
    }

    tx.commit().await?;
    Ok(())
}
