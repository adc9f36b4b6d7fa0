//! Recipe and category models
//!
//! Difficulty is derived from two inputs only: cooking time in minutes and
//! the number of listed ingredients. The thresholds are 10 minutes and
//! 4 ingredients.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Maximum length of recipe and category names
pub const NAME_MAX_LENGTH: usize = 120;

/// Maximum length of the stored difficulty label
pub const DIFFICULTY_MAX_LENGTH: usize = 20;

/// Cooking times below this many minutes count as quick
const QUICK_COOKING_MINUTES: u32 = 10;

/// Ingredient lists shorter than this count as simple
const FEW_INGREDIENTS: usize = 4;

/// Recipe difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Intermediate,
    Hard,
}

impl Difficulty {
    /// All levels in ascending order
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Intermediate,
        Difficulty::Hard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("unknown difficulty '{}'", s)))
    }
}

/// Classify a recipe from its cooking time and ingredient count
///
/// # Examples
/// ```
/// use recipebox_common::{calculate_difficulty, Difficulty};
///
/// assert_eq!(calculate_difficulty(5, 3), Difficulty::Easy);
/// assert_eq!(calculate_difficulty(5, 4), Difficulty::Medium);
/// assert_eq!(calculate_difficulty(10, 3), Difficulty::Intermediate);
/// assert_eq!(calculate_difficulty(45, 8), Difficulty::Hard);
/// ```
pub fn calculate_difficulty(cooking_time: u32, ingredient_count: usize) -> Difficulty {
    let quick = cooking_time < QUICK_COOKING_MINUTES;
    let simple = ingredient_count < FEW_INGREDIENTS;

    match (quick, simple) {
        (true, true) => Difficulty::Easy,
        (true, false) => Difficulty::Medium,
        (false, true) => Difficulty::Intermediate,
        (false, false) => Difficulty::Hard,
    }
}

/// Split a comma-separated ingredient string into trimmed, non-empty items
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Recipe category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn absolute_url(&self) -> String {
        format!("/categories/{}/", self.id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Stored recipe, joined with its category name when it has one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Comma-separated list of ingredients
    pub ingredients: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
    pub difficulty: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

impl Recipe {
    pub fn ingredients_list(&self) -> Vec<String> {
        parse_ingredients(&self.ingredients)
    }

    /// Difficulty computed from the current cooking time and ingredients
    pub fn calculate_difficulty(&self) -> Difficulty {
        calculate_difficulty(self.cooking_time, self.ingredients_list().len())
    }

    pub fn absolute_url(&self) -> String {
        format!("/recipes/{}/", self.id)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Insert payload for a recipe
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub cooking_time: u32,
    pub category_id: Option<i64>,
}

impl NewRecipe {
    /// Check lengths and ranges before the row is written
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("name is required".to_string()));
        }
        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(Error::InvalidInput(format!(
                "name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }
        if self.description.trim().is_empty() {
            return Err(Error::InvalidInput("description is required".to_string()));
        }
        if parse_ingredients(&self.ingredients).is_empty() {
            return Err(Error::InvalidInput(
                "at least one ingredient is required".to_string(),
            ));
        }
        if self.cooking_time == 0 {
            return Err(Error::InvalidInput(
                "cooking time must be at least 1 minute".to_string(),
            ));
        }
        Ok(())
    }

    pub fn difficulty(&self) -> Difficulty {
        calculate_difficulty(self.cooking_time, parse_ingredients(&self.ingredients).len())
    }

    /// Ingredients re-joined in their normalized ", " form
    pub fn normalized_ingredients(&self) -> String {
        parse_ingredients(&self.ingredients).join(", ")
    }
}

/// Insert payload for a category
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("category name is required".to_string()));
        }
        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(Error::InvalidInput(format!(
                "category name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }
        Ok(())
    }
}
