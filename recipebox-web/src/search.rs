//! Recipe search pipeline
//!
//! Query-string parameters are validated into a `RecipeFilter` plus an
//! optional chart request, the filter runs against the database, and the
//! matching recipes are optionally charted.

use recipebox_common::db::{recipes, RecipeFilter};
use recipebox_common::{Difficulty, Recipe};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

use crate::charts::{self, ChartError, ChartRow};
use crate::forms::{check_length, non_blank, parse_minutes, FieldError};

/// Chart requested alongside search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    /// Cooking time per recipe
    Bar,
    /// Difficulty distribution
    Pie,
    /// Cooking time trend across the results
    Line,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Pie, ChartKind::Line];

    /// Value submitted by the search form's `chart_type` select
    pub fn code(&self) -> &'static str {
        match self {
            ChartKind::Bar => "#1",
            ChartKind::Pie => "#2",
            ChartKind::Line => "#3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar chart: cooking time per recipe",
            ChartKind::Pie => "Pie chart: difficulty distribution",
            ChartKind::Line => "Line chart: cooking time trend",
        }
    }

    /// Parse a `chart_type` value; blank means no chart
    pub fn from_code(code: &str) -> Option<Option<ChartKind>> {
        match code.trim() {
            "" => Some(None),
            other => ChartKind::ALL
                .into_iter()
                .find(|kind| kind.code() == other)
                .map(Some),
        }
    }
}

/// Raw search query string
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchParams {
    pub recipe_name: Option<String>,
    pub ingredient: Option<String>,
    pub max_cooking_time: Option<String>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub chart_type: Option<String>,
}

/// Validated search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub filter: RecipeFilter,
    pub chart: Option<ChartKind>,
}

impl SearchParams {
    /// True when the form was submitted, even with every field blank
    pub fn is_submitted(&self) -> bool {
        self.recipe_name.is_some()
            || self.ingredient.is_some()
            || self.max_cooking_time.is_some()
            || self.difficulty.is_some()
            || self.category.is_some()
            || self.chart_type.is_some()
    }

    pub fn validate(&self) -> Result<SearchRequest, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut filter = RecipeFilter::default();

        if let Some(name) = non_blank(self.recipe_name.as_deref()) {
            check_length("recipe_name", name, &mut errors);
            filter.name_contains = Some(name.to_string());
        }

        if let Some(ingredient) = non_blank(self.ingredient.as_deref()) {
            check_length("ingredient", ingredient, &mut errors);
            filter.ingredient_contains = Some(ingredient.to_string());
        }

        if let Some(raw) = non_blank(self.max_cooking_time.as_deref()) {
            match parse_minutes("max_cooking_time", raw) {
                Ok(minutes) => filter.max_cooking_time = Some(minutes),
                Err(e) => errors.push(e),
            }
        }

        if let Some(raw) = non_blank(self.difficulty.as_deref()) {
            match Difficulty::from_str(raw) {
                Ok(difficulty) => filter.difficulty = Some(difficulty),
                Err(_) => errors.push(FieldError::new("difficulty", "Select a valid choice.")),
            }
        }

        if let Some(raw) = non_blank(self.category.as_deref()) {
            match raw.parse::<i64>() {
                Ok(id) => filter.category_id = Some(id),
                Err(_) => errors.push(FieldError::new("category", "Select a valid choice.")),
            }
        }

        let chart = match ChartKind::from_code(self.chart_type.as_deref().unwrap_or("")) {
            Some(chart) => chart,
            None => {
                errors.push(FieldError::new("chart_type", "Select a valid choice."));
                None
            }
        };

        if errors.is_empty() {
            Ok(SearchRequest { filter, chart })
        } else {
            Err(errors)
        }
    }
}

/// Search results with the rendered chart, if one was requested
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub recipes: Vec<Recipe>,
    /// SVG document
    pub chart_svg: Option<String>,
}

impl SearchOutcome {
    pub fn chart_data_uri(&self) -> Option<String> {
        self.chart_svg.as_deref().map(charts::chart_data_uri)
    }
}

/// Run a validated search and render its chart
///
/// Generic over the caller's error type so HTML and JSON handlers can share it.
pub async fn run_search<E>(pool: &SqlitePool, request: &SearchRequest) -> Result<SearchOutcome, E>
where
    E: From<recipebox_common::Error> + From<ChartError>,
{
    let recipes = recipes::search_recipes(pool, &request.filter).await?;
    debug!(
        "Search matched {} recipes (filter: {:?})",
        recipes.len(),
        request.filter
    );

    let chart_svg = match request.chart {
        Some(kind) => {
            let rows: Vec<ChartRow> = recipes.iter().map(ChartRow::from).collect();
            charts::render_chart(kind, &rows)?
        }
        None => None,
    };

    Ok(SearchOutcome { recipes, chart_svg })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "recipe_name" => params.recipe_name = value,
                "ingredient" => params.ingredient = value,
                "max_cooking_time" => params.max_cooking_time = value,
                "difficulty" => params.difficulty = value,
                "category" => params.category = value,
                "chart_type" => params.chart_type = value,
                other => panic!("unknown key {}", other),
            }
        }
        params
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let p = params(&[("recipe_name", "  "), ("ingredient", ""), ("chart_type", "")]);
        assert!(p.is_submitted());
        let request = p.validate().unwrap();
        assert!(request.filter.is_empty());
        assert_eq!(request.chart, None);
    }

    #[test]
    fn test_unsubmitted_form() {
        assert!(!SearchParams::default().is_submitted());
    }

    #[test]
    fn test_all_fields_parsed() {
        let request = params(&[
            ("recipe_name", " soup "),
            ("ingredient", "tomato"),
            ("max_cooking_time", "30"),
            ("difficulty", "intermediate"),
            ("category", "2"),
            ("chart_type", "#2"),
        ])
        .validate()
        .unwrap();

        assert_eq!(request.filter.name_contains.as_deref(), Some("soup"));
        assert_eq!(request.filter.ingredient_contains.as_deref(), Some("tomato"));
        assert_eq!(request.filter.max_cooking_time, Some(30));
        assert_eq!(request.filter.difficulty, Some(Difficulty::Intermediate));
        assert_eq!(request.filter.category_id, Some(2));
        assert_eq!(request.chart, Some(ChartKind::Pie));
    }

    #[test]
    fn test_invalid_values_collect_errors() {
        let errors = params(&[
            ("max_cooking_time", "0"),
            ("difficulty", "Impossible"),
            ("chart_type", "#9"),
        ])
        .validate()
        .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["max_cooking_time", "difficulty", "chart_type"]);
    }

    #[test]
    fn test_overlong_name_rejected() {
        let long = "a".repeat(121);
        let errors = params(&[("recipe_name", long.as_str())]).validate().unwrap_err();
        assert_eq!(errors[0].field, "recipe_name");
    }

    #[test]
    fn test_chart_codes() {
        assert_eq!(ChartKind::from_code("#1"), Some(Some(ChartKind::Bar)));
        assert_eq!(ChartKind::from_code("#3"), Some(Some(ChartKind::Line)));
        assert_eq!(ChartKind::from_code(""), Some(None));
        assert_eq!(ChartKind::from_code("bar"), None);
    }
}
