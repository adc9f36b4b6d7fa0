//! Form input parsing shared by the HTML pages
//!
//! Browsers submit every field as a string; blank strings mean "absent".
//! Validation collects one message per offending field so the form can be
//! re-rendered with all of them at once.

use recipebox_common::model::{NewRecipe, NAME_MAX_LENGTH};
use recipebox_common::parse_ingredients;
use serde::{Deserialize, Serialize};

/// Validation message attached to a form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Messages recorded for `field`, in insertion order
pub fn errors_for<'a>(errors: &'a [FieldError], field: &str) -> impl Iterator<Item = &'a str> + 'a {
    let field = field.to_string();
    errors
        .iter()
        .filter(move |e| e.field == field)
        .map(|e| e.message.as_str())
}

/// Trimmed value, or `None` when absent or blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a positive whole number of minutes
pub fn parse_minutes(field: &'static str, raw: &str) -> Result<u32, FieldError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(FieldError::new(field, "Ensure this value is greater than or equal to 1.")),
        Ok(minutes) => Ok(minutes),
        Err(_) => Err(FieldError::new(field, "Enter a whole number.")),
    }
}

/// Check a free-text field against the shared name length limit
pub fn check_length(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    let length = value.chars().count();
    if length > NAME_MAX_LENGTH {
        errors.push(FieldError::new(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                NAME_MAX_LENGTH, length
            ),
        ));
    }
}

/// Raw add-recipe form submission
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecipeFormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub cooking_time: String,
    #[serde(default)]
    pub category: String,
}

impl RecipeFormInput {
    /// Validate into an insert payload
    ///
    /// Category existence is checked by the repository on insert.
    pub fn validate(&self) -> Result<NewRecipe, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "This field is required."));
        }
        check_length("name", name, &mut errors);

        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", "This field is required."));
        }

        if self.ingredients.trim().is_empty() {
            errors.push(FieldError::new("ingredients", "This field is required."));
        } else if parse_ingredients(&self.ingredients).is_empty() {
            errors.push(FieldError::new(
                "ingredients",
                "List at least one ingredient, separated by commas.",
            ));
        }

        let cooking_time = match non_blank(Some(self.cooking_time.as_str())) {
            None => {
                errors.push(FieldError::new("cooking_time", "This field is required."));
                None
            }
            Some(raw) => match parse_minutes("cooking_time", raw) {
                Ok(minutes) => Some(minutes),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
        };

        let category_id = match non_blank(Some(self.category.as_str())) {
            None => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FieldError::new("category", "Select a valid choice."));
                    None
                }
            },
        };

        match cooking_time {
            Some(cooking_time) if errors.is_empty() => Ok(NewRecipe {
                name: name.to_string(),
                description: self.description.trim().to_string(),
                ingredients: self.ingredients.clone(),
                cooking_time,
                category_id,
            }),
            _ => Err(errors),
        }
    }
}
