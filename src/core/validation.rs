//! Input validation performed before anything reaches the state store.
//!
//! The store trusts its callers, so every check on user input happens here. A
//! rejected selection or upload never mutates state.

use crate::{
    core::model::{DailyMenu, Meal},
    errors::{Error, Result},
};
use std::collections::HashSet;

/// Number of meals each colleague picks.
pub const MEALS_PER_SELECTION: usize = 4;

/// A selection that passed validation and may be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSelection {
    /// Trimmed submitter name
    pub user_name: String,
    /// Distinct meal identifiers, all on the current menu
    pub meal_ids: Vec<String>,
}

/// Checks a selection against the current menu.
///
/// # Errors
/// * `NoActiveMenu` - nothing is published
/// * `MissingSubmitterName` - the name is blank
/// * `WrongMealCount` - not exactly [`MEALS_PER_SELECTION`] meals
/// * `DuplicateMeal` - the same meal appears twice
/// * `UnknownMeal` - a meal is not on the current menu
pub fn validate_selection(
    menu: Option<&DailyMenu>,
    user_name: &str,
    meal_ids: &[String],
) -> Result<ValidSelection> {
    let menu = menu.ok_or(Error::NoActiveMenu)?;

    let user_name = user_name.trim();
    if user_name.is_empty() {
        return Err(Error::MissingSubmitterName);
    }

    if meal_ids.len() != MEALS_PER_SELECTION {
        return Err(Error::WrongMealCount {
            expected: MEALS_PER_SELECTION,
            actual: meal_ids.len(),
        });
    }

    let mut seen = HashSet::new();
    for meal_id in meal_ids {
        let Some(meal) = menu.meal(meal_id) else {
            return Err(Error::UnknownMeal {
                meal: meal_id.clone(),
            });
        };
        if !seen.insert(meal_id.as_str()) {
            return Err(Error::DuplicateMeal {
                meal: meal.name.clone(),
            });
        }
    }

    Ok(ValidSelection {
        user_name: user_name.to_string(),
        meal_ids: meal_ids.to_vec(),
    })
}

/// Checks the output of menu ingestion before it is published.
///
/// # Errors
/// Returns `NothingExtracted` when no meals were found.
pub fn validate_menu(meals: &[Meal]) -> Result<()> {
    if meals.is_empty() {
        return Err(Error::NothingExtracted);
    }
    Ok(())
}

/// Finds the menu meal a user referred to, by identifier or by name.
///
/// Names match case-insensitively after trimming. When several meals share a name
/// the first one on the menu wins; the others are reachable by identifier, which is
/// what autocomplete submits.
#[must_use]
pub fn resolve_meal<'a>(menu: &'a DailyMenu, query: &str) -> Option<&'a Meal> {
    let query = query.trim();
    if let Some(meal) = menu.meal(query) {
        return Some(meal);
    }

    let query_lower = query.to_lowercase();
    menu.meals
        .iter()
        .find(|meal| meal.name.trim().to_lowercase() == query_lower)
}

/// Resolves every query to a meal identifier.
///
/// # Errors
/// Returns `UnknownMeal` for the first query that matches nothing.
pub fn resolve_meal_ids(menu: &DailyMenu, queries: &[String]) -> Result<Vec<String>> {
    queries
        .iter()
        .map(|query| {
            resolve_meal(menu, query)
                .map(|meal| meal.id.clone())
                .ok_or_else(|| Error::UnknownMeal {
                    meal: query.trim().to_string(),
                })
        })
        .collect()
}
