//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests meals from the current menu as the user types. Each choice shows the
//! meal name (with its category, if any) and submits the meal identifier, so meals
//! that share a name stay distinguishable.

use crate::{
    bot::BotData,
    core::{model::DailyMenu, report},
    errors::Error,
};
use poise::serenity_prelude::AutocompleteChoice;
use tracing::trace;

/// Discord's cap on autocomplete choices.
const MAX_SUGGESTIONS: usize = 25;

/// Discord's cap on the length of a choice label or value.
pub const MAX_CHOICE_LENGTH: usize = 100;

/// One autocomplete suggestion: what the user sees and what gets submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealSuggestion {
    /// Display label, at most [`MAX_CHOICE_LENGTH`] characters
    pub label: String,
    /// Meal identifier submitted with the command
    pub value: String,
}

/// Provides autocomplete choices for meals on the current menu.
///
/// # Arguments
/// * `ctx` - The poise context holding the state store
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_meal_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let suggestions = {
        let store = ctx.data().store.lock().await;
        matching_meals(store.menu(), partial)
    };
    trace!(partial, count = suggestions.len(), "Returning meal suggestions");

    suggestions
        .into_iter()
        .map(|suggestion| AutocompleteChoice::new(suggestion.label, suggestion.value))
        .collect()
}

/// Menu meals whose name contains `partial` (case-insensitive), in menu order.
#[must_use]
pub fn matching_meals(menu: Option<&DailyMenu>, partial: &str) -> Vec<MealSuggestion> {
    let Some(menu) = menu else {
        return Vec::new();
    };

    let partial_lower = partial.trim().to_lowercase();

    menu.meals
        .iter()
        .filter(|meal| meal.name.to_lowercase().contains(&partial_lower))
        .map(|meal| {
            let label = match &meal.category {
                Some(category) => format!("{} ({category})", meal.name),
                None => meal.name.clone(),
            };
            MealSuggestion {
                label: report::truncate_message(&label, MAX_CHOICE_LENGTH),
                value: meal.id.clone(),
            }
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}
