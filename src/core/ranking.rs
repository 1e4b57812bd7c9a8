//! Aggregation engine - popularity ranking of menu meals.
//!
//! Rankings are recomputed from the menu and selection history on every read; no
//! derived state is stored.

use crate::core::model::{DailyMenu, Selection};
use std::collections::HashMap;

/// How many times one menu meal was picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealCount {
    /// Identifier of the meal on the current menu
    pub meal_id: String,
    /// Display name of the meal
    pub name: String,
    /// Number of selections that include this meal
    pub count: usize,
}

/// Ranking together with order totals, as shown on the stats dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSummary {
    /// Number of selections (orders) submitted
    pub total_orders: usize,
    /// Every menu meal, most picked first
    pub ranking: Vec<MealCount>,
    /// The first `top_n` rows of `ranking`
    pub top: Vec<MealCount>,
}

impl SelectionSummary {
    /// Highest count in the ranking, zero when empty.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.ranking.first().map_or(0, |row| row.count)
    }
}

/// Counts how often each meal on the menu was selected.
///
/// Returns one row per menu meal, zero counts included, sorted by count descending.
/// Ties keep menu order. Meal ids that are not on the menu are ignored. An absent
/// or empty menu yields an empty ranking.
#[must_use]
pub fn rank_meals(menu: Option<&DailyMenu>, selections: &[Selection]) -> Vec<MealCount> {
    let Some(menu) = menu else {
        return Vec::new();
    };

    let mut counts: HashMap<&str, usize> = menu
        .meals
        .iter()
        .map(|meal| (meal.id.as_str(), 0))
        .collect();

    for meal_id in selections.iter().flat_map(|s| s.meal_ids.iter()) {
        if let Some(count) = counts.get_mut(meal_id.as_str()) {
            *count += 1;
        }
    }

    let mut ranking: Vec<MealCount> = menu
        .meals
        .iter()
        .map(|meal| MealCount {
            meal_id: meal.id.clone(),
            name: meal.name.clone(),
            count: counts.get(meal.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    // `sort_by` is stable, which keeps menu order among equal counts
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

/// Builds the dashboard summary: total orders, full ranking and the top `top_n` meals.
#[must_use]
pub fn summarize(
    menu: Option<&DailyMenu>,
    selections: &[Selection],
    top_n: usize,
) -> SelectionSummary {
    let ranking = rank_meals(menu, selections);
    let top = ranking.iter().take(top_n).cloned().collect();

    SelectionSummary {
        total_orders: selections.len(),
        ranking,
        top,
    }
}
