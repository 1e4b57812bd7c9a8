//! Shared test utilities for `MealBuddy`.
//!
//! This module provides helpers for setting up test databases and building menus
//! and selections with sensible defaults.

use crate::{
    core::model::{DailyMenu, Meal, Selection, new_id},
    errors::Result,
};
use chrono::{Local, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all storage tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates meals with generated identifiers, in the given order.
#[must_use]
pub fn sample_meals(names: &[&str]) -> Vec<Meal> {
    names.iter().map(|name| Meal::new(*name)).collect()
}

/// Builds a menu for today without going through the store.
#[must_use]
pub fn menu_of(names: &[&str]) -> DailyMenu {
    DailyMenu {
        id: new_id("menu"),
        date: Local::now().date_naive(),
        meals: sample_meals(names),
        uploaded_at: Utc::now(),
    }
}

/// Picks meal identifiers from a menu by position.
#[must_use]
pub fn meal_ids(menu: &DailyMenu, positions: &[usize]) -> Vec<String> {
    positions
        .iter()
        .map(|&i| menu.meals[i].id.clone())
        .collect()
}

/// Builds a selection without going through the store.
#[must_use]
pub fn selection_of(user_name: &str, meal_ids: Vec<String>) -> Selection {
    Selection {
        id: new_id("sel"),
        user_name: user_name.to_string(),
        meal_ids,
        timestamp: Utc::now(),
    }
}
