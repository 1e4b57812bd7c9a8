//! Domain model - meals, menus, selections and activity log entries.
//!
//! These types carry no behavior beyond construction. They serialize with camelCase
//! field names, which is the layout stored in the snapshot slots.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Generates a fresh identifier of the form `<prefix>-<ulid>`.
///
/// ULIDs sort by creation time and stay unique within the same millisecond.
#[must_use]
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new().to_string().to_lowercase())
}

/// A single selectable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Opaque unique identifier
    pub id: String,
    /// Display name, never empty
    pub name: String,
    /// Optional grouping such as "Main", "Side" or "Dessert"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Meal {
    /// Creates a meal with a generated identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id("meal"),
            name: name.into(),
            category: None,
            description: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The published menu. Replaced as a whole on every upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMenu {
    /// Opaque unique identifier
    pub id: String,
    /// Day the menu is for
    pub date: NaiveDate,
    /// Meals in the order they were extracted
    pub meals: Vec<Meal>,
    /// When the menu was published
    pub uploaded_at: DateTime<Utc>,
}

impl DailyMenu {
    /// Looks up a meal on this menu by identifier.
    #[must_use]
    pub fn meal(&self, meal_id: &str) -> Option<&Meal> {
        self.meals.iter().find(|meal| meal.id == meal_id)
    }
}

/// One colleague's pick of meals from the menu in force when it was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Opaque unique identifier
    pub id: String,
    /// Free-text submitter name; not unique
    pub user_name: String,
    /// Identifiers of the chosen meals
    pub meal_ids: Vec<String>,
    /// When the selection was submitted
    pub timestamp: DateTime<Utc>,
}

/// Kind of mutation an activity log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogCategory {
    /// A menu was published
    Upload,
    /// A selection was recorded
    Selection,
    /// Menu and selections were cleared
    #[serde(rename = "DELETE")]
    Deletion,
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Upload => "upload",
            Self::Selection => "selection",
            Self::Deletion => "deletion",
        };
        f.write_str(label)
    }
}

/// An entry in the bounded activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Opaque unique identifier
    pub id: String,
    /// What kind of mutation happened
    #[serde(rename = "type")]
    pub category: LogCategory,
    /// Human-readable description
    pub message: String,
    /// Who performed the action
    #[serde(rename = "user")]
    pub actor: String,
    /// When it happened
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_new_id_has_prefix_and_is_unique() {
        let a = new_id("meal");
        let b = new_id("meal");
        assert!(a.starts_with("meal-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_meal_builder() {
        let meal = Meal::new("Soup")
            .with_category("Starter")
            .with_description("Tomato");
        assert_eq!(meal.name, "Soup");
        assert_eq!(meal.category.as_deref(), Some("Starter"));
        assert_eq!(meal.description.as_deref(), Some("Tomato"));
    }

    #[test]
    fn test_selection_uses_camel_case_fields() {
        let selection = Selection {
            id: "sel-1".to_string(),
            user_name: "Alice".to_string(),
            meal_ids: vec!["meal-1".to_string()],
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&selection).unwrap();
        assert!(json.get("userName").is_some());
        assert!(json.get("mealIds").is_some());
    }

    #[test]
    fn test_log_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&LogCategory::Upload).unwrap(),
            "\"UPLOAD\""
        );
        assert_eq!(
            serde_json::to_string(&LogCategory::Deletion).unwrap(),
            "\"DELETE\""
        );
        let parsed: LogCategory = serde_json::from_str("\"SELECTION\"").unwrap();
        assert_eq!(parsed, LogCategory::Selection);
    }

    #[test]
    fn test_meal_optional_fields_may_be_absent() {
        let meal: Meal = serde_json::from_str(r#"{"id":"meal-1","name":"Cake"}"#).unwrap();
        assert!(meal.category.is_none());
        assert!(meal.description.is_none());
    }
}
