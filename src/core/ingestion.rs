//! Menu ingestion - turning raw menu text or a photo into meals.
//!
//! The parsing itself is done by an external service behind [`MenuParser`]. This
//! module owns the contract: what goes in, what comes out, and how raw service
//! output becomes [`Meal`] records with fresh identifiers.

use crate::{
    core::{model::Meal, validation},
    errors::{Error, Result},
};
use serde::Deserialize;
use tracing::{debug, info};

/// Raw menu input supplied by the admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSource {
    /// Free-form menu text
    Text(String),
    /// A photo or scan of the menu
    Image {
        /// Encoded image content
        bytes: Vec<u8>,
        /// Media type such as `image/png`
        media_type: String,
    },
}

impl MenuSource {
    /// Picks the input to ingest. An image wins over text; blank text counts as absent.
    ///
    /// # Errors
    /// Returns `MissingMenuInput` when neither is usable.
    pub fn from_input(text: Option<String>, image: Option<(Vec<u8>, String)>) -> Result<Self> {
        if let Some((bytes, media_type)) = image {
            return Ok(Self::Image { bytes, media_type });
        }
        match text {
            Some(text) if !text.trim().is_empty() => Ok(Self::Text(text)),
            _ => Err(Error::MissingMenuInput),
        }
    }

    /// Short description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Text(text) => format!("text ({} chars)", text.chars().count()),
            Self::Image { bytes, media_type } => {
                format!("image ({media_type}, {} bytes)", bytes.len())
            }
        }
    }
}

/// A service that extracts meals from menu input.
///
/// Implementations never fail: any fault, unreachable service or malformed reply
/// included, yields an empty list. Deciding whether an empty list is an error is
/// the caller's job.
pub trait MenuParser {
    /// Extracts the meals found in `source`.
    fn parse_menu(&self, source: &MenuSource) -> impl Future<Output = Vec<Meal>> + Send;
}

/// One item as returned by the extraction service.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ParsedMeal {
    /// Meal name
    #[serde(default)]
    pub name: String,
    /// Optional category
    #[serde(default)]
    pub category: Option<String>,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Converts service output into meals with generated identifiers.
///
/// Items without a usable name are dropped; blank optional fields become `None`.
#[must_use]
pub fn into_meals(parsed: Vec<ParsedMeal>) -> Vec<Meal> {
    parsed
        .into_iter()
        .filter_map(|item| {
            let name = item.name.trim();
            if name.is_empty() {
                debug!("Dropping extracted item without a name");
                return None;
            }
            Some(Meal {
                category: non_blank(item.category),
                description: non_blank(item.description),
                ..Meal::new(name)
            })
        })
        .collect()
}

/// Parses a JSON array of extracted items into meals.
///
/// # Errors
/// Returns a serialization error if `json` is not an array of objects.
pub fn parse_meal_list(json: &str) -> Result<Vec<Meal>> {
    let parsed: Vec<ParsedMeal> = serde_json::from_str(json)?;
    Ok(into_meals(parsed))
}

/// Runs the parser and rejects an empty result.
///
/// # Errors
/// Returns `NothingExtracted` when the parser found no meals.
pub async fn ingest_menu<P>(parser: &P, source: &MenuSource) -> Result<Vec<Meal>>
where
    P: MenuParser + Sync,
{
    info!("Ingesting menu from {}", source.describe());
    let meals = parser.parse_menu(source).await;
    validation::validate_menu(&meals)?;
    info!("Extracted {} meals", meals.len());
    Ok(meals)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    struct FixedParser(Vec<Meal>);

    impl MenuParser for FixedParser {
        async fn parse_menu(&self, _source: &MenuSource) -> Vec<Meal> {
            self.0.clone()
        }
    }

    #[test]
    fn test_from_input_prefers_image() {
        let source = MenuSource::from_input(
            Some("Soup".to_string()),
            Some((vec![1, 2, 3], "image/png".to_string())),
        )
        .unwrap();
        assert!(matches!(source, MenuSource::Image { .. }));
    }

    #[test]
    fn test_from_input_rejects_blank_text() {
        let result = MenuSource::from_input(Some("   ".to_string()), None);
        assert!(matches!(result, Err(Error::MissingMenuInput)));
        assert!(matches!(
            MenuSource::from_input(None, None),
            Err(Error::MissingMenuInput)
        ));
    }

    #[test]
    fn test_parse_meal_list_assigns_ids_and_drops_blank_names() {
        let json = r#"[
            {"name": "Grilled Chicken", "category": "Main", "description": "With herbs"},
            {"name": "  "},
            {"category": "Side"},
            {"name": "Salad", "category": ""}
        ]"#;

        let meals = parse_meal_list(json).unwrap();

        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].name, "Grilled Chicken");
        assert_eq!(meals[0].category.as_deref(), Some("Main"));
        assert_eq!(meals[1].name, "Salad");
        assert!(meals[1].category.is_none());
        assert!(meals.iter().all(|m| m.id.starts_with("meal-")));
        assert_ne!(meals[0].id, meals[1].id);
    }

    #[test]
    fn test_parse_meal_list_rejects_non_array() {
        assert!(parse_meal_list(r#"{"name": "Soup"}"#).is_err());
        assert!(parse_meal_list("not json").is_err());
    }

    #[tokio::test]
    async fn test_ingest_menu_returns_meals() -> Result<()> {
        let parser = FixedParser(vec![Meal::new("Soup"), Meal::new("Cake")]);
        let meals = ingest_menu(&parser, &MenuSource::Text("Soup, Cake".to_string())).await?;
        assert_eq!(meals.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_ingest_menu_rejects_empty_extraction() {
        let parser = FixedParser(Vec::new());
        let result = ingest_menu(&parser, &MenuSource::Text("???".to_string())).await;
        assert!(matches!(result, Err(Error::NothingExtracted)));
    }
}
