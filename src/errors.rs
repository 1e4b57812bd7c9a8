//! Unified error type for `MealBuddy`.
//!
//! Validation variants carry messages meant to be shown to the user as-is; the
//! bot layer replies with them instead of failing the command.

use thiserror::Error;

/// Errors produced by the store, the ingestion adapter, validation and the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stored snapshot or service payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request to the ingestion service failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The ingestion service answered with something unusable
    #[error("Ingestion error: {message}")]
    Ingestion {
        /// What went wrong with the response
        message: String,
    },

    /// Ingestion returned no meals
    #[error("Could not extract any meals. Try clearer input.")]
    NothingExtracted,

    /// Neither text nor an image was supplied for a menu upload
    #[error("Please provide some text or an image of the menu.")]
    MissingMenuInput,

    /// A selection was attempted while no menu is published
    #[error("No menu uploaded yet for today. Please wait for the admin.")]
    NoActiveMenu,

    /// Submitter name was empty or whitespace
    #[error("Please enter your name.")]
    MissingSubmitterName,

    /// Selection did not contain the required number of meals
    #[error("Please select exactly {expected} meals (got {actual}).")]
    WrongMealCount {
        /// Required number of meals
        expected: usize,
        /// Number of meals supplied
        actual: usize,
    },

    /// The same meal was picked more than once
    #[error("'{meal}' was picked more than once.")]
    DuplicateMeal {
        /// Meal name or identifier that was repeated
        meal: String,
    },

    /// A meal is not part of the current menu
    #[error("'{meal}' is not on the current menu.")]
    UnknownMeal {
        /// Meal name or identifier that could not be found
        meal: String,
    },

    /// Formatting a reply failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// A required environment variable is missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Discord framework error
    #[error("Serenity/Poise framework error: {0}")]
    Discord(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Returns true for errors caused by user input, which the bot answers
    /// with a message rather than treating as a command failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NothingExtracted
                | Self::MissingMenuInput
                | Self::NoActiveMenu
                | Self::MissingSubmitterName
                | Self::WrongMealCount { .. }
                | Self::DuplicateMeal { .. }
                | Self::UnknownMeal { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_user_facing() {
        assert!(Error::NoActiveMenu.is_user_facing());
        assert!(
            Error::WrongMealCount {
                expected: 4,
                actual: 3
            }
            .is_user_facing()
        );
        assert!(
            !Error::Config {
                message: "bad".to_string()
            }
            .is_user_facing()
        );
    }

    #[test]
    fn test_wrong_meal_count_message() {
        let err = Error::WrongMealCount {
            expected: 4,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Please select exactly 4 meals (got 2).");
    }
}
