//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Menu upload, display and clearing
pub mod menu;

/// Meal selection
pub mod selection;

/// Rankings, orders and activity log
pub mod stats;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use general::*;
pub use menu::*;
pub use selection::*;
pub use stats::*;

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        menu(),
        select(),
        stats(),
        trending(),
        orders(),
        logs(),
    ]
}
