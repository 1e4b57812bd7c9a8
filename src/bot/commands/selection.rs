//! Selection Discord command - `/select`.
//!
//! Colleagues name their four meals; names are resolved against the current menu
//! and validated before the store records anything.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::validation,
        errors::{Error, Result},
    };

    /// Submits your 4 meals for today.
    #[poise::command(slash_command)]
    pub async fn select(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your full name"] name: String,
        #[description = "First meal"]
        #[autocomplete = "autocomplete::autocomplete_meal_name"]
        meal_1: String,
        #[description = "Second meal"]
        #[autocomplete = "autocomplete::autocomplete_meal_name"]
        meal_2: String,
        #[description = "Third meal"]
        #[autocomplete = "autocomplete::autocomplete_meal_name"]
        meal_3: String,
        #[description = "Fourth meal"]
        #[autocomplete = "autocomplete::autocomplete_meal_name"]
        meal_4: String,
    ) -> Result<()> {
        let queries = vec![meal_1, meal_2, meal_3, meal_4];

        let mut store = ctx.data().store.lock().await;

        let validated = store.menu().ok_or(Error::NoActiveMenu).and_then(|menu| {
            let meal_ids = validation::resolve_meal_ids(menu, &queries)?;
            validation::validate_selection(Some(menu), &name, &meal_ids)
        });

        let valid = match validated {
            Ok(valid) => valid,
            Err(e) if e.is_user_facing() => {
                drop(store);
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let selection = store
            .record_selection(valid.user_name, valid.meal_ids)
            .await?;
        let meal_names: Vec<String> = store.menu().map_or_else(Vec::new, |menu| {
            selection
                .meal_ids
                .iter()
                .filter_map(|id| menu.meal(id).map(|meal| meal.name.clone()))
                .collect()
        });
        drop(store);

        ctx.say(format!(
            "✅ Thanks, **{}**! Your selection was recorded: {}",
            selection.user_name,
            meal_names.join(", ")
        ))
        .await?;

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
