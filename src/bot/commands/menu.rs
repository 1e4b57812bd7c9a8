//! Menu Discord commands - `/menu upload`, `/menu show` and `/menu clear`.
//!
//! Uploading runs the ingestion service outside the store lock, so other commands
//! keep working while a menu is being read; only a second upload is refused.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, DISCORD_MESSAGE_LIMIT},
        core::{
            ingestion::{self, MenuSource},
            report,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Parent command for publishing, viewing and clearing the menu.
    #[poise::command(
        slash_command,
        subcommands("menu_upload", "menu_show", "menu_clear")
    )]
    pub async fn menu(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Menu command. Available subcommands:\n\
            `/menu upload` - Read a menu from text or an image and publish it\n\
            `/menu show` - Show the current menu\n\
            `/menu clear` - Remove the menu and all selections";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Reads a menu from text or a photo and publishes it, clearing old selections.
    #[poise::command(slash_command, rename = "upload")]
    pub async fn menu_upload(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Menu text (e.g. '1. Grilled Chicken, 2. Salad, 3. Pasta')"] text: Option<
            String,
        >,
        #[description = "Photo of the menu"] image: Option<serenity::Attachment>,
    ) -> Result<()> {
        let data = ctx.data();

        let Some(_guard) = data.publishing.try_acquire() else {
            ctx.say("⏳ A menu is already being processed. Please wait for it to finish.")
                .await?;
            return Ok(());
        };

        // Ingestion can take a while; acknowledge before downloading or parsing
        ctx.defer().await?;

        let image = match image {
            Some(attachment) => {
                let media_type = attachment
                    .content_type
                    .clone()
                    .unwrap_or_else(|| "image/jpeg".to_string());
                if !media_type.starts_with("image/") {
                    ctx.say(format!(
                        "❌ '{}' is not an image. Attach a photo of the menu.",
                        attachment.filename
                    ))
                    .await?;
                    return Ok(());
                }
                Some((attachment.download().await?, media_type))
            }
            None => None,
        };

        let meals = match MenuSource::from_input(text, image) {
            Ok(source) => ingestion::ingest_menu(&data.parser, &source).await,
            Err(e) => Err(e),
        };

        let meals = match meals {
            Ok(meals) => meals,
            Err(e) if e.is_user_facing() => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let menu = {
            let mut store = data.store.lock().await;
            store.publish_menu(meals).await?
        };
        info!("{} published menu {}", ctx.author().name, menu.id);

        let listing = report::format_menu(&menu)?;
        let response = format!(
            "✅ Published a new menu with {} items. Previous selections were cleared.\n\n{listing}",
            menu.meals.len()
        );
        ctx.say(report::truncate_message(&response, DISCORD_MESSAGE_LIMIT))
            .await?;

        Ok(())
    }

    /// Shows the current menu.
    #[poise::command(slash_command, rename = "show")]
    pub async fn menu_show(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let menu = ctx.data().store.lock().await.menu().cloned();

        let Some(menu) = menu else {
            ctx.say("🍽️ No menu uploaded yet for today. Please wait for the admin.")
                .await?;
            return Ok(());
        };

        let listing = report::format_menu(&menu)?;
        ctx.say(report::truncate_message(&listing, DISCORD_MESSAGE_LIMIT))
            .await?;
        Ok(())
    }

    /// Removes the current menu and every selection. The activity log is kept.
    #[poise::command(slash_command, rename = "clear")]
    pub async fn menu_clear(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let cleared = {
            let mut store = ctx.data().store.lock().await;
            if store.menu().is_some() {
                store.clear_all().await?;
                true
            } else {
                false
            }
        };

        if cleared {
            ctx.say("🗑️ Cleared the menu and all selections.").await?;
        } else {
            ctx.say("ℹ️ There is no menu to clear.").await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
