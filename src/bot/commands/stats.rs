//! Statistics Discord commands - `/stats`, `/trending`, `/orders` and `/logs`.
//!
//! Rankings are recomputed from the store on every call.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, DISCORD_MESSAGE_LIMIT},
        core::{report, state::ACTIVITY_LOG_CAPACITY},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    const WAITING: &str = "📊 Waiting for menu & selections...";

    /// Shows how often every meal on the menu was picked.
    #[poise::command(slash_command)]
    pub async fn stats(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let top_n = ctx.data().settings.display.top_meals;
        let summary = ctx.data().store.lock().await.summary(top_n);

        if summary.ranking.is_empty() {
            ctx.say(WAITING).await?;
            return Ok(());
        }

        let message = report::format_summary_message(&summary, DISCORD_MESSAGE_LIMIT)?;
        ctx.say(message).await?;
        Ok(())
    }

    /// Shows today's most picked meals.
    #[poise::command(slash_command)]
    pub async fn trending(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let top_n = ctx.data().settings.display.top_meals;
        let summary = ctx.data().store.lock().await.summary(top_n);

        if summary.top.is_empty() {
            ctx.say(WAITING).await?;
            return Ok(());
        }

        let mut response = String::from("🔥 **Today's Trending Meals**\n\n");
        for (i, row) in summary.top.iter().enumerate() {
            writeln!(
                &mut response,
                "{}. **{}** - {}",
                i + 1,
                row.name,
                report::format_picks(row.count)
            )?;
        }
        ctx.say(report::truncate_message(&response, DISCORD_MESSAGE_LIMIT))
            .await?;
        Ok(())
    }

    /// Lists every selection made against the current menu.
    #[poise::command(slash_command)]
    pub async fn orders(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let response = {
            let store = ctx.data().store.lock().await;
            match store.menu() {
                None => None,
                Some(_) if store.selections().is_empty() => {
                    Some(String::from("🧾 No selections yet."))
                }
                Some(menu) => {
                    let mut response =
                        format!("🧾 **Orders ({})**\n\n", store.selections().len());
                    for selection in store.selections() {
                        let names: Vec<&str> = selection
                            .meal_ids
                            .iter()
                            .map(|id| menu.meal(id).map_or("(unknown)", |m| m.name.as_str()))
                            .collect();
                        writeln!(
                            &mut response,
                            "• **{}**: {}",
                            selection.user_name,
                            names.join(", ")
                        )?;
                    }
                    Some(response)
                }
            }
        };

        let Some(response) = response else {
            ctx.say(WAITING).await?;
            return Ok(());
        };

        ctx.say(report::truncate_message(&response, DISCORD_MESSAGE_LIMIT))
            .await?;
        Ok(())
    }

    /// Shows recent activity, newest first.
    #[poise::command(slash_command)]
    pub async fn logs(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Number of entries to show"]
        #[min = 1]
        #[max = 100]
        limit: Option<u32>,
    ) -> Result<()> {
        let limit = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(ctx.data().settings.display.log_limit)
            .clamp(1, ACTIVITY_LOG_CAPACITY);

        let lines: Vec<String> = ctx
            .data()
            .store
            .lock()
            .await
            .logs()
            .iter()
            .take(limit)
            .map(report::format_log_entry)
            .collect();

        if lines.is_empty() {
            ctx.say("📜 No recent activity").await?;
            return Ok(());
        }

        let response = format!("📜 **Activity Log**\n\n{}", lines.join("\n"));
        ctx.say(report::truncate_message(&response, DISCORD_MESSAGE_LIMIT))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
