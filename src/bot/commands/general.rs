//! General Discord commands - ping, help, and other utility commands.
//! These commands don't touch the state store.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**MealBuddy Help**\n\
        Pick your 4 meals from today's menu and see what everyone else is having.\n\n\
        **Colleague Commands**\n\
        • `/select <name> <meal1> <meal2> <meal3> <meal4>` - Submits your 4 meals.\n\
        • `/menu show` - Shows today's menu.\n\
        • `/trending` - Shows the most picked meals.\n\n\
        **Admin Commands**\n\
        • `/menu upload [text] [image]` - Reads a menu from text or a photo and publishes it. Clears previous selections.\n\
        • `/menu clear` - Removes the menu and all selections.\n\
        • `/stats` - Shows the full ranking and order count.\n\
        • `/orders` - Lists every submitted selection.\n\
        • `/logs [limit]` - Shows recent activity.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
