//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `MealBuddy`: slash commands,
//! autocomplete handlers, the shared bot context and the framework setup.

/// Discord command implementations (menu, selection, stats, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::Settings,
    core::{gemini::GeminiClient, state::StateStore},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Longest message Discord accepts.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Shared data available to all bot commands.
///
/// The store sits behind a mutex so that each mutation, together with the
/// validation preceding it, completes before the next one starts.
pub struct BotData {
    /// Menu, selections and activity log
    pub store: Mutex<StateStore>,
    /// Menu ingestion service
    pub parser: GeminiClient,
    /// Application settings
    pub settings: Settings,
    /// Set while a menu upload is being processed
    pub publishing: PublishLock,
}

impl BotData {
    /// Creates the bot context from its parts.
    #[must_use]
    pub fn new(store: StateStore, parser: GeminiClient, settings: Settings) -> Self {
        Self {
            store: Mutex::new(store),
            parser,
            settings,
            publishing: PublishLock::default(),
        }
    }
}

/// Allows at most one menu upload in flight per bot instance.
#[derive(Debug, Default)]
pub struct PublishLock {
    busy: AtomicBool,
}

impl PublishLock {
    /// Claims the lock, or returns `None` if an upload is already running.
    /// The lock is released when the returned guard is dropped.
    pub fn try_acquire(&self) -> Option<PublishGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PublishGuard { lock: self })
    }

    /// Whether an upload is currently running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases a [`PublishLock`] on drop.
#[derive(Debug)]
pub struct PublishGuard<'a> {
    lock: &'a PublishLock,
}

impl Drop for PublishGuard<'_> {
    fn drop(&mut self) {
        self.lock.busy.store(false, Ordering::Release);
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_lock_allows_one_upload_at_a_time() {
        let lock = PublishLock::default();

        let guard = lock.try_acquire();
        assert!(guard.is_some());
        assert!(lock.is_busy());
        assert!(lock.try_acquire().is_none());

        drop(guard);
        assert!(!lock.is_busy());
        assert!(lock.try_acquire().is_some());
    }
}
