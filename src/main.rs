use meal_buddy::{
    bot::{self, BotData},
    config,
    core::{gemini::GeminiClient, state::StateStore},
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings (defaults if config.toml is absent)
    let settings = config::settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!("Successfully processed application settings.");

    // 4. Open the database and restore persisted state
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    let store = StateStore::open(db).await;

    // 5. Menu ingestion service
    let parser = GeminiClient::from_env(settings.ingestion.clone())
        .inspect_err(|e| error!("GEMINI_API_KEY not found: {}", e))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(store, parser, settings)).await
}
