use dotenvy::dotenv;
use order_buddy::{
    bot::{self, BotData},
    config::{database, menu},
    core::{service::RestaurantService, storage::SqliteStorage},
    errors::{Error, Result},
};
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

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Restaurant name and default menu
    let config = menu::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        "Loaded configuration for '{}' with {} default menu items.",
        config.restaurant.name,
        config.menu_items.len()
    );

    // 4. Database and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Restore menu and orders, seeding the default menu on first run
    let service = RestaurantService::load(SqliteStorage::new(db), config.menu_items).await?;
    info!(
        "Restaurant state loaded: {} menu items, {} orders.",
        service.catalog().len(),
        service.orders().len()
    );

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(config.restaurant.name, service)).await
}
