//! Safir Bot
//!
//! Main application entry point

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use safir_bot::{
    config::Settings,
    database::{connection::create_pool, health_check, run_migrations, DatabaseConfig, UserRepository},
    events::{spawn_logger, EventBus},
    handlers,
    router::BotRouter,
    server::{AppState, WebhookServer},
    services::{ServiceFactory, TelegramService},
    utils::logging,
    Dispatcher,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on drop
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", safir_bot::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&DatabaseConfig::from(&settings.database)).await?;
    health_check(&pool).await?;

    info!("Running database migrations...");
    run_migrations(&pool).await?;

    let events = EventBus::default();
    let event_logger = spawn_logger(&events);

    // Initialize services
    let telegram = TelegramService::from_config(&settings.bot)?;
    let services = ServiceFactory::new(
        telegram.clone(),
        Arc::new(UserRepository::new(pool.clone())),
        events.clone(),
    );

    info!("Setting up bot handlers...");
    let mut router = BotRouter::new();
    handlers::register_all(&mut router, &services)?;

    if let Err(e) = telegram.set_commands(router.commands().bot_commands()).await {
        warn!(error = %e, "Could not publish the command menu");
    }

    let dispatcher = Dispatcher::new(Arc::new(router), events.clone())
        .with_user_tracking(services.user_service.clone());
    let state = AppState::new(dispatcher, telegram.clone(), events, &settings);

    if settings.is_production() {
        match state.webhook_url.as_deref() {
            Some(url) => {
                if let Err(e) = telegram
                    .set_webhook(url, settings.bot.webhook_secret.as_deref(), false)
                    .await
                {
                    error!(error = %e, "Failed to register webhook, use POST /set-webhook to retry");
                }
            }
            None => warn!("Running in production without a webhook URL"),
        }
    }

    let server = WebhookServer::new(&settings.server.host, settings.server.port, state)?;
    server.run().await?;

    pool.close().await;
    event_logger.abort();

    info!("Safir bot has been shut down.");
    Ok(())
}
