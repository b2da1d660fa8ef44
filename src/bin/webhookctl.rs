//! Webhook administration tool
//!
//! Registers, removes, or inspects the bot's webhook using the same
//! configuration as the server.

use clap::{Parser, Subcommand};
use tracing::info;

use safir_bot::{config::Settings, services::TelegramService, utils::logging};

#[derive(Parser)]
#[command(name = "webhookctl")]
#[command(about = "Manage the Telegram webhook for Safir Bot", long_about = None)]
#[command(version)]
struct Cli {
    /// Optional configuration file, layered under the environment
    #[arg(short, long, env = "SAFIR_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the webhook; `/webhook` is appended to the base URL
    Set {
        /// Public base URL, defaults to the configured webhook URL
        base_url: Option<String>,

        /// Keep updates that queued up while no webhook was set
        #[arg(long, default_value_t = false)]
        keep_pending: bool,
    },

    /// Remove the webhook and drop pending updates
    Delete,

    /// Print the current webhook registration
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = match cli.config.as_deref() {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };
    let _log_guard = logging::init_logging(&settings.logging)?;

    match cli.command {
        Commands::Set { base_url, keep_pending } => {
            if base_url.is_some() {
                settings.bot.webhook_url = base_url;
            }
            settings.validate()?;
            let url = settings
                .webhook_endpoint()
                .ok_or_else(|| anyhow::anyhow!("no base URL given and none configured"))?;

            let telegram = TelegramService::from_config(&settings.bot)?;
            telegram
                .set_webhook(&url, settings.bot.webhook_secret.as_deref(), !keep_pending)
                .await?;
            info!(webhook_url = %url, drop_pending = !keep_pending, "Webhook registered");
            println!("Webhook set to {}", url);
        }
        Commands::Delete => {
            settings.validate()?;
            let telegram = TelegramService::from_config(&settings.bot)?;
            telegram.delete_webhook(true).await?;
            println!("Webhook deleted");
        }
        Commands::Info => {
            settings.validate()?;
            let telegram = TelegramService::from_config(&settings.bot)?;
            let webhook = telegram.webhook_info().await?;
            println!("{}", serde_json::to_string_pretty(&webhook)?);
        }
    }

    Ok(())
}
