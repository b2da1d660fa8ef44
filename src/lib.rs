//! Safir Bot
//!
//! A webhook-driven Telegram assistant bot. Updates arrive over HTTP, are
//! routed to registered command and callback handlers, and every sender is
//! mirrored into a PostgreSQL user table.

pub mod config;
pub mod database;
pub mod dispatcher;
pub mod events;
pub mod handlers;
pub mod models;
pub mod router;
pub mod server;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BotError, Result};

// Re-export main components for easy access
pub use dispatcher::Dispatcher;
pub use events::{BotEvent, EventBus};
pub use router::BotRouter;
pub use server::{build_router, AppState, WebhookServer};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
