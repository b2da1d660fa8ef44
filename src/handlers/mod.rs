//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions

pub mod callbacks;
pub mod commands;

use tracing::info;

use crate::router::BotRouter;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Register the built-in command and callback handlers
pub fn register_all(router: &mut BotRouter, services: &ServiceFactory) -> Result<()> {
    commands::register(router, services);
    callbacks::register(router, services)?;

    info!(
        commands = router.commands().len(),
        callbacks = router.callbacks().len(),
        "Handlers registered"
    );
    Ok(())
}
