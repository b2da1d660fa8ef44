//! Help command handler

use teloxide::types::Message;

use crate::events::BotEvent;
use crate::services::{templates, ServiceFactory};
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };

    services.events.publish(BotEvent::CommandInvoked {
        command: "/help".to_string(),
        telegram_id: from.id.0 as i64,
    });
    services
        .telegram_service
        .send_html(msg.chat.id, templates::help())
        .await?;
    Ok(())
}
