//! Start command handler

use teloxide::types::Message;
use tracing::debug;

use crate::events::BotEvent;
use crate::services::{templates, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// Handle /start command - greet the (already registered) sender
pub async fn handle_start(msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let telegram_id = from.id.0 as i64;
    debug!(telegram_id = telegram_id, chat_id = ?msg.chat.id, "Processing /start command");

    let user = services.user_service.require_user(telegram_id).await?;
    services.events.publish(BotEvent::CommandInvoked {
        command: "/start".to_string(),
        telegram_id,
    });

    services
        .telegram_service
        .send_html(msg.chat.id, templates::welcome(&user))
        .await?;

    log_user_action(telegram_id, "start", None);
    Ok(())
}
