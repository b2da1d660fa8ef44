//! Profile command handler

use teloxide::types::Message;

use crate::services::{templates, ServiceFactory};
use crate::utils::errors::Result;

/// Handle /profile command - show what we know about the sender
pub async fn handle_profile(msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };

    let user = services.user_service.require_user(from.id.0 as i64).await?;
    services
        .telegram_service
        .send_html(msg.chat.id, templates::profile(&user))
        .await?;
    Ok(())
}
