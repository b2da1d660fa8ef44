//! Settings command handler

use teloxide::types::Message;

use crate::services::{templates, ServiceFactory};
use crate::utils::errors::Result;

/// Handle /settings command - show the settings menu keyboard
pub async fn handle_settings(msg: Message, services: ServiceFactory) -> Result<()> {
    if msg.from.is_none() {
        return Ok(());
    }

    let (text, keyboard) = templates::settings_menu();
    services
        .telegram_service
        .send_html_with_keyboard(msg.chat.id, text, keyboard)
        .await?;
    Ok(())
}
