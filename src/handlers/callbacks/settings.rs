//! Settings menu callbacks

use teloxide::types::{CallbackQuery, ChatId};
use tracing::debug;

use crate::services::{templates, ServiceFactory};
use crate::utils::errors::Result;

/// Handle a `settings_*` button press
pub async fn handle_settings_callback(query: CallbackQuery, services: ServiceFactory) -> Result<()> {
    let data = query.data.as_deref().unwrap_or_default();
    // Private chats share their id with the user
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(query.from.id.0 as i64));

    debug!(telegram_id = query.from.id.0, data = %data, "Settings callback");

    services
        .telegram_service
        .send_html_with_keyboard(
            chat_id,
            templates::settings_section(data),
            templates::back_to_settings_keyboard(),
        )
        .await?;

    services
        .telegram_service
        .answer_callback(&query, Some("Settings updated!"))
        .await?;
    Ok(())
}
