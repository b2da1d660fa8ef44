//! Stats command handler

use teloxide::types::Message;
use tracing::debug;

use crate::services::{templates, ServiceFactory};
use crate::utils::errors::Result;

/// Handle /stats command
pub async fn handle_stats(msg: Message, services: ServiceFactory) -> Result<()> {
    let stats = services.user_service.statistics().await?;
    debug!(total = stats.total_users, active = stats.active_users, "Computed user statistics");

    services
        .telegram_service
        .send_html(msg.chat.id, templates::statistics(&stats))
        .await?;
    Ok(())
}
