//! Outbound Telegram Bot API calls
//!
//! Thin wrapper around [`teloxide::Bot`] that fixes the parse mode, logs
//! failures with context, and exposes the webhook management calls.

use teloxide::prelude::*;
use teloxide::types::{
    AllowedUpdate, BotCommand, CallbackQuery, ChatId, InlineKeyboardMarkup, Message, ParseMode,
    WebhookInfo,
};
use tracing::{debug, info};

use crate::config::BotConfig;
use crate::utils::errors::{BotError, Result};
use crate::utils::helpers::is_valid_message_text;
use crate::utils::logging::log_api_error;

#[derive(Clone, Debug)]
pub struct TelegramService {
    bot: Bot,
}

impl TelegramService {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Build the bot client from configuration, honoring a custom API URL
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let mut bot = Bot::new(&config.token);
        if let Some(ref api_url) = config.api_url {
            bot = bot.set_api_url(url::Url::parse(api_url)?);
        }
        Ok(Self::new(bot))
    }

    /// Send an HTML-formatted message
    pub async fn send_html(&self, chat_id: ChatId, text: impl Into<String>) -> Result<Message> {
        let text = checked_text(text.into())?;
        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| failed("sendMessage", chat_id, e))
    }

    /// Send an HTML-formatted message with an inline keyboard
    pub async fn send_html_with_keyboard(
        &self,
        chat_id: ChatId,
        text: impl Into<String>,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<Message> {
        let text = checked_text(text.into())?;
        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await
            .map_err(|e| failed("sendMessage", chat_id, e))
    }

    /// Acknowledge a callback query, optionally showing a notification
    pub async fn answer_callback(&self, query: &CallbackQuery, text: Option<&str>) -> Result<()> {
        let mut request = self.bot.answer_callback_query(query.id.clone());
        if let Some(text) = text {
            request = request.text(text);
        }
        request.await.map_err(|e| {
            log_api_error("answerCallbackQuery", &e.to_string(), None);
            BotError::Telegram(e)
        })?;
        Ok(())
    }

    /// Point Telegram at `url`, restricted to the update kinds the bot routes
    pub async fn set_webhook(&self, url: &str, secret: Option<&str>, drop_pending: bool) -> Result<()> {
        let url = url::Url::parse(url)?;
        let mut request = self
            .bot
            .set_webhook(url.clone())
            .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery])
            .drop_pending_updates(drop_pending);
        if let Some(secret) = secret {
            request = request.secret_token(secret.to_string());
        }

        request.await.map_err(|e| {
            log_api_error("setWebhook", &e.to_string(), Some(url.as_str()));
            BotError::Telegram(e)
        })?;
        info!(url = %url, "Webhook set");
        Ok(())
    }

    pub async fn delete_webhook(&self, drop_pending: bool) -> Result<()> {
        self.bot
            .delete_webhook()
            .drop_pending_updates(drop_pending)
            .await
            .map_err(|e| {
                log_api_error("deleteWebhook", &e.to_string(), None);
                BotError::Telegram(e)
            })?;
        info!("Webhook deleted");
        Ok(())
    }

    pub async fn webhook_info(&self) -> Result<WebhookInfo> {
        let info = self.bot.get_webhook_info().await.map_err(|e| {
            log_api_error("getWebhookInfo", &e.to_string(), None);
            BotError::Telegram(e)
        })?;
        debug!(pending = info.pending_update_count, "Fetched webhook info");
        Ok(info)
    }

    /// Publish the command menu shown by Telegram clients
    pub async fn set_commands(&self, commands: Vec<BotCommand>) -> Result<()> {
        let count = commands.len();
        self.bot.set_my_commands(commands).await.map_err(|e| {
            log_api_error("setMyCommands", &e.to_string(), None);
            BotError::Telegram(e)
        })?;
        info!(count = count, "Bot command menu published");
        Ok(())
    }
}

fn checked_text(text: String) -> Result<String> {
    if is_valid_message_text(&text) {
        Ok(text)
    } else {
        Err(BotError::InvalidInput(format!(
            "message text is {} characters long",
            text.chars().count()
        )))
    }
}

fn failed(method: &str, chat_id: ChatId, error: teloxide::RequestError) -> BotError {
    let context = format!("chat_id={}", chat_id.0);
    log_api_error(method, &error.to_string(), Some(&context));
    BotError::Telegram(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::helpers::MAX_MESSAGE_LENGTH;

    #[test]
    fn test_checked_text() {
        assert!(checked_text("hello".to_string()).is_ok());
        let too_long = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(matches!(checked_text(too_long), Err(BotError::InvalidInput(_))));
    }

    #[test]
    fn test_from_config_rejects_bad_api_url() {
        let config = BotConfig {
            token: "123:abc".to_string(),
            webhook_url: None,
            webhook_secret: None,
            api_url: Some("not a url".to_string()),
        };
        assert!(matches!(TelegramService::from_config(&config), Err(BotError::UrlParse(_))));
    }
}
