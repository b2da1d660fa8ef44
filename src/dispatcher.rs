//! Update dispatcher
//!
//! Routes one Telegram update to at most one command handler or callback
//! handler. Unknown commands and unmatched callback data are dropped silently.

use std::sync::Arc;

use teloxide::types::{CallbackQuery, Message, Update, UpdateKind};
use tracing::{debug, info};

use crate::events::{BotEvent, EventBus};
use crate::router::BotRouter;
use crate::services::UserService;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct Dispatcher {
    router: Arc<BotRouter>,
    users: Option<UserService>,
    events: EventBus,
}

impl Dispatcher {
    pub fn new(router: Arc<BotRouter>, events: EventBus) -> Self {
        Self {
            router,
            users: None,
            events,
        }
    }

    /// Mirror every sender into the user store before routing
    pub fn with_user_tracking(mut self, users: UserService) -> Self {
        self.users = Some(users);
        self
    }

    /// Route a single update. Errors raised by handlers are returned to the
    /// caller unchanged.
    pub async fn dispatch(&self, update: Update) -> Result<()> {
        let update_id = update.id;
        match update.kind {
            UpdateKind::Message(message) => self.handle_message(message).await,
            UpdateKind::CallbackQuery(query) => self.handle_callback_query(query).await,
            _ => {
                debug!(update_id = ?update_id, "Ignoring unsupported update kind");
                Ok(())
            }
        }
    }

    async fn handle_message(&self, message: Message) -> Result<()> {
        let Some(from) = message.from.as_ref() else {
            return Ok(());
        };
        let telegram_id = from.id.0 as i64;

        if let Some(ref users) = self.users {
            users.sync_telegram_user(from).await?;
        }
        self.events.publish(BotEvent::MessageReceived {
            telegram_id,
            chat_id: message.chat.id.0,
        });

        let Some(text) = message.text() else {
            return Ok(());
        };
        match self.router.resolve_command(text) {
            Some(command) => {
                info!(command = %command.token, telegram_id = telegram_id, "Dispatching command");
                command.invoke(message).await
            }
            None => {
                debug!(telegram_id = telegram_id, "No command registered for message");
                Ok(())
            }
        }
    }

    async fn handle_callback_query(&self, query: CallbackQuery) -> Result<()> {
        let telegram_id = query.from.id.0 as i64;

        if let Some(ref users) = self.users {
            users.sync_telegram_user(&query.from).await?;
        }
        self.events.publish(BotEvent::CallbackReceived {
            telegram_id,
            data: query.data.clone(),
        });

        let Some(data) = query.data.as_deref() else {
            return Ok(());
        };
        match self.router.resolve_callback(data) {
            Some(callback) => {
                info!(pattern = %callback.pattern.source(), telegram_id = telegram_id, "Dispatching callback");
                callback.invoke(query.clone()).await
            }
            None => {
                debug!(telegram_id = telegram_id, data = %data, "No callback pattern matched");
                Ok(())
            }
        }
    }
}
