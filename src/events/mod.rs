//! Bot event bus
//!
//! Components publish typed [`BotEvent`]s on a `tokio::sync::broadcast`
//! channel instead of calling each other directly. Publishing never fails:
//! with no subscribers the event is simply dropped.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::User;

/// Default channel capacity; slow subscribers skip events past this backlog
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    Bot,
    Database,
}

#[derive(Debug, Clone)]
pub enum BotEvent {
    MessageReceived { telegram_id: i64, chat_id: i64 },
    CallbackReceived { telegram_id: i64, data: Option<String> },
    UserRegistered(User),
    UserUpdated(User),
    CommandInvoked { command: String, telegram_id: i64 },
    Error { source: ErrorSource, message: String, context: String },
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<BotEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event, returning how many subscribers received it
    pub fn publish(&self, event: BotEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Publish an error with the context it happened in
    pub fn publish_error(&self, error: &crate::utils::errors::BotError, context: &str) -> usize {
        let source = if error.is_database() {
            ErrorSource::Database
        } else {
            ErrorSource::Bot
        };
        self.publish(BotEvent::Error {
            source,
            message: error.to_string(),
            context: context.to_string(),
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BotEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Spawn a task that logs every event published on the bus
pub fn spawn_logger(bus: &EventBus) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => log_event(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped = skipped, "Event logger lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn log_event(event: &BotEvent) {
    match event {
        BotEvent::MessageReceived { telegram_id, chat_id } => {
            debug!(telegram_id = telegram_id, chat_id = chat_id, "Message received");
        }
        BotEvent::CallbackReceived { telegram_id, data } => {
            debug!(telegram_id = telegram_id, data = ?data, "Callback received");
        }
        BotEvent::UserRegistered(user) => {
            info!(telegram_id = user.telegram_id, name = %user.display_name(), "New user registered");
        }
        BotEvent::UserUpdated(user) => {
            debug!(telegram_id = user.telegram_id, "User info updated");
        }
        BotEvent::CommandInvoked { command, telegram_id } => {
            info!(command = %command, telegram_id = telegram_id, "Command invoked");
        }
        // Publishers log failures where they happen
        BotEvent::Error { source: ErrorSource::Database, message, context } => {
            debug!(source = "database", context = %context, error = %message, "Database error published");
        }
        BotEvent::Error { source: ErrorSource::Bot, message, context } => {
            debug!(source = "bot", context = %context, error = %message, "Bot error published");
        }
    }
}
