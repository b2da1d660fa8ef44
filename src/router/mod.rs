//! Command and callback routing tables
//!
//! A [`BotRouter`] is filled once during startup and then shared read-only
//! (behind an `Arc`) with the dispatcher.

pub mod callback;
pub mod command;

pub use callback::{BotCallback, CallbackPattern, CallbackRegistry};
pub use command::{command_token, BotCommand, CommandRegistry, COMMAND_PREFIX};

use std::future::Future;

use teloxide::types::{CallbackQuery, Message};
use tracing::{debug, warn};

use crate::utils::errors::Result;
use crate::utils::helpers::is_valid_callback_data;

#[derive(Clone, Default, Debug)]
pub struct BotRouter {
    commands: CommandRegistry,
    callbacks: CallbackRegistry,
}

impl BotRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_command(&mut self, command: BotCommand) {
        debug!(token = %command.token, "Registering command");
        if self.commands.register(command).is_some() {
            debug!("Replaced an earlier registration for the same token");
        }
    }

    pub fn register_callback(&mut self, callback: BotCallback) {
        debug!(pattern = %callback.pattern.source(), "Registering callback");
        if let CallbackPattern::Exact(ref data) = callback.pattern {
            if !is_valid_callback_data(data) {
                warn!(data = %data, "Callback data Telegram can never deliver");
            }
        }
        self.callbacks.register(callback);
    }

    /// Builder-style command registration
    pub fn command<F, Fut>(mut self, token: &str, description: &str, handler: F) -> Self
    where
        F: Fn(Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.register_command(BotCommand::new(token, description, handler));
        self
    }

    /// Builder-style callback registration
    pub fn callback<F, Fut>(mut self, pattern: impl Into<CallbackPattern>, handler: F) -> Self
    where
        F: Fn(CallbackQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.register_callback(BotCallback::new(pattern, handler));
        self
    }

    pub fn unregister_command(&mut self, token: &str) -> Option<BotCommand> {
        self.commands.remove(token)
    }

    pub fn unregister_callback(&mut self, source: &str) -> Option<BotCallback> {
        self.callbacks.remove(source)
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Handler for the command a message text starts with, if any
    pub fn resolve_command(&self, text: &str) -> Option<&BotCommand> {
        command_token(text).and_then(|token| self.commands.get(token))
    }

    pub fn resolve_callback(&self, data: &str) -> Option<&BotCallback> {
        self.callbacks.find(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_registration() {
        let router = BotRouter::new()
            .command("/start", "Start the bot", |_msg| async { Ok(()) })
            .command("/help", "Show help", |_msg| async { Ok(()) })
            .callback(CallbackPattern::regex("^settings_").unwrap(), |_q| async { Ok(()) });

        assert_eq!(router.commands().len(), 2);
        assert_eq!(router.callbacks().len(), 1);
        assert_eq!(router.resolve_command("/help me").unwrap().token, "/help");
        assert!(router.resolve_command("/unknown").is_none());
        assert!(router.resolve_command("hello").is_none());
        assert!(router.resolve_callback("settings_about").is_some());
    }

    #[test]
    fn test_unregister() {
        let mut router = BotRouter::new()
            .command("/start", "Start the bot", |_msg| async { Ok(()) })
            .callback("exact", |_q| async { Ok(()) });

        assert!(router.unregister_command("/start").is_some());
        assert!(router.unregister_callback("exact").is_some());
        assert!(router.commands().is_empty());
        assert!(router.callbacks().is_empty());
    }
}
