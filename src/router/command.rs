//! Command registry
//!
//! Maps a command token such as `/start` to the handler that serves it.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use teloxide::types::Message;

use crate::utils::errors::Result;

/// Every command token starts with this character
pub const COMMAND_PREFIX: char = '/';

pub type CommandHandler = Arc<dyn Fn(Message) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// A command token bound to its handler
#[derive(Clone)]
pub struct BotCommand {
    pub token: String,
    pub description: String,
    handler: CommandHandler,
}

impl BotCommand {
    pub fn new<F, Fut>(token: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            token: token.into(),
            description: description.into(),
            handler: Arc::new(move |msg| -> BoxFuture<'static, Result<()>> {
                Box::pin(handler(msg))
            }),
        }
    }

    pub async fn invoke(&self, message: Message) -> Result<()> {
        (self.handler)(message).await
    }
}

impl std::fmt::Debug for BotCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotCommand")
            .field("token", &self.token)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Extract the command token from a message text.
///
/// Returns the leading whitespace-delimited word, prefix included, when the
/// text starts with [`COMMAND_PREFIX`]. Matching is case-sensitive.
pub fn command_token(text: &str) -> Option<&str> {
    if !text.starts_with(COMMAND_PREFIX) {
        return None;
    }
    text.split_whitespace().next()
}

#[derive(Clone, Default, Debug)]
pub struct CommandRegistry {
    commands: BTreeMap<String, BotCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A later registration for the same token replaces
    /// the earlier one and the replaced command is returned.
    pub fn register(&mut self, command: BotCommand) -> Option<BotCommand> {
        self.commands.insert(command.token.clone(), command)
    }

    pub fn get(&self, token: &str) -> Option<&BotCommand> {
        self.commands.get(token)
    }

    pub fn remove(&mut self, token: &str) -> Option<BotCommand> {
        self.commands.remove(token)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BotCommand> {
        self.commands.values()
    }

    /// Command menu entries for `setMyCommands`
    pub fn bot_commands(&self) -> Vec<teloxide::types::BotCommand> {
        self.iter()
            .map(|cmd| {
                teloxide::types::BotCommand::new(
                    cmd.token.trim_start_matches(COMMAND_PREFIX),
                    cmd.description.clone(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn noop(token: &str, description: &str) -> BotCommand {
        BotCommand::new(token, description, |_msg| async { Ok(()) })
    }

    #[test]
    fn test_command_token_extraction() {
        assert_eq!(command_token("/start"), Some("/start"));
        assert_eq!(command_token("/start  payload here"), Some("/start"));
        assert_eq!(command_token("/help\nmore"), Some("/help"));
        assert_eq!(command_token("start"), None);
        assert_eq!(command_token(" /start"), None);
        assert_eq!(command_token(""), None);
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("/start", "Start the bot"));
        assert!(registry.get("/start").is_some());
        assert!(registry.get("/Start").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(noop("/start", "first")).is_none());
        let replaced = registry.register(noop("/start", "second"));

        assert_eq!(replaced.map(|c| c.description), Some("first".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("/start").unwrap().description, "second");
    }

    #[test]
    fn test_remove_restores_prior_state() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("/help", "Help"));
        registry.register(noop("/start", "Start"));

        assert!(registry.remove("/start").is_some());
        assert!(registry.remove("/start").is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("/help").is_some());
    }

    #[test]
    fn test_bot_commands_strip_prefix() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("/start", "Start the bot"));
        registry.register(noop("/help", "Show help information"));

        let menu = registry.bot_commands();
        let names: Vec<_> = menu.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(names, vec!["help", "start"]);
        assert_eq!(menu[1].description, "Start the bot");
    }

    proptest! {
        #[test]
        fn prop_token_is_first_word(cmd in "/[a-z_]{1,16}", rest in "( [a-z ]{0,20})?") {
            let text = format!("{}{}", cmd, rest);
            prop_assert_eq!(command_token(&text), Some(cmd.as_str()));
        }

        #[test]
        fn prop_plain_text_never_a_command(text in "[a-z][a-z /]{0,30}") {
            prop_assert_eq!(command_token(&text), None);
        }
    }
}
