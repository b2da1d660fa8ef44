//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod help;
pub mod profile;
pub mod settings;
pub mod start;
pub mod stats;

use crate::router::{BotCommand, BotRouter};
use crate::services::ServiceFactory;

/// Register every command handler on the router
pub fn register(router: &mut BotRouter, services: &ServiceFactory) {
    let s = services.clone();
    router.register_command(BotCommand::new("/start", "Start the bot", move |msg| {
        start::handle_start(msg, s.clone())
    }));

    let s = services.clone();
    router.register_command(BotCommand::new("/help", "Show help information", move |msg| {
        help::handle_help(msg, s.clone())
    }));

    let s = services.clone();
    router.register_command(BotCommand::new("/profile", "Show your profile", move |msg| {
        profile::handle_profile(msg, s.clone())
    }));

    let s = services.clone();
    router.register_command(BotCommand::new("/settings", "Bot settings", move |msg| {
        settings::handle_settings(msg, s.clone())
    }));

    let s = services.clone();
    router.register_command(BotCommand::new("/stats", "Show bot statistics", move |msg| {
        stats::handle_stats(msg, s.clone())
    }));
}
