//! Message templates
//!
//! All user-facing texts are HTML (sent with `ParseMode::Html`). Anything that
//! originates from a user is escaped before it is interpolated.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::models::{User, UserStatistics};
use crate::utils::helpers::{escape_html, format_date, format_timestamp};

pub const BOT_NAME: &str = "Safir Bot";

pub const SETTINGS_NOTIFICATIONS: &str = "settings_notifications";
pub const SETTINGS_LANGUAGE: &str = "settings_language";
pub const SETTINGS_PRIVACY: &str = "settings_privacy";
pub const SETTINGS_ABOUT: &str = "settings_about";
pub const SETTINGS_BACK: &str = "settings_back";

pub fn welcome(user: &User) -> String {
    format!(
        "🎉 Welcome to {bot}!\n\n\
         Hello {name}! I'm your personal assistant bot.\n\n\
         Available commands:\n\
         /help - Show help information\n\
         /profile - View your profile\n\
         /settings - Bot settings\n\n\
         How can I help you today?",
        bot = BOT_NAME,
        name = escape_html(&user.display_name()),
    )
}

pub fn help() -> String {
    "📚 <b>Help &amp; Commands</b>\n\n\
     <b>Basic Commands:</b>\n\
     /start - Start the bot\n\
     /help - Show this help message\n\
     /profile - View your profile\n\
     /settings - Bot settings\n\
     /stats - Show bot statistics\n\n\
     <b>Need more help?</b>\n\
     Contact the administrator for assistance."
        .to_string()
}

pub fn profile(user: &User) -> String {
    let username = user
        .username
        .as_deref()
        .map(|u| format!("@{}", escape_html(u)))
        .unwrap_or_else(|| "Not set".to_string());
    let language = user
        .language_code
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "Not set".to_string());
    let last_activity = user
        .last_activity
        .map(format_timestamp)
        .unwrap_or_else(|| "Never".to_string());

    format!(
        "👤 <b>Your Profile</b>\n\n\
         <b>Name:</b> {name}\n\
         <b>Username:</b> {username}\n\
         <b>Telegram ID:</b> <code>{id}</code>\n\
         <b>Language:</b> {language}\n\
         <b>Premium:</b> {premium}\n\
         <b>Member since:</b> {since}\n\
         <b>Last activity:</b> {last_activity}",
        name = escape_html(&user.full_name()),
        id = user.telegram_id,
        premium = if user.is_premium { "Yes" } else { "No" },
        since = format_date(user.created_at),
    )
}

pub fn settings_menu() -> (String, InlineKeyboardMarkup) {
    let text = "⚙️ <b>Bot Settings</b>\n\n\
                Choose an option to configure:\n\n\
                🔔 Notifications\n\
                🌐 Language\n\
                📊 Privacy\n\
                ℹ️ About"
        .to_string();

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("🔔 Notifications", SETTINGS_NOTIFICATIONS),
            InlineKeyboardButton::callback("🌐 Language", SETTINGS_LANGUAGE),
        ],
        vec![
            InlineKeyboardButton::callback("📊 Privacy", SETTINGS_PRIVACY),
            InlineKeyboardButton::callback("ℹ️ About", SETTINGS_ABOUT),
        ],
    ]);

    (text, keyboard)
}

/// Text for one settings section, keyed by callback data
pub fn settings_section(data: &str) -> String {
    match data {
        SETTINGS_NOTIFICATIONS => {
            "🔔 <b>Notification Settings</b>\n\nConfigure your notification preferences.".to_string()
        }
        SETTINGS_LANGUAGE => {
            "🌐 <b>Language Settings</b>\n\nSelect your preferred language.".to_string()
        }
        SETTINGS_PRIVACY => {
            "📊 <b>Privacy Settings</b>\n\nManage your privacy and data preferences.".to_string()
        }
        SETTINGS_ABOUT => format!(
            "ℹ️ <b>About {}</b>\n\nVersion: {}\nBuilt with Rust, teloxide, and PostgreSQL.",
            BOT_NAME,
            env!("CARGO_PKG_VERSION")
        ),
        _ => "❌ Unknown setting option.".to_string(),
    }
}

pub fn back_to_settings_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "🔙 Back to Settings",
        SETTINGS_BACK,
    )]])
}

pub fn statistics(stats: &UserStatistics) -> String {
    format!(
        "📊 <b>Bot Statistics</b>\n\n\
         <b>Total users:</b> {}\n\
         <b>Active in the last {} days:</b> {}",
        stats.total_users, stats.active_window_days, stats.active_users
    )
}
