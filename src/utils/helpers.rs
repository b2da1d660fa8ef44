//! Helper functions and utilities
//!
//! Text limits and formatting helpers shared by handlers and templates.

use chrono::{DateTime, Utc};

/// Telegram rejects message texts longer than this
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Telegram rejects callback data longer than this (in bytes)
pub const MAX_CALLBACK_DATA_LENGTH: usize = 64;

/// Format a timestamp as a calendar date
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Check whether a text fits in a single message
pub fn is_valid_message_text(text: &str) -> bool {
    text.chars().count() <= MAX_MESSAGE_LENGTH
}

/// Check whether a string can be used as inline button callback data
pub fn is_valid_callback_data(data: &str) -> bool {
    !data.is_empty() && data.len() <= MAX_CALLBACK_DATA_LENGTH
}

/// Telegram user ids are positive
pub fn is_valid_telegram_id(id: i64) -> bool {
    id > 0
}
