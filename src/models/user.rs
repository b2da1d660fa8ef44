//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
    pub is_premium: bool,
    pub is_active: bool,
    pub last_activity: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name used when greeting the user
    pub fn display_name(&self) -> String {
        match self.username {
            Some(ref username) => format!("@{}", username),
            None => self.first_name.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        match self.last_name {
            Some(ref last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        }
    }

    /// Whether the profile differs from what Telegram reports now
    pub fn differs_from(&self, profile: &TelegramProfile) -> bool {
        self.first_name != profile.first_name
            || self.last_name != profile.last_name
            || self.username != profile.username
            || self.language_code != profile.language_code
            || self.is_premium != profile.is_premium
    }
}

/// The subset of a Telegram user we mirror into the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramProfile {
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
    pub is_premium: bool,
}

impl From<&teloxide::types::User> for TelegramProfile {
    fn from(user: &teloxide::types::User) -> Self {
        Self {
            telegram_id: user.id.0 as i64,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            language_code: user.language_code.clone(),
            is_bot: user.is_bot,
            is_premium: user.is_premium,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
    pub is_premium: bool,
}

impl From<TelegramProfile> for CreateUserRequest {
    fn from(profile: TelegramProfile) -> Self {
        Self {
            telegram_id: profile.telegram_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            username: profile.username,
            language_code: profile.language_code,
            is_bot: profile.is_bot,
            is_premium: profile.is_premium,
        }
    }
}

/// Profile fields refreshed from Telegram; `None` keeps the stored value
/// except for the nullable columns, which are overwritten as given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub is_premium: Option<bool>,
    pub is_active: Option<bool>,
}

impl From<TelegramProfile> for UpdateUserRequest {
    fn from(profile: TelegramProfile) -> Self {
        Self {
            first_name: Some(profile.first_name),
            last_name: profile.last_name,
            username: profile.username,
            language_code: profile.language_code,
            is_premium: Some(profile.is_premium),
            is_active: None,
        }
    }
}

/// Aggregate numbers shown by the /stats command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub total_users: i64,
    pub active_users: i64,
    pub active_window_days: i64,
}
