//! User service implementation
//!
//! Keeps the local user table in step with what Telegram reports about the
//! people talking to the bot, and answers profile and statistics lookups.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::database::UserStore;
use crate::events::{BotEvent, EventBus};
use crate::models::user::{CreateUserRequest, TelegramProfile, UpdateUserRequest, User, UserStatistics};
use crate::utils::errors::{BotError, Result};
use crate::utils::helpers::is_valid_telegram_id;

/// Users seen within this many days count as active
pub const ACTIVE_WINDOW_DAYS: i64 = 7;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    events: EventBus,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Register the sender on first contact, refresh their profile when it
    /// changed, and record the interaction time.
    pub async fn sync_telegram_user(&self, telegram_user: &teloxide::types::User) -> Result<User> {
        let profile = TelegramProfile::from(telegram_user);
        let telegram_id = profile.telegram_id;
        let now = Utc::now();
        if !is_valid_telegram_id(telegram_id) {
            return Err(BotError::InvalidInput(format!("invalid telegram id {}", telegram_id)));
        }

        let user = self.sync_profile(profile).await?;
        self.store.touch_last_activity(telegram_id, now).await?;
        Ok(User {
            last_activity: Some(now),
            ..user
        })
    }

    async fn sync_profile(&self, profile: TelegramProfile) -> Result<User> {
        let telegram_id = profile.telegram_id;

        match self.store.find_by_telegram_id(telegram_id).await? {
            None => {
                let user = self.store.create(CreateUserRequest::from(profile)).await?;
                self.events.publish(BotEvent::UserRegistered(user.clone()));
                Ok(user)
            }
            Some(existing) if existing.differs_from(&profile) => {
                let user = self
                    .store
                    .update(existing.id, UpdateUserRequest::from(profile))
                    .await?;
                self.events.publish(BotEvent::UserUpdated(user.clone()));
                Ok(user)
            }
            Some(existing) => Ok(existing),
        }
    }

    /// Look up a registered user; a missing user is an error
    pub async fn require_user(&self, telegram_id: i64) -> Result<User> {
        self.store
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or(BotError::UserNotFound { telegram_id })
    }

    pub async fn statistics(&self) -> Result<UserStatistics> {
        let since = Utc::now() - Duration::days(ACTIVE_WINDOW_DAYS);
        let total_users = self.store.count().await?;
        let active_users = self.store.count_active_since(since).await?;

        Ok(UserStatistics {
            total_users,
            active_users,
            active_window_days: ACTIVE_WINDOW_DAYS,
        })
    }
}
