//! In-memory user store

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use safir_bot::database::UserStore;
use safir_bot::models::user::{CreateUserRequest, UpdateUserRequest, User};
use safir_bot::{BotError, Result};

/// A `UserStore` backed by a vector, with a switch to make every call fail
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    failing: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn all(&self) -> Vec<User> {
        self.users.lock().await.clone()
    }

    /// Insert a row directly, bypassing the service layer
    pub async fn insert(&self, user: User) {
        self.users.lock().await.push(user);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(BotError::InvalidInput("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>> {
        self.check()?;
        let found = {
            let users = self.users.lock().await;
            users.iter().find(|u| u.telegram_id == telegram_id).cloned()
        };
        // Let concurrent callers interleave between lookup and insert
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn create(&self, request: CreateUserRequest) -> Result<User> {
        self.check()?;
        let mut users = self.users.lock().await;
        let now = Utc::now();

        // Same contract as the Postgres upsert on telegram_id
        if let Some(existing) = users.iter_mut().find(|u| u.telegram_id == request.telegram_id) {
            existing.first_name = request.first_name;
            existing.last_name = request.last_name;
            existing.username = request.username;
            existing.language_code = request.language_code;
            existing.is_premium = request.is_premium;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let user = User {
            id: users.len() as i64 + 1,
            telegram_id: request.telegram_id,
            first_name: request.first_name,
            last_name: request.last_name,
            username: request.username,
            language_code: request.language_code,
            is_bot: request.is_bot,
            is_premium: request.is_premium,
            is_active: true,
            last_activity: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User> {
        self.check()?;
        let mut users = self.users.lock().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| BotError::InvalidInput(format!("no user with id {}", id)))?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        user.last_name = request.last_name;
        user.username = request.username;
        user.language_code = request.language_code;
        if let Some(is_premium) = request.is_premium {
            user.is_premium = is_premium;
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn touch_last_activity(&self, telegram_id: i64, at: DateTime<Utc>) -> Result<()> {
        self.check()?;
        let mut users = self.users.lock().await;
        if let Some(user) = users.iter_mut().find(|u| u.telegram_id == telegram_id) {
            user.last_activity = Some(at);
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        self.check()?;
        Ok(self.users.lock().await.len() as i64)
    }

    async fn count_active_since(&self, since: DateTime<Utc>) -> Result<i64> {
        self.check()?;
        let users = self.users.lock().await;
        Ok(users
            .iter()
            .filter(|u| u.is_active && u.last_activity.is_some_and(|at| at >= since))
            .count() as i64)
    }
}
