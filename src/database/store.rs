//! Storage abstraction for user records
//!
//! Services talk to this trait so they can run against Postgres in production
//! and against an in-memory double in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::Result;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by Telegram id
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>>;

    /// Insert a new user and return the stored row. A row that already
    /// exists for the same Telegram id is refreshed instead, so concurrent
    /// first contacts from one user both succeed.
    async fn create(&self, request: CreateUserRequest) -> Result<User>;

    /// Apply a profile update to the user with the given primary key
    async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User>;

    /// Record that the user interacted with the bot at `at`
    async fn touch_last_activity(&self, telegram_id: i64, at: DateTime<Utc>) -> Result<()>;

    /// Total number of users
    async fn count(&self) -> Result<i64>;

    /// Active users seen at or after `since`
    async fn count_active_since(&self, since: DateTime<Utc>) -> Result<i64>;
}
