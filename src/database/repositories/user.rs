//! User repository implementation

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::database::store::UserStore;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::{BotError, Result};
use crate::utils::logging::log_database_operation;

const USER_COLUMNS: &str = "id, telegram_id, first_name, last_name, username, language_code, \
     is_bot, is_premium, is_active, last_activity, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE telegram_id = $1",
            USER_COLUMNS
        ))
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await;

        log_database_operation(
            "select",
            "users",
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
        Ok(result?)
    }

    async fn create(&self, request: CreateUserRequest) -> Result<User> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (telegram_id, first_name, last_name, username, language_code,
                               is_bot, is_premium, is_active, last_activity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $8, $8)
            ON CONFLICT (telegram_id) DO UPDATE
            SET first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                username = EXCLUDED.username,
                language_code = EXCLUDED.language_code,
                is_premium = EXCLUDED.is_premium,
                last_activity = EXCLUDED.last_activity,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(request.telegram_id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.username)
        .bind(request.language_code)
        .bind(request.is_bot)
        .bind(request.is_premium)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = $3,
                username = $4,
                language_code = $5,
                is_premium = COALESCE($6, is_premium),
                is_active = COALESCE($7, is_active),
                updated_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.username)
        .bind(request.language_code)
        .bind(request.is_premium)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| BotError::InvalidInput(format!("No user with id {}", id)))
    }

    async fn touch_last_activity(&self, telegram_id: i64, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE users SET last_activity = $2 WHERE telegram_id = $1")
            .bind(telegram_id)
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn count_active_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE last_activity >= $1 AND is_active = TRUE",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
