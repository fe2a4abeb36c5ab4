use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{User, UserProfile};

/// Create the user if absent, otherwise refresh chat_id and profile
/// fields. Idempotent: re-registration is never an error. `updated_at`
/// is written explicitly here, the schema default only covers creation.
pub async fn upsert_user(
    pool: &SqlitePool,
    user_id: i64,
    chat_id: i64,
    profile: &UserProfile,
) -> Result<(), StoreError> {
    let now = Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO users (user_id, chat_id, username, first_name, last_name, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(user_id) DO UPDATE SET
             chat_id = excluded.chat_id,
             username = excluded.username,
             first_name = excluded.first_name,
             last_name = excluded.last_name,
             updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(chat_id)
    .bind(&profile.username)
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT user_id, chat_id, username, first_name, last_name, created_at, updated_at
         FROM users WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
