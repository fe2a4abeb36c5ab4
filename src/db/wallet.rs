use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{is_foreign_key_violation, is_unique_violation, StoreError};
use crate::models::{TrackedWallet, Wallet};
use crate::validation::normalize_address;

/// Register a wallet for a user. The sync cursor starts at block 0. The
/// engine's constraints make the check-and-insert atomic: a unique
/// violation means this user already registered the address, a foreign
/// key violation means the user was never registered.
pub async fn add_wallet(
    pool: &SqlitePool,
    wallet_address: &str,
    user_id: i64,
) -> Result<Wallet, StoreError> {
    let address = normalize_address(wallet_address);
    let now = Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO wallets (wallet_address, user_id, added_at, last_processed_block, is_active)
         VALUES (?, ?, ?, 0, 1)",
    )
    .bind(&address)
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            StoreError::DuplicateRegistration {
                wallet_address: address.clone(),
                user_id,
            }
        } else if is_foreign_key_violation(&err) {
            StoreError::UnknownUser(user_id)
        } else {
            StoreError::from(err)
        }
    })?;

    Ok(Wallet {
        id: result.last_insert_rowid(),
        wallet_address: address,
        user_id,
        added_at: now,
        last_processed_block: 0,
        is_active: true,
    })
}

/// Soft delete. Returns whether a row actually flipped; deactivating an
/// unknown or already-inactive wallet is a no-op, not an error.
pub async fn deactivate_wallet(
    pool: &SqlitePool,
    wallet_address: &str,
    user_id: i64,
) -> Result<bool, StoreError> {
    let address = normalize_address(wallet_address);

    let result = sqlx::query(
        "UPDATE wallets SET is_active = 0
         WHERE wallet_address = ? AND user_id = ? AND is_active = 1",
    )
    .bind(&address)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Move the sync cursor forward. The monotonicity guard lives in the
/// UPDATE itself, so concurrent submissions converge to the maximum block
/// ever submitted; resubmitting the current high-water mark is a no-op
/// success. The cursor survives deactivation, so `is_active` is not part
/// of the predicate.
pub async fn advance_sync_cursor(
    pool: &SqlitePool,
    wallet_address: &str,
    user_id: i64,
    block_number: i64,
) -> Result<(), StoreError> {
    let address = normalize_address(wallet_address);

    let result = sqlx::query(
        "UPDATE wallets SET last_processed_block = ?
         WHERE wallet_address = ? AND user_id = ? AND last_processed_block <= ?",
    )
    .bind(block_number)
    .bind(&address)
    .bind(user_id)
    .bind(block_number)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        return Ok(());
    }

    let current: Option<i64> = sqlx::query_scalar(
        "SELECT last_processed_block FROM wallets WHERE wallet_address = ? AND user_id = ?",
    )
    .bind(&address)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match current {
        Some(current) => Err(StoreError::NonMonotonicUpdate {
            wallet_address: address,
            current,
            submitted: block_number,
        }),
        None => Err(StoreError::UnknownWallet {
            wallet_address: address,
            user_id,
        }),
    }
}

pub async fn get_wallet(
    pool: &SqlitePool,
    wallet_address: &str,
    user_id: i64,
) -> Result<Option<Wallet>, StoreError> {
    let address = normalize_address(wallet_address);

    let wallet = sqlx::query_as::<_, Wallet>(
        "SELECT id, wallet_address, user_id, added_at, last_processed_block, is_active
         FROM wallets WHERE wallet_address = ? AND user_id = ?",
    )
    .bind(&address)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(wallet)
}

/// Active wallets, newest registration first, optionally scoped to one
/// user.
pub async fn list_active_wallets(
    pool: &SqlitePool,
    user_id: Option<i64>,
) -> Result<Vec<Wallet>, StoreError> {
    let wallets = match user_id {
        Some(user_id) => {
            sqlx::query_as::<_, Wallet>(
                "SELECT id, wallet_address, user_id, added_at, last_processed_block, is_active
                 FROM wallets WHERE user_id = ? AND is_active = 1
                 ORDER BY added_at DESC, id DESC",
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Wallet>(
                "SELECT id, wallet_address, user_id, added_at, last_processed_block, is_active
                 FROM wallets WHERE is_active = 1
                 ORDER BY added_at DESC, id DESC",
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(wallets)
}

/// The watcher's poll set: every active wallet with the owner's chat
/// destination attached.
pub async fn list_active_with_users(pool: &SqlitePool) -> Result<Vec<TrackedWallet>, StoreError> {
    let wallets = sqlx::query_as::<_, TrackedWallet>(
        "SELECT w.wallet_address, w.user_id, w.last_processed_block, u.chat_id, u.username
         FROM wallets w
         JOIN users u ON w.user_id = u.user_id
         WHERE w.is_active = 1
         ORDER BY w.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(wallets)
}
