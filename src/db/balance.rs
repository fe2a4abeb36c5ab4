use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{BalanceSnapshot, NewBalanceSnapshot};
use crate::validation::normalize_address;

/// Append a balance snapshot. The history is append-only with no dedup
/// key; whether a snapshot is warranted at all is the ingestion policy's
/// call, not this layer's.
pub async fn append_snapshot(
    pool: &SqlitePool,
    snapshot: &NewBalanceSnapshot,
) -> Result<i64, StoreError> {
    let address = normalize_address(&snapshot.wallet_address);
    let token_address = snapshot.token_address.as_deref().map(normalize_address);
    let now = Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO balance_history
         (wallet_address, token_address, balance, balance_eth, block_number, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&address)
    .bind(&token_address)
    .bind(&snapshot.balance)
    .bind(snapshot.balance_eth)
    .bind(snapshot.block_number)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// The snapshot at the greatest chain height for a wallet/token pair,
/// ties broken by the most recently inserted row. `token_address = None`
/// selects the native-asset series.
pub async fn latest_balance(
    pool: &SqlitePool,
    wallet_address: &str,
    token_address: Option<&str>,
) -> Result<Option<BalanceSnapshot>, StoreError> {
    let address = normalize_address(wallet_address);

    let snapshot = match token_address {
        Some(token) => {
            let token = normalize_address(token);
            sqlx::query_as::<_, BalanceSnapshot>(
                "SELECT id, wallet_address, token_address, balance, balance_eth, block_number, created_at
                 FROM balance_history
                 WHERE wallet_address = ? AND token_address = ?
                 ORDER BY COALESCE(block_number, 0) DESC, id DESC
                 LIMIT 1",
            )
            .bind(&address)
            .bind(&token)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, BalanceSnapshot>(
                "SELECT id, wallet_address, token_address, balance, balance_eth, block_number, created_at
                 FROM balance_history
                 WHERE wallet_address = ? AND token_address IS NULL
                 ORDER BY COALESCE(block_number, 0) DESC, id DESC
                 LIMIT 1",
            )
            .bind(&address)
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(snapshot)
}
