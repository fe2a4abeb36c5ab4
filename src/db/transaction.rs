use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{Cursor, NewTransaction, RecordOutcome, TransactionPage, TransactionRecord};
use crate::validation::normalize_address;

const SELECT_COLUMNS: &str = "id, wallet_address, tx_hash, tx_type, from_address, to_address, \
     value, token_address, token_symbol, token_name, token_id, function_name, \
     block_number, gas_used, created_at";

/// Record an observed transaction. Upstream delivery is at-least-once, so
/// the tx_hash unique constraint plus ON CONFLICT DO NOTHING makes this
/// idempotent: under any number of concurrent calls for one hash, exactly
/// one row persists and every caller gets its id back.
pub async fn record_transaction(
    pool: &SqlitePool,
    tx: &NewTransaction,
) -> Result<RecordOutcome, StoreError> {
    let address = normalize_address(&tx.wallet_address);
    let now = Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO transactions
         (wallet_address, tx_hash, tx_type, from_address, to_address, value,
          token_address, token_symbol, token_name, token_id, function_name,
          block_number, gas_used, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(tx_hash) DO NOTHING",
    )
    .bind(&address)
    .bind(&tx.tx_hash)
    .bind(&tx.tx_type)
    .bind(&tx.from_address)
    .bind(&tx.to_address)
    .bind(&tx.value)
    .bind(&tx.token_address)
    .bind(&tx.token_symbol)
    .bind(&tx.token_name)
    .bind(&tx.token_id)
    .bind(&tx.function_name)
    .bind(tx.block_number)
    .bind(tx.gas_used)
    .bind(now)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        return Ok(RecordOutcome {
            id: result.last_insert_rowid(),
            inserted: true,
        });
    }

    // Conflict path. Rows are never deleted, so the hash must resolve.
    let id: i64 = sqlx::query_scalar("SELECT id FROM transactions WHERE tx_hash = ?")
        .bind(&tx.tx_hash)
        .fetch_one(pool)
        .await?;

    Ok(RecordOutcome {
        id,
        inserted: false,
    })
}

/// Page through a wallet's transactions in (block_number, id) ascending
/// order — the replay order a notifier wants. `since_block` trims history,
/// `cursor` is the position returned by the previous page. Transactions
/// with no block number are treated as block 0.
pub async fn list_transactions(
    pool: &SqlitePool,
    wallet_address: &str,
    since_block: Option<i64>,
    limit: i64,
    cursor: Option<Cursor>,
) -> Result<TransactionPage, StoreError> {
    let address = normalize_address(wallet_address);
    let since = since_block.unwrap_or(0);
    let (cursor_block, cursor_id) = match cursor {
        Some(c) => (c.block_number, c.id),
        None => (-1, i64::MAX),
    };

    let transactions = sqlx::query_as::<_, TransactionRecord>(&format!(
        "SELECT {SELECT_COLUMNS}
         FROM transactions
         WHERE wallet_address = ?
           AND COALESCE(block_number, 0) >= ?
           AND (COALESCE(block_number, 0) > ? OR (COALESCE(block_number, 0) = ? AND id > ?))
         ORDER BY COALESCE(block_number, 0) ASC, id ASC
         LIMIT ?"
    ))
    .bind(&address)
    .bind(since)
    .bind(cursor_block)
    .bind(cursor_block)
    .bind(cursor_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let next_cursor = if transactions.len() as i64 == limit {
        transactions.last().map(|tx| Cursor {
            block_number: tx.block_number.unwrap_or(0),
            id: tx.id,
        })
    } else {
        None
    };

    Ok(TransactionPage {
        transactions,
        next_cursor,
    })
}

pub async fn get_by_hash(
    pool: &SqlitePool,
    tx_hash: &str,
) -> Result<Option<TransactionRecord>, StoreError> {
    let tx = sqlx::query_as::<_, TransactionRecord>(&format!(
        "SELECT {SELECT_COLUMNS} FROM transactions WHERE tx_hash = ?"
    ))
    .bind(tx_hash)
    .fetch_optional(pool)
    .await?;

    Ok(tx)
}

pub async fn count_transactions(
    pool: &SqlitePool,
    wallet_address: &str,
) -> Result<i64, StoreError> {
    let address = normalize_address(wallet_address);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE wallet_address = ?")
            .bind(&address)
            .fetch_one(pool)
            .await?;

    Ok(count)
}
