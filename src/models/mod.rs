use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user, keyed by their external chat-platform id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Mutable profile fields carried on user upsert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One (wallet_address, user_id) registration with its own sync cursor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Wallet {
    pub id: i64,
    pub wallet_address: String,
    pub user_id: i64,
    pub added_at: i64,
    pub last_processed_block: i64,
    pub is_active: bool,
}

/// An active wallet joined with its owner's chat info, the shape the
/// chain watcher polls to know what to sync and where to notify.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrackedWallet {
    pub wallet_address: String,
    pub user_id: i64,
    pub last_processed_block: i64,
    pub chat_id: i64,
    pub username: Option<String>,
}

/// An observed on-chain transaction. Immutable once recorded; `value` and
/// `token_id` stay textual so arbitrary-precision amounts survive intact.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransactionRecord {
    pub id: i64,
    pub wallet_address: String,
    pub tx_hash: String,
    pub tx_type: String,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub value: Option<String>,
    pub token_address: Option<String>,
    pub token_symbol: Option<String>,
    pub token_name: Option<String>,
    pub token_id: Option<String>,
    pub function_name: Option<String>,
    pub block_number: Option<i64>,
    pub gas_used: Option<i64>,
    pub created_at: i64,
}

/// Payload for recording a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub wallet_address: String,
    pub tx_hash: String,
    pub tx_type: String,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub value: Option<String>,
    pub token_address: Option<String>,
    pub token_symbol: Option<String>,
    pub token_name: Option<String>,
    pub token_id: Option<String>,
    pub function_name: Option<String>,
    pub block_number: Option<i64>,
    pub gas_used: Option<i64>,
}

/// Result of `record_transaction`: the row id, and whether this call
/// inserted it or found it already present.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecordOutcome {
    pub id: i64,
    pub inserted: bool,
}

/// A point-in-time balance for a wallet/token pair. `token_address = None`
/// means the native asset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BalanceSnapshot {
    pub id: i64,
    pub wallet_address: String,
    pub token_address: Option<String>,
    pub balance: String,
    pub balance_eth: Option<f64>,
    pub block_number: Option<i64>,
    pub created_at: i64,
}

/// Payload for appending a balance snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBalanceSnapshot {
    pub wallet_address: String,
    pub token_address: Option<String>,
    pub balance: String,
    pub balance_eth: Option<f64>,
    pub block_number: Option<i64>,
}

/// Keyset position in a wallet's transaction log, ordered by
/// (block_number, id). Transactions with no block number sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub block_number: i64,
    pub id: i64,
}

/// One page of a wallet's transactions. `next_cursor` is None once the
/// log is exhausted.
#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<TransactionRecord>,
    pub next_cursor: Option<Cursor>,
}
