use sqlx::SqlitePool;
use tracing::info;

use crate::error::StoreError;

/// DDL run at startup. Column set, constraints, and indexes mirror the
/// original Postgres schema, rendered in SQLite types (epoch-second
/// INTEGER timestamps, INTEGER booleans).
const DDL_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY,
        chat_id INTEGER NOT NULL,
        username TEXT,
        first_name TEXT,
        last_name TEXT,
        created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
        updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
    )",
    "CREATE TABLE IF NOT EXISTS wallets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        wallet_address TEXT NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users(user_id),
        added_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
        last_processed_block INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        UNIQUE (wallet_address, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        wallet_address TEXT NOT NULL,
        tx_hash TEXT NOT NULL UNIQUE,
        tx_type TEXT NOT NULL,
        from_address TEXT,
        to_address TEXT,
        value TEXT,
        token_address TEXT,
        token_symbol TEXT,
        token_name TEXT,
        token_id TEXT,
        function_name TEXT,
        block_number INTEGER,
        gas_used INTEGER,
        created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
    )",
    "CREATE TABLE IF NOT EXISTS balance_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        wallet_address TEXT NOT NULL,
        token_address TEXT,
        balance TEXT NOT NULL,
        balance_eth REAL,
        block_number INTEGER,
        created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
    )",
    "CREATE INDEX IF NOT EXISTS idx_wallets_address ON wallets(wallet_address)",
    "CREATE INDEX IF NOT EXISTS idx_wallets_user ON wallets(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_wallet ON transactions(wallet_address)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_hash ON transactions(tx_hash)",
    "CREATE INDEX IF NOT EXISTS idx_balance_wallet ON balance_history(wallet_address)",
];

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StoreError> {
    info!("Running database migrations...");

    for statement in DDL_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database migrations completed successfully");
    Ok(())
}
