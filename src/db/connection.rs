use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StoreError;

/// Open the SQLite pool. WAL mode for concurrent readers, and foreign
/// keys switched on per connection since the wallets→users reference is
/// part of the store's contract.
pub async fn establish_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(StoreError::from)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}
