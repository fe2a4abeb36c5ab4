pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
pub mod validation;


pub use api::error::ApiError;
pub use api::response::ApiResponse;
pub use api::route::create_router;
pub use db::{balance, connection, migration, transaction, user, wallet};
pub use error::StoreError;
pub use models::{
    BalanceSnapshot, Cursor, NewBalanceSnapshot, NewTransaction, RecordOutcome, TrackedWallet,
    TransactionPage, TransactionRecord, User, UserProfile, Wallet,
};
pub use state::AppState;
pub use validation::{normalize_address, validate_wallet_address};
