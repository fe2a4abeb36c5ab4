use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failures surfaced by the ledger store. Constraint and validation
/// outcomes are typed so callers can tell "already exists" apart from
/// "invalid state"; only `TransientStorage` is safe to retry, and the
/// retry itself belongs to the caller, never to this layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("wallet {wallet_address} is already registered for user {user_id}")]
    DuplicateRegistration { wallet_address: String, user_id: i64 },

    #[error("user {0} is not registered")]
    UnknownUser(i64),

    #[error("wallet {wallet_address} is not registered for user {user_id}")]
    UnknownWallet { wallet_address: String, user_id: i64 },

    #[error(
        "sync cursor for wallet {wallet_address} is at block {current}, refusing to move back to {submitted}"
    )]
    NonMonotonicUpdate {
        wallet_address: String,
        current: i64,
        submitted: i64,
    },

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("transient storage error: {0}")]
    TransientStorage(#[source] sqlx::Error),

    #[error("permanent storage error: {0}")]
    PermanentStorage(#[source] sqlx::Error),
}

impl StoreError {
    /// True only for failures where a retry can possibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::TransientStorage(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return StoreError::ConstraintViolation(db_err.message().to_string());
                }
                _ => return StoreError::PermanentStorage(err),
            }
        }
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::TransientStorage(err)
            }
            other => StoreError::PermanentStorage(other),
        }
    }
}

// Used by write paths that promote specific violations to typed variants
// before falling back to the blanket `From` classification.

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if matches!(db_err.kind(), ErrorKind::UniqueViolation))
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if matches!(db_err.kind(), ErrorKind::ForeignKeyViolation))
}
