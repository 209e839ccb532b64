//! Error types for the consent engine

use thiserror::Error;

/// Main error type for consent storage and persistence operations
///
/// Note that most failures never surface to callers of the high-level
/// [`ConsentManager`](crate::ConsentManager) API: reads degrade to "no
/// consent recorded" and writes report a boolean outcome, per the
/// fail-soft contract of the consent lifecycle.
#[derive(Error, Debug)]
pub enum ConsentError {
    /// Backing store could not be reached (privacy mode, detached store)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Write rejected because the store is out of space
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Error during serialization/deserialization of the consent record
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using ConsentError
pub type ConsentResult<T> = Result<T, ConsentError>;
