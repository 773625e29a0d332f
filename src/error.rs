use thiserror::Error;

/// Custom error type for ficnotes operations.
#[derive(Debug, Error)]
pub enum FicnotesError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A UNIQUE index rejected a write.
    ///
    /// This is the store's concurrency safety net: of two tasks racing to
    /// create the same record, exactly one observes this error.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A multi-statement store transaction did not complete.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Chat transport operation failed.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<surrealdb::Error> for FicnotesError {
    fn from(err: surrealdb::Error) -> Self {
        FicnotesError::Database(err.to_string())
    }
}

impl From<std::io::Error> for FicnotesError {
    fn from(err: std::io::Error) -> Self {
        FicnotesError::Database(format!("I/O error: {}", err))
    }
}
