use thiserror::Error;

/// Failures of the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value exists but is not a valid debt list.
    #[error("corrupt data under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize debts: {0}")]
    Serialize(#[source] serde_json::Error),

    /// JSON has no representation for NaN or infinity.
    #[error("debt {id} has a non-finite amount and cannot be saved")]
    NonFiniteAmount { id: String },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}
