use gameloggr_db::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Invalid export file: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to encode export: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Unsupported export version '{0}'")]
    UnsupportedVersion(String),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
