use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// No game, hardware item, or platform matched the user's input
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid argument value
    #[error("Invalid input: {0}")]
    Input(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// IGDB request failed
    #[error("IGDB error: {0}")]
    Igdb(String),

    /// Import or export failed
    #[error("Transfer error: {0}")]
    Transfer(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn igdb(msg: impl Into<String>) -> Self {
        Self::Igdb(msg.into())
    }

    pub(crate) fn transfer(msg: impl Into<String>) -> Self {
        Self::Transfer(msg.into())
    }
}

impl From<gameloggr_db::OperationError> for CliError {
    fn from(e: gameloggr_db::OperationError) -> Self {
        match e {
            gameloggr_db::OperationError::NotFound { .. } => Self::NotFound(e.to_string()),
            gameloggr_db::OperationError::Rule(rule) => Self::Input(rule.to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}
