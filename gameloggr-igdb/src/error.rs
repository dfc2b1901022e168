/// Errors that can occur while talking to IGDB.
#[derive(Debug, thiserror::Error)]
pub enum IgdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by IGDB")]
    RateLimit,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IgdbError {
    /// Whether retrying later with the same credentials could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimit => true,
            Self::ServerError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
