//! Error types for ledger operations

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// The backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// An insert asked for the written row back but got nothing
    #[error("backend returned no rows for {0}")]
    EmptyResponse(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input rejected before reaching the backend
    #[error("{0}")]
    Invalid(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl LedgerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        LedgerError::Invalid(msg.into())
    }

    /// True for errors caused by user input rather than infrastructure
    pub fn is_user_error(&self) -> bool {
        matches!(self, LedgerError::Invalid(_) | LedgerError::NotFound(_))
    }
}
