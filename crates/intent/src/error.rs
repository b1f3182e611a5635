use thiserror::Error;

/// Result type alias for intent classification
pub type Result<T> = std::result::Result<T, IntentError>;

#[derive(Error, Debug)]
pub enum IntentError {
    #[error("invalid router pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("empty response from Gemini")]
    EmptyResponse,

    #[error("could not parse model reply: {0}")]
    Parse(#[from] serde_json::Error),
}
