/// Core error types for Podcastr
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Podcastr
#[derive(Error, Debug)]
pub enum CoreError {
    /// Publish date could not be parsed
    #[error("Invalid publish date for episode {id}: {value}")]
    InvalidDate { id: String, value: String },

    /// Record is missing a required field
    #[error("Invalid episode: {0}")]
    InvalidEpisode(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid date error
    pub fn invalid_date(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Create an invalid episode error
    pub fn invalid_episode(msg: impl Into<String>) -> Self {
        Self::InvalidEpisode(msg.into())
    }
}
