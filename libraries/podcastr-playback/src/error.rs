//! Error types for playback management
//!
//! Queue commands never surface these to the presentation layer; the
//! unchecked command variants log and ignore them instead.

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index {index} out of bounds for queue of {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// No episode is currently selected
    #[error("No episode selected")]
    NoEpisodeSelected,

    /// The event loop has shut down
    #[error("Session event loop is closed")]
    SessionClosed,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
