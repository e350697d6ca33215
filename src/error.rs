//! Error types for the play-calling crate

use thiserror::Error;

/// Main error type for the play-calling crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action {value:?} (expected an index 0-5 or a play name)")]
    InvalidAction { value: String },

    #[error("invalid outcome kind '{kind}'")]
    InvalidOutcome { kind: String },

    #[error("invalid state: {message}")]
    InvalidState { message: String },

    #[error("{field} = {value} is out of bounds (must be {min}-{max})")]
    OutOfBounds {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("episode is already over; call reset before stepping again")]
    EpisodeOver,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error reports a state contract violation.
    ///
    /// Covers out-of-bounds fields as well as stepping a finished episode.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Error::InvalidState { .. } | Error::OutOfBounds { .. } | Error::EpisodeOver
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
