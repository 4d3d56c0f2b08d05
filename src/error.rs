//! Error type for the fallible edges of the crate (rule loading and output)

use thiserror::Error;

/// Errors raised while loading tax rules or writing results
///
/// The calculation functions themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {name} schedule: {reason}")]
    InvalidSchedule { name: String, reason: String },

    #[error("invalid result table: {0}")]
    InvalidTable(String),
}

impl Error {
    pub(crate) fn invalid_schedule(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidSchedule {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
