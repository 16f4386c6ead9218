//! Error types for the data pipeline.

use thiserror::Error;

/// Failures raised while loading or bucketing the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The network or file read itself failed.
    #[error("failed to fetch dataset from {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    /// The payload was retrieved but is not a JSON array of records.
    #[error("malformed dataset payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record's timestamp could not be parsed as a calendar date.
    ///
    /// The aggregator drops the offending record and keeps going; this is a
    /// per-record failure, not a batch failure.
    #[error("unparseable timestamp: {0:?}")]
    InvalidTimestamp(String),
}

impl DataError {
    pub fn fetch(source_name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        DataError::Fetch {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}
