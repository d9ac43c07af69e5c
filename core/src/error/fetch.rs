use thiserror::Error;

use crate::types::FetchScope;

/// Failure of a single archive/listing request.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network or HTTP failure; retry is up to the caller.
    #[error("transient fetch error: {0}")]
    Transient(#[source] anyhow::Error),

    /// The response was missing expected fields or failed to decode.
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("pagination cursor repeated: {0}")]
    RepeatedCursor(String),
}

impl FetchError {
    pub fn transient(err: impl Into<anyhow::Error>) -> Self {
        Self::Transient(err.into())
    }

    /// Stable label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transient(_) => "transient",
            Self::Malformed(_) => "malformed",
            Self::RepeatedCursor(_) => "repeated_cursor",
        }
    }
}

/// Errors that abort a completed-task aggregation.
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("fetching completed tasks for {scope} failed: {source}")]
    Fetch {
        scope: FetchScope,
        #[source]
        source: FetchError,
    },

    #[error("aggregation did not settle within {0} follow-up rounds")]
    RoundLimitExceeded(usize),
}
