use std::io;
use thiserror::Error;

/// Error type for fetching and simulating a region.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The reference store answered with a non-success status.
    #[error("Reference store returned status {status} for {location}")]
    UpstreamStatus { status: u16, location: String },

    /// The reference store could not be reached.
    #[error("Can't reach reference store {location}: {message}")]
    UpstreamConnection { location: String, message: String },

    /// Reading the fetched body failed part way through.
    #[error("Failed reading reference data: {0}")]
    UpstreamRead(#[source] io::Error),

    /// The simulator could not be started or exited unsuccessfully.
    #[error("Simulator failed on {region}: {message}")]
    Simulator { region: String, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StreamError {
    /// True for failures that happened before any data was read from the reference store.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            StreamError::UpstreamStatus { .. } | StreamError::UpstreamConnection { .. }
        )
    }
}

/// Result type alias for readsim-stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;
