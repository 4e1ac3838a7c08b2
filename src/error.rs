use thiserror::Error;

/// Every failure the library can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying HTTP transport failed before a status was received.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// A required value was missing before any request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The service answered with a non-2xx status.
    #[error("API request failed with status code: {status}")]
    Api {
        /// Numeric HTTP status.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response JSON did not have the expected shape.
    #[error("malformed response: {0}")]
    Mapping(String),

    /// A request body could not be encoded as JSON.
    #[error("{0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn mapping(msg: impl Into<String>) -> Self {
        Error::Mapping(msg.into())
    }

    /// Returns the HTTP status code for [`Error::Api`] failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
