use crate::error::Error;

/// Result type returned by every fallible call in this crate.
pub type Result<T> = std::result::Result<T, Error>;
