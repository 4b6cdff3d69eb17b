/// Error types for the indicator API client
use thiserror::Error;

/// Failures surfaced by the Remote Data Fetcher and its callers.
///
/// Only `String` payloads so the error can be cloned into every cache
/// waiter that shares one in-flight request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure: timeout, DNS, connection reset, or a non-2xx
    /// status whose body is not parseable JSON.
    #[error("Network error: {0}")]
    Network(String),

    /// The body parsed, but is not the `[meta, observations]` envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Well-formed response that carries zero observations.
    #[error("No data available for the selected query")]
    EmptyResult,
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        FetchError::MalformedResponse(message.into())
    }
}

/// Type alias for Results using FetchError
pub type Result<T> = std::result::Result<T, FetchError>;
