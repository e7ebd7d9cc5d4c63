//! Error type for the ALTR client.

use thiserror::Error;

/// Errors surfaced by [`crate::altr::client::AltrClient`] operations.
///
/// There is no retry or recovery anywhere in the client; every variant
/// propagates synchronously to the caller after a single attempt.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing client configuration. Raised before any network call.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Request construction or network-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response carried a body that could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A non-2xx response from the API. `code` and `message` come from the
    /// error envelope when one was recognized; otherwise `code` is 0 and
    /// `message` is the raw response body.
    #[error("API error (status {status}): code {code}: {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    /// The remote API does not support this operation. Returned without
    /// issuing a request.
    #[error("{0} is not supported by the ALTR API")]
    Unsupported(&'static str),
}

impl Error {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
