//! Error types for the article API client.
//!
//! # Design
//! Each failure class of a round trip gets its own variant so callers can
//! tell "the request never reached the server" apart from "the server said
//! no" and "the server answered with something we could not read". A 404 is
//! an ordinary `Status` error; `is_not_found` exists for the common check.

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by every article operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be delivered or the response could not be read.
    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("decoding response failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be encoded to JSON.
    #[error("encoding request failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// Wrap any transport-level failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<TransportError>,
    {
        ApiError::Transport(err.into())
    }

    /// HTTP status carried by a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
