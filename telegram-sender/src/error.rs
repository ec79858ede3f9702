//! Error types for the sender.
//!
//! [`SendError`] is what every send operation reports; [`TransportError`] is produced by a
//! [`crate::Transport`] and wrapped into [`SendError::TransportFailure`].

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a send operation (text, media, document).
#[derive(Error, Debug)]
pub enum SendError {
    /// Neither a per-call destination nor a default destination was available.
    /// No request is issued in this case.
    #[error("Chat destination is not specified")]
    MissingDestination,

    /// The HTTP call could not complete. `payload` names what was being sent.
    #[error("Transport failure while sending {payload}: {source}")]
    TransportFailure {
        payload: String,
        #[source]
        source: TransportError,
    },
}

impl SendError {
    pub(crate) fn transport(payload: impl Into<String>, source: TransportError) -> Self {
        SendError::TransportFailure {
            payload: payload.into(),
            source,
        }
    }
}

/// Errors raised by the HTTP transport (network, HTTP status, local file).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Network-level failure (connect, TLS, timeout, body read). The request URL is stripped.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// A local file selected for upload could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// Raw response body captured before the failure, if the server answered at all.
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

// Request URLs embed the bot token, so they never travel inside an error.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(err.without_url())
    }
}

/// Result type for send operations; uses [`SendError`].
pub type Result<T> = std::result::Result<T, SendError>;
