//! Errors surfaced by the API client and the flows.

use std::path::PathBuf;

use talkspace_core::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A bearer call was attempted without an authenticated session.
    #[error("not signed in")]
    NotAuthenticated,

    /// The server rejected the credential (401).
    #[error("session rejected by server: {message}")]
    Unauthorized { message: String },

    /// Any other non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Whether the stored credential should be dropped.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
