//! Error taxonomy for the GitHub gateway.
//!
//! Two failure classes matter to callers:
//!
//! - **Auth**: the authenticated session could not be established. This is
//!   raised by the first call that forces the lazy connect and is never
//!   swallowed.
//! - **Api**: a call against the live API failed. The reporting pipeline
//!   treats these as best-effort: the failed step is logged and abandoned,
//!   and the flow continues.

use std::fmt;

use thiserror::Error;

/// Errors surfaced by the GitHub gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The authenticated session could not be established.
    #[error("cannot connect to {url}: {source}")]
    Auth {
        /// The API base URL the handshake targeted.
        url: String,
        #[source]
        source: octocrab::Error,
    },

    /// A call against the live API failed.
    #[error(transparent)]
    Api(#[from] ApiFailure),
}

/// A failed call against the live GitHub API.
#[derive(Debug, Error)]
pub struct ApiFailure {
    /// The HTTP status code, if the failure carried one.
    pub status_code: Option<u16>,

    /// A human-readable description of the failure.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl ApiFailure {
    /// Wraps an octocrab error, extracting the HTTP status when present.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let status_code = extract_status_code(&err);
        ApiFailure {
            status_code,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Creates a failure without an underlying octocrab error.
    pub fn without_source(status_code: Option<u16>, message: impl Into<String>) -> Self {
        ApiFailure {
            status_code,
            message: message.into(),
            source: None,
        }
    }
}

/// Extracts the HTTP status code from an octocrab error, if present.
///
/// Only API-level errors carry one; transport and serialization failures
/// return `None`.
fn extract_status_code(err: &octocrab::Error) -> Option<u16> {
    match err {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}
