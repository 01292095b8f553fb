//! Commit status vocabulary of the pull-request host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ids::Sha;

/// A commit status value shown on the pull-request host.
///
/// The host's vocabulary is fixed: a build in flight is `Pending`, and a
/// completed build lands on one of the three terminal values. `Error` is
/// rarely produced by the mapping itself but is a valid target for the
/// configured unstable mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitState {
    Pending,
    Success,
    Error,
    Failure,
}

impl CommitState {
    /// Returns the lowercase string the host's REST API expects.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            CommitState::Pending => "pending",
            CommitState::Success => "success",
            CommitState::Error => "error",
            CommitState::Failure => "failure",
        }
    }

    /// Returns the uppercase wire name used in configuration.
    pub fn wire_name(&self) -> &'static str {
        match self {
            CommitState::Pending => "PENDING",
            CommitState::Success => "SUCCESS",
            CommitState::Error => "ERROR",
            CommitState::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for CommitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Error returned when parsing an unknown commit state name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown commit state name: {0}")]
pub struct UnknownCommitState(pub String);

impl FromStr for CommitState {
    type Err = UnknownCommitState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(CommitState::Pending),
            "SUCCESS" => Ok(CommitState::Success),
            "ERROR" => Ok(CommitState::Error),
            "FAILURE" => Ok(CommitState::Failure),
            other => Err(UnknownCommitState(other.to_string())),
        }
    }
}

/// A single status update destined for a commit on the pull-request host.
///
/// Transient: constructed per lifecycle event, sent once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// The commit the status targets.
    pub sha: Sha,

    /// The status value to show.
    pub state: CommitState,

    /// Human-readable message shown next to the status.
    pub message: String,

    /// Optional backlink to the build results.
    pub backlink: Option<String>,
}

impl StatusReport {
    /// Creates a status report without a backlink.
    pub fn new(sha: Sha, state: CommitState, message: impl Into<String>) -> Self {
        StatusReport {
            sha,
            state,
            message: message.into(),
            backlink: None,
        }
    }

    /// Sets the backlink URL.
    pub fn with_backlink(mut self, backlink: Option<String>) -> Self {
        self.backlink = backlink;
        self
    }
}
