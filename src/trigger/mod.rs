//! Boundary between the outcome reporter and the execution engine's
//! trigger/configuration side.
//!
//! The source system reached its configuration through a process-wide
//! descriptor lookup. Here the configuration is an explicit
//! [`TriggerSettings`] value handed to the components that need it, so the
//! core stays testable without a live global registry.

use serde::{Deserialize, Serialize};

use crate::engine::JobTicket;
use crate::types::{BuildCause, CommitState};

/// Default commit-status API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Live configuration consumed by the reporter and the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSettings {
    /// The commit state reported for an unstable build result.
    pub unstable_as: CommitState,

    /// Base URL under which build results are published. When unset or
    /// empty, no outcome comments are posted.
    pub published_url: Option<String>,

    /// Comment template for successful outcomes.
    pub msg_success: String,

    /// Comment template for non-successful outcomes.
    pub msg_failure: String,

    /// How many trailing log lines to include in failure comments. Zero
    /// disables the excerpt.
    pub log_excerpt_lines: u32,

    /// Whether to close a pull request whose build failed.
    pub auto_close_failed_pull_requests: bool,

    /// API base URL of the pull-request host.
    pub server_api_url: String,

    /// Access token for the pull-request host.
    pub access_token: String,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        TriggerSettings {
            unstable_as: CommitState::Failure,
            published_url: None,
            msg_success: "Test PASSed.".to_string(),
            msg_failure: "Test FAILed.".to_string(),
            log_excerpt_lines: 0,
            auto_close_failed_pull_requests: false,
            server_api_url: DEFAULT_API_URL.to_string(),
            access_token: String::new(),
        }
    }
}

impl TriggerSettings {
    /// Returns the published-results base URL, treating an empty string the
    /// same as unset.
    pub fn published_url(&self) -> Option<&str> {
        self.published_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Job submission and configuration surface of the execution engine.
///
/// The engine implements this; the reporter only ever submits jobs and reads
/// configuration through it.
pub trait TriggerFacade {
    /// Submits a job carrying the given cause to the engine's queue.
    ///
    /// Returns `None` when the engine did not queue the job. The reporter
    /// logs that condition; re-triggering is the caller's responsibility.
    fn start_job(&self, cause: BuildCause) -> Option<JobTicket>;

    /// Whether failed builds close their pull request automatically.
    fn auto_close_failed_pull_requests(&self) -> bool;

    /// The live configuration.
    fn settings(&self) -> &TriggerSettings;
}
