//! Pull-request activity as handed in by the trigger layer.

use serde::{Deserialize, Serialize};

use super::ids::{PrNumber, Sha};

/// A snapshot of the pull request the external trigger decided to build.
///
/// The trigger layer (webhook ingestion or polling, outside this core)
/// detects a buildable pull request and passes this summary to
/// [`crate::reporter::OutcomeReporter::build`]. Everything the cause record
/// needs is carried here so the reporter never has to call back out to the
/// host during triggering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// The pull request number.
    pub number: PrNumber,

    /// The head commit to build and report statuses against.
    pub head_sha: Sha,

    /// Whether the host reports the pull request merge-eligible. A mergeable
    /// pull request is built as a synthetic merge into its target branch.
    pub mergeable: bool,

    /// The branch the pull request targets.
    pub target_branch: String,

    /// The author's email, when the host exposes one.
    pub author_email: Option<String>,

    /// The pull request title.
    pub title: String,
}
