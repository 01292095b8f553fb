//! The cause record linking a build run to the pull request that triggered it.

use serde::{Deserialize, Serialize};

use super::ids::{PrNumber, Sha};

/// Maximum length of the abbreviated title used as link text in run
/// descriptions and user-facing messages.
const ABBREVIATED_TITLE_LEN: usize = 30;

/// Immutable descriptor correlating a triggered build run with the pull
/// request that caused it.
///
/// A cause is created once when the build is triggered, attached to the run
/// for its entire lifetime, and read back by the outcome reporter when the
/// engine's lifecycle callbacks fire. It is the sole channel through which
/// the reporter recovers pull-request context: a run without one is not ours
/// and is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCause {
    /// The commit at the head of the pull request when the build was triggered.
    pub head_sha: Sha,

    /// The originating pull request.
    pub pr_number: PrNumber,

    /// Whether the build ran against a synthetic merge of the pull request
    /// into its target branch, rather than against the head commit directly.
    pub merged: bool,

    /// The branch the pull request targets.
    pub target_branch: String,

    /// The pull request author's email, when the host exposes one.
    pub author_email: Option<String>,

    /// The pull request title.
    pub title: String,
}

impl BuildCause {
    /// Creates a new cause record.
    pub fn new(
        head_sha: Sha,
        pr_number: PrNumber,
        merged: bool,
        target_branch: impl Into<String>,
        author_email: Option<String>,
        title: impl Into<String>,
    ) -> Self {
        BuildCause {
            head_sha,
            pr_number,
            merged,
            target_branch: target_branch.into(),
            author_email,
            title: title.into(),
        }
    }

    /// The noun used in status messages for this build.
    pub fn build_noun(&self) -> &'static str {
        if self.merged { "Merged build" } else { "Build" }
    }

    /// The title truncated for use as link text.
    ///
    /// Titles longer than 30 characters are cut at a char boundary and
    /// suffixed with `...`.
    pub fn abbreviated_title(&self) -> String {
        if self.title.len() <= ABBREVIATED_TITLE_LEN {
            return self.title.clone();
        }

        let mut end = ABBREVIATED_TITLE_LEN;
        while end > 0 && !self.title.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &self.title[..end])
    }
}
