//! Abstract protocol to the pull-request host.
//!
//! `RepoGateway` describes the narrow remote surface this core needs:
//! posting commit statuses, commenting, fetching and closing pull requests,
//! and a single organization-membership check. The octocrab-backed
//! implementation lives in [`crate::github`]; tests use mock implementations
//! that record the calls they receive.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::types::{PrNumber, Sha, StatusReport};

/// Live state of a pull request on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrState {
    Open,
    Closed,
}

/// Pull request data returned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrSnapshot {
    /// The pull request number.
    pub number: PrNumber,

    /// Whether the pull request is still open.
    pub state: PrState,

    /// The current head commit.
    pub head_sha: Sha,

    /// The pull request title.
    pub title: String,
}

impl PrSnapshot {
    /// Returns true if the pull request is open.
    pub fn is_open(&self) -> bool {
        self.state == PrState::Open
    }
}

/// Result of an organization membership check.
///
/// The source system collapsed "not a member" and "the check itself failed"
/// into a single `false`, leaving callers unable to tell the two apart. The
/// failure case is therefore its own variant here: callers decide whether a
/// failed check denies access or is ignored, instead of inheriting a policy
/// they cannot see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgMembership {
    /// The user is a confirmed member of the organization.
    Member,

    /// The host confirmed the user is not a member.
    NotMember,

    /// The check could not be completed (network or auth failure). The
    /// underlying error is logged by the gateway implementation.
    CheckFailed,
}

impl OrgMembership {
    /// Conservative collapse of the check: true only for a confirmed member.
    ///
    /// Callers that need to treat `CheckFailed` differently from `NotMember`
    /// should match on the variants instead.
    pub fn is_member(&self) -> bool {
        matches!(self, OrgMembership::Member)
    }
}

/// Remote operations against the pull-request host, scoped to one repository.
///
/// Implementations are constructed with a repository identity, so operations
/// don't carry it. Every method is a single remote call with no internal
/// retries: callers own the decision of what a failure means for their step.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct RecordingGateway {
///     calls: Mutex<Vec<GatewayCall>>,
/// }
///
/// impl RepoGateway for RecordingGateway {
///     type Error = Infallible;
///
///     async fn create_commit_status(
///         &self,
///         pr: PrNumber,
///         report: StatusReport,
///     ) -> Result<(), Self::Error> {
///         self.calls.lock().unwrap().push(GatewayCall::Status { pr, report });
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait RepoGateway {
    /// The error type returned by remote operations. It is only ever logged
    /// by this core, never matched on.
    type Error: std::fmt::Display;

    /// Posts a commit status. Side effect only.
    fn create_commit_status(
        &self,
        pr: PrNumber,
        report: StatusReport,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Posts a comment on the pull request conversation. Side effect only.
    fn add_comment(
        &self,
        pr: PrNumber,
        body: String,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Fetches the live state of a pull request.
    fn get_pull_request(
        &self,
        pr: PrNumber,
    ) -> impl Future<Output = Result<PrSnapshot, Self::Error>> + Send;

    /// Transitions a pull request to closed.
    fn close_pull_request(
        &self,
        pr: PrNumber,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Checks whether a user is a member of an organization.
    ///
    /// A failed check is reported as [`OrgMembership::CheckFailed`] rather
    /// than an error; the implementation logs the underlying cause.
    fn organization_membership(
        &self,
        org: &str,
        user: &str,
    ) -> impl Future<Output = OrgMembership> + Send;

    /// Returns the web URL of a pull request, for backlinks in run
    /// descriptions.
    fn pull_request_url(&self, pr: PrNumber) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_confirmed_members_pass_the_collapse() {
        assert!(OrgMembership::Member.is_member());
        assert!(!OrgMembership::NotMember.is_member());
        assert!(!OrgMembership::CheckFailed.is_member());
    }

    #[test]
    fn snapshot_openness_follows_state() {
        let snapshot = PrSnapshot {
            number: PrNumber(1),
            state: PrState::Open,
            head_sha: Sha::new("abc"),
            title: "Add widgets".to_string(),
        };
        assert!(snapshot.is_open());

        let closed = PrSnapshot {
            state: PrState::Closed,
            ..snapshot
        };
        assert!(!closed.is_open());
    }
}
