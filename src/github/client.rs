//! Octocrab client wrapper scoped to a specific repository.
//!
//! `GithubGateway` holds the credentials and repository identity and builds
//! the authenticated `Octocrab` session lazily, at most once, on first use.
//! Even when multiple reporter calls race on first use, only one handshake
//! runs; afterwards the session is shared read-only for the gateway's
//! lifetime. There is no re-authentication and no retrying here: a failed
//! call surfaces to the caller, which decides what the failure means for its
//! reporting step.

use octocrab::Octocrab;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, error};

use crate::gateway::{OrgMembership, PrSnapshot, PrState, RepoGateway};
use crate::trigger::TriggerSettings;
use crate::types::{PrNumber, RepoId, Sha, StatusReport};

use super::error::{ApiFailure, GatewayError};

/// A gateway to the GitHub API scoped to a specific repository.
pub struct GithubGateway {
    /// The repository all operations target.
    repo: RepoId,

    /// API base URL the session connects to.
    api_url: String,

    /// Access token used for the handshake.
    access_token: String,

    /// Web URL of the repository, for pull-request backlinks.
    web_url: String,

    /// Lazily-established authenticated session.
    session: OnceCell<Octocrab>,
}

impl GithubGateway {
    /// Creates a gateway using the shared settings' credentials.
    pub fn new(repo: RepoId, settings: &TriggerSettings) -> Self {
        Self::with_credentials(repo, "", "", settings)
    }

    /// Creates a gateway with explicit credentials, falling back to the
    /// shared settings for any that are unset or empty.
    pub fn with_credentials(
        repo: RepoId,
        api_url: impl Into<String>,
        access_token: impl Into<String>,
        settings: &TriggerSettings,
    ) -> Self {
        let api_url = non_empty_or(api_url.into(), &settings.server_api_url);
        let access_token = non_empty_or(access_token.into(), &settings.access_token);
        let web_url = format!("https://github.com/{}", repo);

        GithubGateway {
            repo,
            api_url,
            access_token,
            web_url,
            session: OnceCell::new(),
        }
    }

    /// Overrides the repository web URL (for non-github.com hosts).
    pub fn with_web_url(mut self, web_url: impl Into<String>) -> Self {
        self.web_url = web_url.into();
        self
    }

    /// Returns the repository this gateway is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Returns the API base URL the session connects to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Builds the authenticated session.
    ///
    /// Failures are logged and re-raised; they are never swallowed into a
    /// silently unauthenticated session.
    fn connect(&self) -> Result<Octocrab, GatewayError> {
        let built = Octocrab::builder()
            .base_uri(self.api_url.as_str())
            .map(|builder| {
                if self.access_token.is_empty() {
                    builder
                } else {
                    builder.personal_token(self.access_token.clone())
                }
            })
            .and_then(|builder| builder.build());

        match built {
            Ok(client) => {
                debug!(url = %self.api_url, repo = %self.repo, "connected to GitHub");
                Ok(client)
            }
            Err(source) => {
                error!(url = %self.api_url, "cannot connect using the configured token");
                Err(GatewayError::Auth {
                    url: self.api_url.clone(),
                    source,
                })
            }
        }
    }

    /// Returns the live session, connecting at most once.
    ///
    /// Concurrent first uses are single-flighted; a connect failure is
    /// surfaced to this caller and the next call will attempt the handshake
    /// again.
    async fn session(&self) -> Result<&Octocrab, GatewayError> {
        self.session
            .get_or_try_init(|| async { self.connect() })
            .await
    }

    fn owner(&self) -> &str {
        &self.repo.owner
    }

    fn repo_name(&self) -> &str {
        &self.repo.repo
    }
}

/// Returns `value` unless it is empty, else a copy of `fallback`.
fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

impl RepoGateway for GithubGateway {
    type Error = GatewayError;

    async fn create_commit_status(
        &self,
        pr: PrNumber,
        report: StatusReport,
    ) -> Result<(), GatewayError> {
        let session = self.session().await?;
        let route = format!(
            "/repos/{}/{}/statuses/{}",
            self.owner(),
            self.repo_name(),
            report.sha
        );

        #[derive(Serialize)]
        struct StatusRequest<'a> {
            state: &'a str,
            description: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            target_url: Option<&'a str>,
        }

        let request = StatusRequest {
            state: report.state.as_api_str(),
            description: &report.message,
            target_url: report.backlink.as_deref(),
        };

        let result: Result<serde_json::Value, octocrab::Error> =
            session.post(&route, Some(&request)).await;

        match result {
            Ok(_) => {
                debug!(
                    pr = %pr,
                    sha = %report.sha.short(),
                    state = %report.state,
                    "commit status posted"
                );
                Ok(())
            }
            Err(e) => Err(ApiFailure::from_octocrab(e).into()),
        }
    }

    async fn add_comment(&self, pr: PrNumber, body: String) -> Result<(), GatewayError> {
        let session = self.session().await?;
        session
            .issues(self.owner(), self.repo_name())
            .create_comment(pr.0, body)
            .await
            .map_err(ApiFailure::from_octocrab)?;

        debug!(pr = %pr, "comment posted");
        Ok(())
    }

    async fn get_pull_request(&self, pr: PrNumber) -> Result<PrSnapshot, GatewayError> {
        let session = self.session().await?;
        let pull = session
            .pulls(self.owner(), self.repo_name())
            .get(pr.0)
            .await
            .map_err(ApiFailure::from_octocrab)?;

        let state = if pull.state == Some(octocrab::models::IssueState::Closed) {
            PrState::Closed
        } else {
            PrState::Open
        };

        Ok(PrSnapshot {
            number: pr,
            state,
            head_sha: Sha::new(pull.head.sha),
            title: pull.title.unwrap_or_default(),
        })
    }

    async fn close_pull_request(&self, pr: PrNumber) -> Result<(), GatewayError> {
        let session = self.session().await?;
        let route = format!("/repos/{}/{}/pulls/{}", self.owner(), self.repo_name(), pr.0);

        #[derive(Serialize)]
        struct CloseRequest<'a> {
            state: &'a str,
        }

        let result: Result<serde_json::Value, octocrab::Error> =
            session.patch(&route, Some(&CloseRequest { state: "closed" })).await;

        match result {
            Ok(_) => {
                debug!(pr = %pr, "pull request closed");
                Ok(())
            }
            Err(e) => Err(ApiFailure::from_octocrab(e).into()),
        }
    }

    async fn organization_membership(&self, org: &str, user: &str) -> OrgMembership {
        let session = match self.session().await {
            Ok(session) => session,
            Err(err) => {
                error!(org, user, error = %err, "membership check failed");
                return OrgMembership::CheckFailed;
            }
        };

        // 404 means no membership. A pending invitation does not count as
        // membership either; only an active state does.
        let route = format!("/orgs/{}/memberships/{}", org, user);
        let result: Result<serde_json::Value, octocrab::Error> =
            session.get(&route, None::<&()>).await;

        match result {
            Ok(membership) => {
                let member =
                    membership.get("state").and_then(|state| state.as_str()) == Some("active");
                debug!(org, user, member, "membership check");
                if member {
                    OrgMembership::Member
                } else {
                    OrgMembership::NotMember
                }
            }
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code.as_u16() == 404 =>
            {
                debug!(org, user, member = false, "membership check");
                OrgMembership::NotMember
            }
            Err(err) => {
                error!(org, user, error = %ApiFailure::from_octocrab(err), "membership check failed");
                OrgMembership::CheckFailed
            }
        }
    }

    fn pull_request_url(&self, pr: PrNumber) -> String {
        format!("{}/pull/{}", self.web_url, pr.0)
    }
}

impl std::fmt::Debug for GithubGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubGateway")
            .field("repo", &self.repo)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TriggerSettings {
        TriggerSettings {
            server_api_url: "https://github.example.com/api/v3".to_string(),
            access_token: "shared-token".to_string(),
            ..TriggerSettings::default()
        }
    }

    #[test]
    fn empty_credentials_fall_back_to_settings() {
        let gateway = GithubGateway::new(RepoId::new("octocat", "hello-world"), &settings());
        assert_eq!(gateway.api_url(), "https://github.example.com/api/v3");
        assert_eq!(gateway.access_token, "shared-token");
    }

    #[test]
    fn explicit_credentials_win_over_settings() {
        let gateway = GithubGateway::with_credentials(
            RepoId::new("octocat", "hello-world"),
            "https://api.github.com",
            "override-token",
            &settings(),
        );
        assert_eq!(gateway.api_url(), "https://api.github.com");
        assert_eq!(gateway.access_token, "override-token");
    }

    #[test]
    fn pull_request_url_defaults_to_github_com() {
        let gateway = GithubGateway::new(RepoId::new("octocat", "hello-world"), &settings());
        assert_eq!(
            gateway.pull_request_url(PrNumber(12)),
            "https://github.com/octocat/hello-world/pull/12"
        );
    }

    #[test]
    fn web_url_can_be_overridden_for_enterprise_hosts() {
        let gateway = GithubGateway::new(RepoId::new("octocat", "hello-world"), &settings())
            .with_web_url("https://github.example.com/octocat/hello-world");
        assert_eq!(
            gateway.pull_request_url(PrNumber(3)),
            "https://github.example.com/octocat/hello-world/pull/3"
        );
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let gateway = GithubGateway::new(RepoId::new("octocat", "hello-world"), &settings());
        let debugged = format!("{:?}", gateway);
        assert!(!debugged.contains("shared-token"));
    }
}
