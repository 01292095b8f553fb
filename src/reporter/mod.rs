//! Build outcome reporting state machine.
//!
//! The reporter translates job lifecycle events into commit statuses,
//! outcome comments, and the auto-close decision. Its flow per run:
//!
//! - **build**: post a PENDING status to the pull request's head commit and
//!   submit a job carrying the cause record.
//! - **on_started**: post a PENDING "started" status and set a
//!   human-readable description on the run.
//! - **on_completed**: map the terminal result to a commit state, post the
//!   completion status, optionally post an outcome comment (with a log
//!   excerpt on non-success outcomes), and optionally close a failed pull
//!   request.
//!
//! A run without a cause record is not ours: `on_started`/`on_completed`
//! return without touching the gateway. Every remote side effect is
//! individually best-effort: a failed step is logged and abandoned, and the
//! remaining steps still run. The reporter holds no mutable state, so the
//! engine may invoke it concurrently for different runs.

mod comment;
mod outcome;

pub use comment::compose_outcome_comment;
pub use outcome::map_outcome;

use tracing::{error, warn};

use crate::engine::BuildRun;
use crate::gateway::RepoGateway;
use crate::trigger::TriggerFacade;
use crate::types::{BuildCause, CommitState, PullRequestSummary, StatusReport};

/// Translates build lifecycle events into pull-request updates.
pub struct OutcomeReporter<G, T> {
    gateway: G,
    trigger: T,
}

impl<G: RepoGateway, T: TriggerFacade> OutcomeReporter<G, T> {
    /// Creates a reporter over the given gateway and trigger façade.
    pub fn new(gateway: G, trigger: T) -> Self {
        OutcomeReporter { gateway, trigger }
    }

    /// Returns the gateway this reporter publishes through.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns the trigger façade this reporter submits jobs through.
    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    /// Triggers a build for the given pull request.
    ///
    /// Posts the initial PENDING status, then submits a job carrying the
    /// cause record. A job the engine refuses to queue is logged as severe;
    /// re-triggering is the caller's responsibility.
    pub async fn build(&self, pr: &PullRequestSummary) {
        let message = if pr.mergeable {
            "Merged build triggered"
        } else {
            " Build triggered"
        };

        let report = StatusReport::new(pr.head_sha.clone(), CommitState::Pending, message);
        if let Err(err) = self.gateway.create_commit_status(pr.number, report).await {
            error!(pr = %pr.number, error = %err, "cannot post triggered status");
        }

        let cause = BuildCause::new(
            pr.head_sha.clone(),
            pr.number,
            pr.mergeable,
            pr.target_branch.clone(),
            pr.author_email.clone(),
            pr.title.clone(),
        );
        if self.trigger.start_job(cause).is_none() {
            error!(pr = %pr.number, "job did not start");
        }
    }

    /// Reports a run that has started executing.
    pub async fn on_started(&self, run: &impl BuildRun) {
        let Some(cause) = run.cause() else {
            return;
        };

        let message = format!("{} {} started", cause.build_noun(), run.number());
        let report = StatusReport::new(cause.head_sha.clone(), CommitState::Pending, message)
            .with_backlink(self.results_link(&run.url_path()));
        if let Err(err) = self.gateway.create_commit_status(cause.pr_number, report).await {
            error!(
                pr = %cause.pr_number,
                run = %run.number(),
                error = %err,
                "cannot post started status"
            );
        }

        let description = format!(
            "<a title=\"{}\" href=\"{}\">PR {}</a>: {}",
            cause.title,
            self.gateway.pull_request_url(cause.pr_number),
            cause.pr_number,
            cause.abbreviated_title()
        );
        if let Err(err) = run.set_description(&description) {
            error!(run = %run.number(), error = %err, "cannot update run description");
        }
    }

    /// Reports a run that has reached a terminal result.
    pub async fn on_completed(&self, run: &impl BuildRun) {
        let Some(cause) = run.cause() else {
            return;
        };
        let settings = self.trigger.settings();

        let (state, verb) = map_outcome(run.outcome(), settings.unstable_as);
        let message = format!(
            "{} {} {} in {}",
            cause.build_noun(),
            run.number(),
            verb,
            run.duration_text()
        );
        let report = StatusReport::new(cause.head_sha.clone(), state, message)
            .with_backlink(self.results_link(&run.url_path()));
        if let Err(err) = self.gateway.create_commit_status(cause.pr_number, report).await {
            error!(
                pr = %cause.pr_number,
                run = %run.number(),
                error = %err,
                "cannot post completion status"
            );
        }

        if let Some(published_url) = settings.published_url() {
            let template = if state == CommitState::Success {
                &settings.msg_success
            } else {
                &settings.msg_failure
            };

            let excerpt = if state != CommitState::Success && settings.log_excerpt_lines > 0 {
                match run.tail_log(settings.log_excerpt_lines as usize) {
                    Ok(lines) => Some(lines),
                    Err(err) => {
                        warn!(run = %run.number(), error = %err, "cannot fetch log excerpt");
                        None
                    }
                }
            } else {
                None
            };

            let body = compose_outcome_comment(
                template,
                published_url,
                &run.url_path(),
                excerpt.as_deref(),
            );
            if let Err(err) = self.gateway.add_comment(cause.pr_number, body).await {
                warn!(pr = %cause.pr_number, error = %err, "cannot post outcome comment");
            }
        }

        if state == CommitState::Failure && self.trigger.auto_close_failed_pull_requests() {
            match self.gateway.get_pull_request(cause.pr_number).await {
                Ok(live) if live.is_open() => {
                    if let Err(err) = self.gateway.close_pull_request(cause.pr_number).await {
                        error!(pr = %cause.pr_number, error = %err, "cannot close pull request");
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    error!(pr = %cause.pr_number, error = %err, "cannot close pull request");
                }
            }
        }
    }

    /// Composes the link to the published results of a run, when results
    /// publishing is configured.
    fn results_link(&self, run_path: &str) -> Option<String> {
        self.trigger
            .settings()
            .published_url()
            .map(|url| format!("{}{}", url, run_path))
    }
}
