//! GitHub-backed gateway implementation.
//!
//! This module implements the [`crate::gateway::RepoGateway`] trait against
//! the GitHub API via octocrab. The authenticated session is established
//! lazily, at most once, on first use; remote failures are surfaced to the
//! caller without any internal retrying.

mod client;
mod error;

pub use client::GithubGateway;
pub use error::{ApiFailure, GatewayError};
