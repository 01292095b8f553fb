//! Core domain types for the build bridge.
//!
//! This module contains the fundamental types used throughout the
//! application, designed to encode invariants via the type system.

pub mod cause;
pub mod ids;
pub mod pr;
pub mod status;

// Re-export commonly used types at the module level
pub use cause::BuildCause;
pub use ids::{PrNumber, RepoId, RunNumber, Sha};
pub use pr::PullRequestSummary;
pub use status::{CommitState, StatusReport, UnknownCommitState};
