//! Seam to the job execution engine.
//!
//! The engine itself (queuing, scheduling, sandboxing) is an external
//! collaborator. This module defines the narrow view of a build run the
//! reporter consumes, plus the engine's terminal-result vocabulary.

use thiserror::Error;

use crate::types::{BuildCause, RunNumber};

/// An error reported by the execution engine for a run-local operation.
#[derive(Debug, Clone, Error)]
#[error("execution engine error: {0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        EngineError(message.into())
    }
}

/// Opaque handle to a job the engine accepted into its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobTicket(pub u64);

/// Terminal result of a build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobOutcome {
    /// The build completed cleanly.
    Success,

    /// The build completed but quality gates (typically tests) degraded it.
    Unstable,

    /// The build failed.
    Failure,

    /// The run was aborted before completing.
    Aborted,

    /// The run never got to building.
    NotBuilt,
}

/// A build run as seen by the outcome reporter.
///
/// Implemented by the execution engine; the reporter reads run metadata and
/// mutates nothing but the human-readable description. `cause` is the only
/// channel back to pull-request context: a run returning `None` was not
/// triggered by this bridge and is ignored.
pub trait BuildRun {
    /// The cause attached at trigger time, if this run is ours.
    fn cause(&self) -> Option<&BuildCause>;

    /// The engine-assigned run number.
    fn number(&self) -> RunNumber;

    /// The terminal result. Only meaningful once the run has completed.
    fn outcome(&self) -> JobOutcome;

    /// The run duration, formatted by the engine (e.g. "3 min 12 sec").
    fn duration_text(&self) -> String;

    /// The engine-relative URL path of this run (e.g. "job/widget/42/").
    fn url_path(&self) -> String;

    /// Sets the human-readable description shown for this run.
    fn set_description(&self, description: &str) -> Result<(), EngineError>;

    /// Returns the last `lines` lines of the run's log, in original order.
    fn tail_log(&self, lines: usize) -> Result<Vec<String>, EngineError>;
}
