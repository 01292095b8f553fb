//! Mapping from engine results to remote commit states.

use crate::engine::JobOutcome;
use crate::types::CommitState;

/// Maps a terminal job result to the commit state to report and the verb
/// used in the completion message.
///
/// Success and unstable are the only results with their own mapping; every
/// other terminal result (failed, aborted, never built) reads as a failure
/// on the pull request.
pub fn map_outcome(outcome: JobOutcome, unstable_as: CommitState) -> (CommitState, &'static str) {
    match outcome {
        JobOutcome::Success => (CommitState::Success, "succeeded"),
        JobOutcome::Unstable => (unstable_as, "found unstable"),
        JobOutcome::Failure | JobOutcome::Aborted | JobOutcome::NotBuilt => {
            (CommitState::Failure, "failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_maps_to_success_exactly() {
        let (state, verb) = map_outcome(JobOutcome::Success, CommitState::Failure);
        assert_eq!(state, CommitState::Success);
        assert_eq!(verb, "succeeded");
    }

    #[test]
    fn unstable_honors_the_configured_mapping() {
        for configured in [
            CommitState::Success,
            CommitState::Error,
            CommitState::Failure,
        ] {
            let (state, verb) = map_outcome(JobOutcome::Unstable, configured);
            assert_eq!(state, configured);
            assert_eq!(verb, "found unstable");
        }
    }

    #[test]
    fn everything_else_maps_to_failure() {
        for outcome in [JobOutcome::Failure, JobOutcome::Aborted, JobOutcome::NotBuilt] {
            let (state, verb) = map_outcome(outcome, CommitState::Error);
            assert_eq!(state, CommitState::Failure);
            assert_eq!(verb, "failed");
        }
    }
}
