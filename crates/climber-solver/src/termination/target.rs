//! Target-score termination.

use climber_config::SearchConfig;

use super::Termination;
use crate::scope::SearchState;
use crate::solver::TerminationReason;

/// Stops once the incumbent satisfies `stop_on_target_score`.
///
/// Maximizing runs stop at `score >= target`, minimizing runs at
/// `score <= target`. An infeasible incumbent never satisfies a target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetScoreTermination;

impl<S> Termination<S> for TargetScoreTermination {
    fn check(&self, state: &SearchState<S>, config: &SearchConfig) -> Option<TerminationReason> {
        let target = config.stop_on_target_score?;
        config
            .objective
            .satisfies(state.current_score(), target)
            .then_some(TerminationReason::TargetReached)
    }
}
