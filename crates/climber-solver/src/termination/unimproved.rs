//! Termination based on lack of improvement.

use climber_config::SearchConfig;

use super::Termination;
use crate::scope::SearchState;
use crate::solver::TerminationReason;

/// Stops at a local optimum.
///
/// With `stop_on_no_improvement` the first iteration that keeps the
/// incumbent ends the run. With `unimproved_iteration_limit` the run ends
/// once that many consecutive iterations kept it. When both are set the
/// tighter one applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimprovedIterationTermination;

impl UnimprovedIterationTermination {
    /// Consecutive non-improving iterations tolerated by `config`.
    pub fn limit(config: &SearchConfig) -> Option<u64> {
        let strict = config.stop_on_no_improvement.then_some(1);
        match (strict, config.unimproved_iteration_limit) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl<S> Termination<S> for UnimprovedIterationTermination {
    fn check(&self, state: &SearchState<S>, config: &SearchConfig) -> Option<TerminationReason> {
        let limit = Self::limit(config)?;
        (state.iterations_without_improvement() >= limit)
            .then_some(TerminationReason::LocalOptimum)
    }
}
