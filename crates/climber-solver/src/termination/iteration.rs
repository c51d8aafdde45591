//! Iteration-limit termination.

use climber_config::SearchConfig;

use super::Termination;
use crate::scope::SearchState;
use crate::solver::TerminationReason;

/// Stops once `max_iterations` iterations have run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterationLimitTermination;

impl<S> Termination<S> for IterationLimitTermination {
    fn check(&self, state: &SearchState<S>, config: &SearchConfig) -> Option<TerminationReason> {
        (state.total_iterations() >= config.max_iterations)
            .then_some(TerminationReason::IterationLimit)
    }
}
