//! Termination conditions for hill-climbing runs.
//!
//! Terminations are checked once before the first iteration and once after
//! every iteration. Each reads the limits it cares about from the run's
//! [`SearchConfig`] and reports why the run should stop.

mod composite;
mod iteration;
mod target;
mod unimproved;

use std::fmt::Debug;

use climber_config::SearchConfig;

use crate::scope::SearchState;
use crate::solver::TerminationReason;

pub use composite::OrTermination;
pub use iteration::IterationLimitTermination;
pub use target::TargetScoreTermination;
pub use unimproved::UnimprovedIterationTermination;

/// Trait for determining when to stop a run.
pub trait Termination<S>: Send + Sync + Debug {
    /// Returns the reason to stop, or None to keep climbing.
    fn check(&self, state: &SearchState<S>, config: &SearchConfig) -> Option<TerminationReason>;
}

/// The terminations every run uses unless replaced: target first, then
/// local optimum, then the iteration limit.
pub type DefaultTermination = OrTermination<(
    TargetScoreTermination,
    UnimprovedIterationTermination,
    IterationLimitTermination,
)>;

impl Default for DefaultTermination {
    fn default() -> Self {
        OrTermination::new((
            TargetScoreTermination,
            UnimprovedIterationTermination,
            IterationLimitTermination,
        ))
    }
}

#[cfg(test)]
mod tests;
