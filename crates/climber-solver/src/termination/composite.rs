//! Composite termination.
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use climber_config::SearchConfig;

use super::Termination;
use crate::scope::SearchState;
use crate::solver::TerminationReason;

/// Combines terminations with OR logic.
///
/// Children are checked in tuple order and the first reason reported wins.
///
/// # Examples
///
/// ```
/// use climber_solver::{IterationLimitTermination, OrTermination, TargetScoreTermination};
///
/// let termination = OrTermination::new((TargetScoreTermination, IterationLimitTermination));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<S, $($T),+> Termination<S> for OrTermination<($($T,)+)>
        where
            $($T: Termination<S>,)+
        {
            fn check(
                &self,
                state: &SearchState<S>,
                config: &SearchConfig,
            ) -> Option<TerminationReason> {
                $(
                    if let Some(reason) = (self.0).$idx.check(state, config) {
                        return Some(reason);
                    }
                )+
                None
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
