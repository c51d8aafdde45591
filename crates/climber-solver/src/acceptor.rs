//! Acceptors for hill-climbing move acceptance.
//!
//! An acceptor decides whether a candidate may replace the incumbent by
//! comparing the two scores under the run's objective.

use std::fmt::Debug;

use climber_core::{Objective, Score};

/// Trait for accepting or rejecting candidates.
pub trait Acceptor: Send + Debug {
    /// Returns true if a candidate scoring `candidate` may replace an
    /// incumbent scoring `incumbent`.
    fn is_accepted(&self, objective: Objective, incumbent: &Score, candidate: &Score) -> bool;
}

/// Hill climbing acceptor - accepts only strictly improving candidates.
///
/// Ties with the incumbent are rejected, so a plateau never moves the search.
/// An infeasible candidate is never accepted over a feasible incumbent.
///
/// # Example
///
/// ```
/// use climber_core::{Objective, Score};
/// use climber_solver::{Acceptor, HillClimbingAcceptor};
///
/// let acceptor = HillClimbingAcceptor::new();
/// assert!(acceptor.is_accepted(Objective::Minimize, &Score::of(3.0), &Score::of(2.0)));
/// assert!(!acceptor.is_accepted(Objective::Minimize, &Score::of(3.0), &Score::of(3.0)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(&self, objective: Objective, incumbent: &Score, candidate: &Score) -> bool {
        objective.is_better(candidate, incumbent)
    }
}
