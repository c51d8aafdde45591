//! Climber Solver Engine
//!
//! This crate provides the hill-climbing engine:
//! - `HillClimber`: the search loop over a pluggable evaluator and neighborhood
//! - Acceptor and foragers implementing first-improvement and best-of-step
//! - Termination conditions
//! - Multi-start runs, sequential or on the rayon pool
//! - Listeners for progress monitoring
//! - Reusable neighborhoods for the bundled solution shapes

pub mod acceptor;
pub mod event;
pub mod forager;
pub mod heuristic;
pub mod multistart;
pub mod scope;
pub mod solver;
pub mod statistics;
pub mod termination;

pub use acceptor::{Acceptor, HillClimbingAcceptor};
pub use event::{CountingListener, NoopListener, SearchListener, TracingListener};
pub use forager::{BestOfStepForager, FirstImprovementForager, StepForager};
pub use heuristic::{BitFlip, OffsetSteps, PairSwap, Sampled, Single};
pub use multistart::{MultiStart, MultiStartResult};
pub use scope::SearchState;
pub use solver::{HillClimber, SearchResult, TerminationReason};
pub use statistics::{ScoreImprovement, SearchStatistics};
pub use termination::{
    IterationLimitTermination, OrTermination, TargetScoreTermination, Termination,
    UnimprovedIterationTermination,
};

pub use climber_config::{AcceptanceRule, SearchConfig};
