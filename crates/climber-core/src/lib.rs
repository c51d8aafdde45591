//! Climber Core - Core types and traits for hill-climbing search
//!
//! This crate provides the fundamental abstractions for Climber:
//! - Score and objective types for ranking candidate solutions
//! - Solution shapes (offsets, permutations, bit vectors, assignments, parameter tuples)
//! - Evaluator and neighborhood contracts plugged into the engine
//! - Error types shared by the engine crates

pub mod error;
pub mod evaluator;
pub mod neighborhood;
pub mod score;
pub mod solution;

pub use error::ClimbError;
pub use evaluator::{
    ConstrainedEvaluation, FeasibilityPolicy, FitnessEvaluator, PenalizedEvaluator,
};
pub use neighborhood::{Candidates, NeighborGenerator, Neighborhood};
pub use score::{Objective, Score};
pub use solution::{Assignment, BitVector, Genotype, ParamTuple, Permutation};
