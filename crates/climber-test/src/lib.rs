//! Shared test fixtures for Climber crates.
//!
//! This crate provides small problem instances with known optima, plus pure
//! evaluators and neighborhoods for them. It depends only on `climber-core`
//! so that every engine crate can use it as a dev-dependency.
//!
//! - [`knapsack`] - Budgeted selection over a [`BitVector`](climber_core::BitVector)
//! - [`tour`] - Closed tours over a distance matrix
//! - [`offset`] - A bounded scalar with a concave objective
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! climber-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use climber_test::knapsack::{Knapsack, AllFlips};
//! ```

pub mod knapsack;
pub mod offset;
pub mod tour;

use rand::RngCore;

pub use knapsack::{AllFlips, Knapsack};
pub use offset::BoundedOffset;
pub use tour::DistanceMatrix;

/// A generator that never moves. Every iteration using it is degenerate.
pub fn unchanged<S: Clone, C: ?Sized>(current: &S, _context: &C, _rng: &mut dyn RngCore) -> S {
    current.clone()
}
