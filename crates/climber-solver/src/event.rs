//! Listeners for monitoring hill-climbing runs.
//!
//! A listener receives the run's lifecycle events in order: one
//! `on_search_started`, then per iteration an optional `on_improvement`
//! followed by `on_iteration`, then one `on_search_ended`. All methods have
//! no-op defaults, so a listener implements only what it needs.
//!
//! # Usage
//!
//! ```
//! use climber_core::Score;
//! use climber_solver::SearchListener;
//!
//! #[derive(Debug, Default)]
//! struct Curve(Vec<(u64, Score)>);
//!
//! impl<S> SearchListener<S> for Curve {
//!     fn on_improvement(&mut self, iteration: u64, _solution: &S, score: &Score) {
//!         self.0.push((iteration, *score));
//!     }
//! }
//! ```

use std::fmt::Debug;

use climber_core::Score;
use tracing::{debug, trace};

use crate::solver::SearchResult;

/// Listener for run lifecycle events.
pub trait SearchListener<S> {
    /// Called once, after the initial solution is scored.
    fn on_search_started(&mut self, _initial: &S, _score: &Score) {}

    /// Called after every iteration with the incumbent score.
    fn on_iteration(&mut self, _iteration: u64, _score: &Score, _improved: bool) {}

    /// Called when a candidate replaces the incumbent.
    fn on_improvement(&mut self, _iteration: u64, _solution: &S, _score: &Score) {}

    /// Called once with the final result.
    fn on_search_ended(&mut self, _result: &SearchResult<S>) {}
}

/// Listener that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<S> SearchListener<S> for NoopListener {}

/// Listener that reports progress through `tracing`.
///
/// Improvements are emitted at DEBUG and iterations at TRACE.
#[derive(Debug, Clone, Default)]
pub struct TracingListener {
    run: Option<usize>,
}

impl TracingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every event with the index of a multi-start run.
    pub fn for_run(run: usize) -> Self {
        Self { run: Some(run) }
    }
}

impl<S: Debug> SearchListener<S> for TracingListener {
    fn on_iteration(&mut self, iteration: u64, score: &Score, improved: bool) {
        trace!(
            event = "iteration",
            run = self.run,
            iteration,
            score = %score,
            improved,
        );
    }

    fn on_improvement(&mut self, iteration: u64, solution: &S, score: &Score) {
        debug!(
            event = "improvement",
            run = self.run,
            iteration,
            score = %score,
            solution = ?solution,
        );
    }
}

/// Listener that counts events.
///
/// Useful for testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountingListener {
    pub started: usize,
    pub iterations: usize,
    pub improvements: usize,
    pub ended: usize,
}

impl CountingListener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> SearchListener<S> for CountingListener {
    fn on_search_started(&mut self, _initial: &S, _score: &Score) {
        self.started += 1;
    }

    fn on_iteration(&mut self, _iteration: u64, _score: &Score, _improved: bool) {
        self.iterations += 1;
    }

    fn on_improvement(&mut self, _iteration: u64, _solution: &S, _score: &Score) {
        self.improvements += 1;
    }

    fn on_search_ended(&mut self, _result: &SearchResult<S>) {
        self.ended += 1;
    }
}
