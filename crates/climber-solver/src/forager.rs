//! Foragers for hill-climbing candidate selection
//!
//! Foragers collect accepted candidates during an iteration and pick the
//! one that replaces the incumbent.

use std::fmt::Debug;

use climber_core::{Objective, Score};

/// Trait for collecting and selecting candidates within one iteration.
///
/// Foragers are responsible for:
/// - Collecting accepted candidates in the order they were scored
/// - Deciding when to stop scoring the rest of the neighborhood
/// - Selecting the candidate to apply
pub trait StepForager<S>: Debug {
    /// Called at the start of each iteration to reset state.
    fn step_started(&mut self);

    /// Adds an accepted candidate.
    fn add_candidate(&mut self, solution: S, score: Score);

    /// Returns true if no further candidates need scoring.
    fn is_quit_early(&self) -> bool;

    /// Takes the selected candidate, or None if nothing was accepted.
    fn pick(&mut self) -> Option<(S, Score)>;
}

/// Picks the first accepted candidate and quits scanning.
pub struct FirstImprovementForager<S> {
    accepted: Option<(S, Score)>,
}

impl<S> FirstImprovementForager<S> {
    pub fn new() -> Self {
        Self { accepted: None }
    }
}

impl<S> Default for FirstImprovementForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Debug for FirstImprovementForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstImprovementForager")
            .field("has_candidate", &self.accepted.is_some())
            .finish()
    }
}

impl<S> StepForager<S> for FirstImprovementForager<S> {
    fn step_started(&mut self) {
        self.accepted = None;
    }

    fn add_candidate(&mut self, solution: S, score: Score) {
        if self.accepted.is_none() {
            self.accepted = Some((solution, score));
        }
    }

    fn is_quit_early(&self) -> bool {
        self.accepted.is_some()
    }

    fn pick(&mut self) -> Option<(S, Score)> {
        self.accepted.take()
    }
}

/// Scores the whole neighborhood and keeps the best accepted candidate.
///
/// Between equally good candidates the earliest one wins.
pub struct BestOfStepForager<S> {
    objective: Objective,
    best: Option<(S, Score)>,
}

impl<S> BestOfStepForager<S> {
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            best: None,
        }
    }
}

impl<S> Debug for BestOfStepForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestOfStepForager")
            .field("objective", &self.objective)
            .field("best_score", &self.best.as_ref().map(|(_, score)| *score))
            .finish()
    }
}

impl<S> StepForager<S> for BestOfStepForager<S> {
    fn step_started(&mut self) {
        self.best = None;
    }

    fn add_candidate(&mut self, solution: S, score: Score) {
        let replace = match &self.best {
            None => true,
            Some((_, best_score)) => self.objective.is_better(&score, best_score),
        };
        if replace {
            self.best = Some((solution, score));
        }
    }

    fn is_quit_early(&self) -> bool {
        false
    }

    fn pick(&mut self) -> Option<(S, Score)> {
        self.best.take()
    }
}
