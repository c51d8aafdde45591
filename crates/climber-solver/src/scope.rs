//! Search state of a single run.

use climber_core::Score;

/// Mutable state of one hill-climbing run.
///
/// Created when a run starts, advanced only by the engine loop, and consumed
/// into the [`SearchResult`](crate::SearchResult) when the run ends. Since
/// hill climbing never accepts a worse candidate, the current solution is
/// always the best one seen.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState<S> {
    current: S,
    current_score: Score,
    iterations_without_improvement: u64,
    total_iterations: u64,
}

impl<S> SearchState<S> {
    pub fn new(initial: S, initial_score: Score) -> Self {
        Self {
            current: initial,
            current_score: initial_score,
            iterations_without_improvement: 0,
            total_iterations: 0,
        }
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    pub fn current_score(&self) -> &Score {
        &self.current_score
    }

    pub fn iterations_without_improvement(&self) -> u64 {
        self.iterations_without_improvement
    }

    pub fn total_iterations(&self) -> u64 {
        self.total_iterations
    }

    /// Starts the next iteration and returns its 1-based index.
    pub fn begin_iteration(&mut self) -> u64 {
        self.total_iterations += 1;
        self.total_iterations
    }

    /// Replaces the incumbent after an accepted candidate.
    pub fn accept(&mut self, solution: S, score: Score) {
        self.current = solution;
        self.current_score = score;
        self.iterations_without_improvement = 0;
    }

    /// Records an iteration that kept the incumbent.
    pub fn stall(&mut self) {
        self.iterations_without_improvement += 1;
    }

    pub fn into_parts(self) -> (S, Score) {
        (self.current, self.current_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_resets_stall_counter() {
        let mut state = SearchState::new(0, Score::of(0.0));
        state.begin_iteration();
        state.stall();
        state.begin_iteration();
        state.stall();
        assert_eq!(state.iterations_without_improvement(), 2);

        assert_eq!(state.begin_iteration(), 3);
        state.accept(4, Score::of(4.0));
        assert_eq!(state.iterations_without_improvement(), 0);
        assert_eq!(state.total_iterations(), 3);
        assert_eq!(state.into_parts(), (4, Score::of(4.0)));
    }
}
