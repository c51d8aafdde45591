//! Run statistics.
//!
//! Counters and the improvement history of a single run. Nothing here
//! depends on wall-clock time, so two runs with the same seed produce equal
//! statistics.

use climber_core::{Objective, Score};
use serde::Serialize;

/// The incumbent score after an accepted improvement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreImprovement {
    /// Iteration that produced the improvement; 0 for the initial solution.
    pub iteration: u64,
    pub score: Score,
}

/// Counters collected by the engine during one run.
///
/// # Example
///
/// ```
/// use climber_core::{Objective, Score};
/// use climber_solver::SearchStatistics;
///
/// let mut stats = SearchStatistics::default();
/// stats.record_initial(Score::of(10.0));
/// stats.record_evaluation();
/// stats.record_evaluation();
/// stats.record_improvement(1, Score::of(8.0));
///
/// assert_eq!(stats.evaluations, 3);
/// assert_eq!(stats.improvements, 1);
/// assert!(stats.is_monotonic(Objective::Minimize));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStatistics {
    /// Evaluator calls, including the initial solution.
    pub evaluations: u64,
    /// Accepted candidates.
    pub improvements: u64,
    /// Iterations in which every candidate equalled the incumbent.
    pub degenerate_iterations: u64,
    /// Initial score followed by every accepted improvement.
    pub history: Vec<ScoreImprovement>,
}

impl SearchStatistics {
    /// Records the evaluation of the initial solution.
    pub fn record_initial(&mut self, score: Score) {
        self.evaluations += 1;
        self.history.push(ScoreImprovement {
            iteration: 0,
            score,
        });
    }

    pub fn record_evaluation(&mut self) {
        self.evaluations += 1;
    }

    pub fn record_improvement(&mut self, iteration: u64, score: Score) {
        self.improvements += 1;
        self.history.push(ScoreImprovement { iteration, score });
    }

    pub fn record_degenerate(&mut self) {
        self.degenerate_iterations += 1;
    }

    /// Returns the improvement rate (improvements / evaluations).
    pub fn improvement_rate(&self) -> f64 {
        if self.evaluations == 0 {
            0.0
        } else {
            self.improvements as f64 / self.evaluations as f64
        }
    }

    /// Score of the initial solution, if the run started.
    pub fn initial_score(&self) -> Option<Score> {
        self.history.first().map(|entry| entry.score)
    }

    /// Returns true if every history entry strictly improves on the
    /// previous one under `objective`.
    pub fn is_monotonic(&self, objective: Objective) -> bool {
        self.history
            .windows(2)
            .all(|pair| objective.is_better(&pair[1].score, &pair[0].score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvement_rate() {
        let mut stats = SearchStatistics::default();
        assert_eq!(stats.improvement_rate(), 0.0);
        stats.record_initial(Score::of(0.0));
        stats.record_evaluation();
        stats.record_evaluation();
        stats.record_evaluation();
        stats.record_improvement(2, Score::of(1.0));
        assert_eq!(stats.improvement_rate(), 0.25);
        assert_eq!(stats.initial_score(), Some(Score::of(0.0)));
    }

    #[test]
    fn test_monotonic_detects_regression() {
        let mut stats = SearchStatistics::default();
        stats.record_initial(Score::Infeasible);
        stats.record_improvement(1, Score::of(5.0));
        assert!(stats.is_monotonic(Objective::Maximize));
        stats.record_improvement(2, Score::of(4.0));
        assert!(!stats.is_monotonic(Objective::Maximize));
    }
}
