//! Independent restarts of the same search.
//!
//! Run `i` draws its initial solution and every proposal from its own
//! `ChaCha8Rng`, seeded with the shared seed and stream `i`. Results are
//! therefore identical whether runs execute sequentially or on the rayon
//! pool, and whatever order the pool schedules them in.

use std::fmt::Debug;

use climber_config::SearchConfig;
use climber_core::error::Result;
use climber_core::{ClimbError, FitnessEvaluator, Neighborhood};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::info;

use crate::event::TracingListener;
use crate::solver::{HillClimber, SearchResult};
use crate::termination::{DefaultTermination, Termination};

/// Results of every restart, with the index of the best one.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStartResult<S> {
    /// Index into `runs` of the best result; the earliest wins ties.
    pub best: usize,
    pub runs: Vec<SearchResult<S>>,
}

impl<S> MultiStartResult<S> {
    pub fn best_result(&self) -> &SearchResult<S> {
        &self.runs[self.best]
    }

    pub fn into_best(mut self) -> SearchResult<S> {
        self.runs.swap_remove(self.best)
    }
}

/// Runs a [`HillClimber`] several times from independent random starts.
///
/// # Examples
///
/// ```
/// use climber_core::{BitVector, Score};
/// use climber_solver::{BitFlip, MultiStart, SearchConfig};
///
/// let ones = |bits: &BitVector, _: &()| Score::of(bits.count_ones() as f64);
/// let config = SearchConfig::new().with_max_iterations(50);
/// let starts = MultiStart::new(config, 4, 7).unwrap();
///
/// let result = starts.run(&(), &ones, &BitFlip, |_, rng| BitVector::random(12, rng));
/// assert_eq!(result.runs.len(), 4);
/// assert_eq!(result, starts.run_parallel(&(), &ones, &BitFlip, |_, rng| BitVector::random(12, rng)));
/// ```
#[derive(Debug, Clone)]
pub struct MultiStart<T = DefaultTermination> {
    climber: HillClimber<T>,
    restarts: usize,
    seed: u64,
}

impl MultiStart {
    /// # Errors
    ///
    /// Returns `ClimbError::InvalidConfiguration` for an invalid search
    /// config or zero restarts.
    pub fn new(config: SearchConfig, restarts: usize, seed: u64) -> Result<Self> {
        Self::with_climber(HillClimber::new(config)?, restarts, seed)
    }
}

impl<T> MultiStart<T> {
    pub fn with_climber(climber: HillClimber<T>, restarts: usize, seed: u64) -> Result<Self> {
        if restarts == 0 {
            return Err(ClimbError::InvalidConfiguration(
                "restarts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            climber,
            restarts,
            seed,
        })
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// The rng used by run `index`.
    pub fn rng_for(&self, index: usize) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(index as u64);
        rng
    }

    /// Runs every restart on the calling thread, in index order.
    pub fn run<S, C, E, N, I>(
        &self,
        context: &C,
        evaluator: &E,
        neighborhood: &N,
        initial: I,
    ) -> MultiStartResult<S>
    where
        S: Clone + PartialEq + Debug,
        C: ?Sized,
        E: FitnessEvaluator<S, C> + ?Sized,
        N: Neighborhood<S, C> + ?Sized,
        T: Termination<S>,
        I: Fn(&C, &mut dyn RngCore) -> S,
    {
        let runs = (0..self.restarts)
            .map(|index| self.run_one(index, context, evaluator, neighborhood, &initial))
            .collect();
        self.finish(runs)
    }

    /// Runs the restarts on the rayon pool. Each run stays single-threaded.
    pub fn run_parallel<S, C, E, N, I>(
        &self,
        context: &C,
        evaluator: &E,
        neighborhood: &N,
        initial: I,
    ) -> MultiStartResult<S>
    where
        S: Clone + PartialEq + Debug + Send,
        C: Sync + ?Sized,
        E: FitnessEvaluator<S, C> + Sync + ?Sized,
        N: Neighborhood<S, C> + Sync + ?Sized,
        T: Termination<S>,
        I: Fn(&C, &mut dyn RngCore) -> S + Sync,
    {
        let runs = (0..self.restarts)
            .into_par_iter()
            .map(|index| self.run_one(index, context, evaluator, neighborhood, &initial))
            .collect();
        self.finish(runs)
    }

    fn run_one<S, C, E, N, I>(
        &self,
        index: usize,
        context: &C,
        evaluator: &E,
        neighborhood: &N,
        initial: &I,
    ) -> SearchResult<S>
    where
        S: Clone + PartialEq + Debug,
        C: ?Sized,
        E: FitnessEvaluator<S, C> + ?Sized,
        N: Neighborhood<S, C> + ?Sized,
        T: Termination<S>,
        I: Fn(&C, &mut dyn RngCore) -> S,
    {
        let mut rng = self.rng_for(index);
        let start = initial(context, &mut rng);
        self.climber.run_with_listener(
            start,
            context,
            evaluator,
            neighborhood,
            &mut rng,
            &mut TracingListener::for_run(index),
        )
    }

    fn finish<S>(&self, runs: Vec<SearchResult<S>>) -> MultiStartResult<S> {
        let objective = self.climber.config().objective;
        let mut best = 0;
        for (index, run) in runs.iter().enumerate().skip(1) {
            if objective.is_better(&run.best_score, &runs[best].best_score) {
                best = index;
            }
        }

        info!(
            event = "multistart_end",
            restarts = runs.len(),
            best_run = best,
            score = %runs[best].best_score,
        );

        MultiStartResult { best, runs }
    }
}

#[cfg(test)]
mod tests {
    use climber_core::{Objective, Permutation, Score};
    use climber_test::DistanceMatrix;

    use super::*;
    use crate::heuristic::PairSwap;

    fn tour_config() -> SearchConfig {
        SearchConfig::new()
            .with_max_iterations(200)
            .with_objective(Objective::Minimize)
    }

    fn shuffled(matrix: &DistanceMatrix, rng: &mut dyn RngCore) -> Permutation {
        Permutation::shuffled(matrix.len(), rng)
    }

    #[test]
    fn test_zero_restarts_rejected() {
        let result = MultiStart::new(tour_config(), 0, 1);
        assert!(matches!(result, Err(ClimbError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_best_is_best_of_runs() {
        let matrix = DistanceMatrix::line(9);
        let starts = MultiStart::new(tour_config(), 5, 3).unwrap();

        let result = starts.run(&matrix, &DistanceMatrix::tour_length, &PairSwap, shuffled);

        assert_eq!(result.runs.len(), 5);
        let best = result.best_result().best_score;
        for run in &result.runs {
            assert!(!Objective::Minimize.is_better(&run.best_score, &best));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let matrix = DistanceMatrix::line(9);
        let starts = MultiStart::new(tour_config(), 6, 99).unwrap();

        let sequential = starts.run(&matrix, &DistanceMatrix::tour_length, &PairSwap, shuffled);
        let parallel =
            starts.run_parallel(&matrix, &DistanceMatrix::tour_length, &PairSwap, shuffled);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_runs_use_distinct_streams() {
        let starts = MultiStart::new(tour_config(), 2, 5).unwrap();
        let mut first = starts.rng_for(0);
        let mut second = starts.rng_for(1);
        assert_ne!(first.next_u64(), second.next_u64());
    }

    #[test]
    fn test_earliest_run_wins_ties() {
        let flat = |_: &Permutation, _: &DistanceMatrix| Score::of(1.0);
        let matrix = DistanceMatrix::line(4);
        let starts = MultiStart::new(tour_config().with_max_iterations(3), 3, 0).unwrap();

        let result = starts.run(&matrix, &flat, &PairSwap, shuffled);
        assert_eq!(result.best, 0);
        assert_eq!(result.into_best().best_score, Score::of(1.0));
    }
}
