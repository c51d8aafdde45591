//! Hill-climbing engine.

use std::fmt::Debug;

use climber_config::{AcceptanceRule, SearchConfig};
use climber_core::error::Result;
use climber_core::{FitnessEvaluator, Neighborhood, Score};
use rand::RngCore;
use serde::Serialize;
use tracing::{info, trace};

use crate::acceptor::{Acceptor, HillClimbingAcceptor};
use crate::event::{SearchListener, TracingListener};
use crate::forager::{BestOfStepForager, FirstImprovementForager, StepForager};
use crate::scope::SearchState;
use crate::statistics::SearchStatistics;
use crate::termination::{DefaultTermination, Termination};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// No improvement within the configured patience.
    LocalOptimum,
    /// The incumbent satisfied the target score.
    TargetReached,
    /// `max_iterations` iterations ran.
    IterationLimit,
}

impl TerminationReason {
    /// Every reason except the iteration limit counts as convergence.
    pub fn is_converged(self) -> bool {
        !matches!(self, TerminationReason::IterationLimit)
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<S> {
    pub best_solution: S,
    pub best_score: Score,
    pub iterations_run: u64,
    pub converged: bool,
    pub termination: TerminationReason,
    pub statistics: SearchStatistics,
}

/// Hill-climbing search engine.
///
/// Holds a validated [`SearchConfig`] and the termination used to stop runs.
/// A climber is immutable and may run any number of searches, including
/// concurrently from several threads.
///
/// # Examples
///
/// ```
/// use climber_core::{BitVector, Score};
/// use climber_solver::{BitFlip, HillClimber, SearchConfig, TerminationReason};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// // Maximize the number of set bits.
/// let ones = |bits: &BitVector, _: &()| Score::of(bits.count_ones() as f64);
/// let config = SearchConfig::new()
///     .with_max_iterations(500)
///     .with_target_score(8.0);
///
/// let climber = HillClimber::new(config).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let result = climber.run(BitVector::zeros(8), &(), &ones, &BitFlip, &mut rng);
///
/// assert_eq!(result.best_score, Score::of(8.0));
/// assert_eq!(result.termination, TerminationReason::TargetReached);
/// assert!(result.converged);
/// ```
#[derive(Debug, Clone)]
pub struct HillClimber<T = DefaultTermination> {
    config: SearchConfig,
    acceptor: HillClimbingAcceptor,
    termination: T,
}

impl HillClimber {
    /// Creates a climber with the default terminations.
    ///
    /// # Errors
    ///
    /// Returns `ClimbError::InvalidConfiguration` for a zero iteration
    /// limit, a non-finite target or a zero unimproved limit.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            acceptor: HillClimbingAcceptor::new(),
            termination: DefaultTermination::default(),
        })
    }
}

impl<T> HillClimber<T> {
    /// Replaces the terminations checked between iterations.
    pub fn with_termination<T2>(self, termination: T2) -> HillClimber<T2> {
        HillClimber {
            config: self.config,
            acceptor: self.acceptor,
            termination,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs a search, reporting progress through `tracing`.
    pub fn run<S, C, E, N>(
        &self,
        initial: S,
        context: &C,
        evaluator: &E,
        neighborhood: &N,
        rng: &mut dyn RngCore,
    ) -> SearchResult<S>
    where
        S: Clone + PartialEq + Debug,
        C: ?Sized,
        E: FitnessEvaluator<S, C> + ?Sized,
        N: Neighborhood<S, C> + ?Sized,
        T: Termination<S>,
    {
        self.run_with_listener(
            initial,
            context,
            evaluator,
            neighborhood,
            rng,
            &mut TracingListener::new(),
        )
    }

    /// Runs a search, reporting lifecycle events to `listener`.
    pub fn run_with_listener<S, C, E, N, L>(
        &self,
        initial: S,
        context: &C,
        evaluator: &E,
        neighborhood: &N,
        rng: &mut dyn RngCore,
        listener: &mut L,
    ) -> SearchResult<S>
    where
        S: Clone + PartialEq + Debug,
        C: ?Sized,
        E: FitnessEvaluator<S, C> + ?Sized,
        N: Neighborhood<S, C> + ?Sized,
        T: Termination<S>,
        L: SearchListener<S> + ?Sized,
    {
        match self.config.acceptance {
            AcceptanceRule::FirstImprovement => self.climb(
                FirstImprovementForager::new(),
                initial,
                context,
                evaluator,
                neighborhood,
                rng,
                listener,
            ),
            AcceptanceRule::BestOfStep => self.climb(
                BestOfStepForager::new(self.config.objective),
                initial,
                context,
                evaluator,
                neighborhood,
                rng,
                listener,
            ),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn climb<S, C, E, N, L, F>(
        &self,
        mut forager: F,
        initial: S,
        context: &C,
        evaluator: &E,
        neighborhood: &N,
        rng: &mut dyn RngCore,
        listener: &mut L,
    ) -> SearchResult<S>
    where
        S: Clone + PartialEq + Debug,
        C: ?Sized,
        E: FitnessEvaluator<S, C> + ?Sized,
        N: Neighborhood<S, C> + ?Sized,
        T: Termination<S>,
        L: SearchListener<S> + ?Sized,
        F: StepForager<S>,
    {
        let objective = self.config.objective;
        let mut statistics = SearchStatistics::default();

        let initial_score = evaluator.evaluate(&initial, context);
        statistics.record_initial(initial_score);

        info!(
            event = "search_start",
            objective = ?objective,
            acceptance = ?self.config.acceptance,
            max_iterations = self.config.max_iterations,
            score = %initial_score,
        );

        let mut state = SearchState::new(initial, initial_score);
        listener.on_search_started(state.current(), &initial_score);

        let termination = loop {
            if let Some(reason) = self.termination.check(&state, &self.config) {
                break reason;
            }

            let iteration = state.begin_iteration();
            forager.step_started();

            let mut degenerate = true;
            for candidate in neighborhood.candidates(state.current(), context, rng) {
                if candidate != *state.current() {
                    degenerate = false;
                }
                let score = evaluator.evaluate(&candidate, context);
                statistics.record_evaluation();

                let accepted = self
                    .acceptor
                    .is_accepted(objective, state.current_score(), &score);
                trace!(event = "candidate", iteration, score = %score, accepted);

                if accepted {
                    forager.add_candidate(candidate, score);
                    if forager.is_quit_early() {
                        break;
                    }
                }
            }
            if degenerate {
                statistics.record_degenerate();
            }

            let improved = match forager.pick() {
                Some((solution, score)) => {
                    state.accept(solution, score);
                    statistics.record_improvement(iteration, score);
                    listener.on_improvement(iteration, state.current(), &score);
                    true
                }
                None => {
                    state.stall();
                    false
                }
            };
            listener.on_iteration(iteration, state.current_score(), improved);
        };

        let iterations_run = state.total_iterations();
        let (best_solution, best_score) = state.into_parts();

        info!(
            event = "search_end",
            iterations = iterations_run,
            evaluations = statistics.evaluations,
            improvements = statistics.improvements,
            termination = ?termination,
            score = %best_score,
        );

        let result = SearchResult {
            best_solution,
            best_score,
            iterations_run,
            converged: termination.is_converged(),
            termination,
            statistics,
        };
        listener.on_search_ended(&result);
        result
    }
}
