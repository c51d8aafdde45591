//! The contract between a concrete problem and the engine.

use std::fmt::Debug;
use std::path::Path;

use climber_config::{ClimberConfig, SearchConfig};
use climber_core::error::Result;
use climber_core::{FitnessEvaluator, Genotype, Neighborhood, Score};
use climber_solver::{
    MultiStart, MultiStartResult, SearchResult, SearchStatistics, TerminationReason,
};
use rand::RngCore;
use serde::Serialize;
use tracing::info;

use crate::data::{self, CsvLoader, DataLoader, Dataset};
use crate::report::Report;

/// A problem the engine can solve from a dataset.
///
/// The adapter value itself is the read-only search context handed to the
/// evaluator and the neighborhood.
pub trait ProblemAdapter: Sized + Sync {
    /// Name used on the command line and in logs.
    const NAME: &'static str;

    type Solution: Clone + PartialEq + Debug + Send + Into<Genotype>;
    type Evaluator: FitnessEvaluator<Self::Solution, Self> + Sync;
    type Neighborhood: Neighborhood<Self::Solution, Self> + Sync;

    fn from_dataset(dataset: &Dataset) -> data::Result<Self>;

    /// Reads the problem from a comma-separated file.
    fn load(path: &Path) -> data::Result<Self> {
        Self::from_dataset(&CsvLoader::default().load(path)?)
    }

    /// Search settings used when a config file does not override them.
    fn default_config() -> SearchConfig;

    fn initial_solution(&self, rng: &mut dyn RngCore) -> Self::Solution;

    /// Builds the evaluator. Problems with hard constraints read the
    /// feasibility policy from `config`.
    fn evaluator(&self, config: &ClimberConfig) -> Result<Self::Evaluator>;

    fn neighborhood(&self) -> Result<Self::Neighborhood>;

    fn report(&self, result: &SearchResult<Self::Solution>) -> Report;
}

/// Runs `config.restarts` (default 1) searches of `problem` from random
/// starts drawn with `seed`.
pub fn solve<P: ProblemAdapter>(
    problem: &P,
    config: &ClimberConfig,
    seed: u64,
) -> Result<MultiStartResult<P::Solution>> {
    let search = config.search_config(P::default_config());
    let restarts = config.restarts.unwrap_or(1);
    let starts = MultiStart::new(search, restarts, seed)?;
    let evaluator = problem.evaluator(config)?;
    let neighborhood = problem.neighborhood()?;

    info!(
        event = "problem_start",
        problem = P::NAME,
        seed,
        restarts,
        parallel = config.parallel,
    );

    let result = if config.parallel {
        starts.run_parallel(problem, &evaluator, &neighborhood, P::initial_solution)
    } else {
        starts.run(problem, &evaluator, &neighborhood, P::initial_solution)
    };
    Ok(result)
}

/// Type-erased outcome of [`solve_and_report`], ready for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub problem: &'static str,
    pub seed: u64,
    pub restarts: usize,
    pub best_run: usize,
    pub score: Score,
    pub iterations_run: u64,
    pub converged: bool,
    pub termination: TerminationReason,
    pub solution: Genotype,
    pub statistics: SearchStatistics,
    pub report: Report,
}

/// Solves `problem` and reports its best run.
pub fn solve_and_report<P: ProblemAdapter>(
    problem: &P,
    config: &ClimberConfig,
    seed: u64,
) -> Result<Outcome> {
    let result = solve(problem, config, seed)?;
    let restarts = result.runs.len();
    let best_run = result.best;
    let best = result.into_best();
    let report = problem.report(&best);

    Ok(Outcome {
        problem: P::NAME,
        seed,
        restarts,
        best_run,
        score: best.best_score,
        iterations_run: best.iterations_run,
        converged: best.converged,
        termination: best.termination,
        solution: best.best_solution.into(),
        statistics: best.statistics,
        report,
    })
}
