//! Climber - Hill-Climbing Local Search in Rust
//!
//! Plug a solution type, a fitness evaluator and a neighborhood into
//! [`HillClimber`], or solve one of the bundled problems from a CSV file.
//!
//! # Example
//!
//! ```rust
//! use climber::prelude::*;
//!
//! let score = Score::of(30.0);
//! assert!(Objective::Maximize.is_better(&score, &Score::of(10.0)));
//! assert!(Objective::Maximize.is_better(&score, &Score::Infeasible));
//! ```

// Engine contracts
pub use climber_core::{
    Assignment, BitVector, Candidates, ClimbError, ConstrainedEvaluation, FeasibilityPolicy,
    FitnessEvaluator, Genotype, NeighborGenerator, Neighborhood, Objective, ParamTuple,
    PenalizedEvaluator, Permutation, Score,
};

// Configuration
pub use climber_config::{
    AcceptanceRule, ClimberConfig, ConfigError, SearchConfig, SearchConfigOverride,
};

// Search engine
pub use climber_solver::{
    BitFlip, HillClimber, MultiStart, MultiStartResult, OffsetSteps, PairSwap, Sampled,
    SearchListener, SearchResult, SearchStatistics, Single, TerminationReason, TracingListener,
};

// Problems
pub use climber_problems::{
    solve, solve_and_report, Cohort, CsvLoader, DataLoader, DataUnavailable, Dataset,
    DefenseSchedule, GradeBook, LabRoute, MentorAvailability, Outcome, ProblemAdapter,
    ProjectPortfolio, QuestionBank, Report, Tuner,
};

#[cfg(feature = "console")]
pub use climber_console as console;

pub mod prelude {
    pub use super::{
        FitnessEvaluator, Genotype, HillClimber, NeighborGenerator, Neighborhood, Objective,
        ProblemAdapter, Score, SearchConfig, SearchResult, Single,
    };
    pub use super::{solve, solve_and_report, ClimberConfig};
}
