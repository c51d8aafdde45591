//! Fitness evaluators.
//!
//! An evaluator is a pure function of a solution and the read-only problem
//! context. Any `Fn(&S, &C) -> Score` closure is an evaluator.

use crate::error::{ClimbError, Result};
use crate::score::{Objective, Score};

/// Scores one candidate solution against an immutable problem context.
///
/// Implementations must be deterministic: the engine relies on
/// `evaluate(best) == best_score` after a run.
pub trait FitnessEvaluator<S, C: ?Sized> {
    fn evaluate(&self, solution: &S, context: &C) -> Score;
}

impl<S, C: ?Sized, F> FitnessEvaluator<S, C> for F
where
    F: Fn(&S, &C) -> Score,
{
    #[inline]
    fn evaluate(&self, solution: &S, context: &C) -> Score {
        self(solution, context)
    }
}

/// Hard-constraint violations and soft objective of one candidate, before
/// they are folded into a single [`Score`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstrainedEvaluation {
    /// Amount of hard-constraint violation. Zero means feasible.
    pub violations: f64,
    /// Soft objective value in the run's objective direction.
    pub objective: f64,
}

impl ConstrainedEvaluation {
    pub fn new(violations: f64, objective: f64) -> Self {
        Self {
            violations,
            objective,
        }
    }
}

/// How hard-constraint violations enter the score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum FeasibilityPolicy {
    /// Any violation makes the candidate infeasible.
    HardBlock,
    /// Violations are added to the objective as a weighted penalty.
    SoftPenalty { weight: f64 },
}

impl Default for FeasibilityPolicy {
    fn default() -> Self {
        FeasibilityPolicy::SoftPenalty { weight: 1.0 }
    }
}

impl FeasibilityPolicy {
    /// Checks that a penalty weight is finite and positive.
    pub fn validate(&self) -> Result<()> {
        match self {
            FeasibilityPolicy::SoftPenalty { weight } if !(weight.is_finite() && *weight > 0.0) => {
                Err(ClimbError::invalid(format!(
                    "soft penalty weight must be finite and positive, got {}",
                    weight
                )))
            }
            _ => Ok(()),
        }
    }

    /// Folds an evaluation into a score. The penalty always moves the score
    /// toward worse under `objective`.
    pub fn fold(&self, objective: Objective, evaluation: ConstrainedEvaluation) -> Score {
        let weight = match self {
            FeasibilityPolicy::HardBlock => {
                if evaluation.violations > 0.0 {
                    return Score::Infeasible;
                }
                0.0
            }
            FeasibilityPolicy::SoftPenalty { weight } => *weight,
        };
        let penalty = weight * evaluation.violations;
        match objective {
            Objective::Maximize => Score::of(evaluation.objective - penalty),
            Objective::Minimize => Score::of(evaluation.objective + penalty),
        }
    }
}

/// Adapts a constrained evaluation function into a [`FitnessEvaluator`].
///
/// # Examples
///
/// ```
/// use climber_core::{
///     ConstrainedEvaluation, FeasibilityPolicy, FitnessEvaluator, Objective,
///     PenalizedEvaluator, Score,
/// };
///
/// let overlaps_and_gaps = |s: &(f64, f64), _: &()| ConstrainedEvaluation::new(s.0, s.1);
///
/// let soft = PenalizedEvaluator::new(
///     overlaps_and_gaps,
///     Objective::Minimize,
///     FeasibilityPolicy::default(),
/// ).unwrap();
/// assert_eq!(soft.evaluate(&(2.0, 3.0), &()), Score::of(5.0));
///
/// let hard = PenalizedEvaluator::new(
///     overlaps_and_gaps,
///     Objective::Minimize,
///     FeasibilityPolicy::HardBlock,
/// ).unwrap();
/// assert_eq!(hard.evaluate(&(2.0, 3.0), &()), Score::Infeasible);
/// ```
#[derive(Debug, Clone)]
pub struct PenalizedEvaluator<F> {
    evaluate: F,
    objective: Objective,
    policy: FeasibilityPolicy,
}

impl<F> PenalizedEvaluator<F> {
    /// Creates a penalized evaluator, rejecting an invalid penalty weight.
    pub fn new(evaluate: F, objective: Objective, policy: FeasibilityPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            evaluate,
            objective,
            policy,
        })
    }

    pub fn policy(&self) -> FeasibilityPolicy {
        self.policy
    }
}

impl<S, C: ?Sized, F> FitnessEvaluator<S, C> for PenalizedEvaluator<F>
where
    F: Fn(&S, &C) -> ConstrainedEvaluation,
{
    fn evaluate(&self, solution: &S, context: &C) -> Score {
        self.policy
            .fold(self.objective, (self.evaluate)(solution, context))
    }
}
