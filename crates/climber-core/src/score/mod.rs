//! Score types for ranking candidate solutions
//!
//! A [`Score`] is a real number or the infeasible sentinel. Scores are only
//! compared through an [`Objective`], which fixes the direction once per run
//! and guarantees that infeasible candidates rank below every feasible one.

mod objective;

#[cfg(test)]
mod tests;

use std::fmt;

pub use objective::Objective;

/// Fitness of one candidate solution.
///
/// # Examples
///
/// ```
/// use climber_core::{Objective, Score};
///
/// let low = Score::of(3.0);
/// let high = Score::of(7.5);
///
/// assert!(Objective::Maximize.is_better(&high, &low));
/// assert!(Objective::Minimize.is_better(&low, &high));
/// assert!(Objective::Minimize.is_better(&low, &Score::Infeasible));
/// ```
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Score {
    /// A finite (or explicitly infinite) fitness value.
    Feasible(f64),
    /// The solution violates a hard constraint.
    #[default]
    Infeasible,
}

impl Score {
    /// Creates a score from a raw value. NaN becomes [`Score::Infeasible`].
    #[inline]
    pub fn of(value: f64) -> Self {
        if value.is_nan() {
            Score::Infeasible
        } else {
            Score::Feasible(value)
        }
    }

    /// Returns true unless this is the infeasible sentinel.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, Score::Feasible(_))
    }

    /// Returns the raw value of a feasible score.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Feasible(value) => Some(*value),
            Score::Infeasible => None,
        }
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Score::of(value)
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Feasible(value) => write!(f, "Score({})", value),
            Score::Infeasible => write!(f, "Score(infeasible)"),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Feasible(value) => write!(f, "{}", value),
            Score::Infeasible => write!(f, "infeasible"),
        }
    }
}
