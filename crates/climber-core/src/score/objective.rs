//! Objective direction

use std::cmp::Ordering;

use super::Score;

/// Direction in which scores improve, fixed once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Objective {
    /// Higher scores are better.
    #[default]
    Maximize,
    /// Lower scores are better.
    Minimize,
}

impl Objective {
    /// Compares two scores. `Greater` means `a` is better than `b`.
    ///
    /// The infeasible sentinel is strictly worse than every feasible score
    /// and equal to itself, whatever the direction.
    pub fn compare(self, a: &Score, b: &Score) -> Ordering {
        match (a, b) {
            (Score::Infeasible, Score::Infeasible) => Ordering::Equal,
            (Score::Infeasible, Score::Feasible(_)) => Ordering::Less,
            (Score::Feasible(_), Score::Infeasible) => Ordering::Greater,
            (Score::Feasible(x), Score::Feasible(y)) => {
                let natural = x.partial_cmp(y).unwrap_or(Ordering::Equal);
                match self {
                    Objective::Maximize => natural,
                    Objective::Minimize => natural.reverse(),
                }
            }
        }
    }

    /// Returns true if `candidate` is strictly better than `incumbent`.
    #[inline]
    pub fn is_better(self, candidate: &Score, incumbent: &Score) -> bool {
        self.compare(candidate, incumbent) == Ordering::Greater
    }

    /// Returns true if `score` reaches `target` in this direction.
    ///
    /// Infeasible scores never satisfy a target.
    pub fn satisfies(self, score: &Score, target: f64) -> bool {
        match (self, score) {
            (_, Score::Infeasible) => false,
            (Objective::Maximize, Score::Feasible(value)) => *value >= target,
            (Objective::Minimize, Score::Feasible(value)) => *value <= target,
        }
    }

    /// The numeric sentinel for infeasibility: `-inf` when maximizing,
    /// `+inf` when minimizing.
    #[inline]
    pub fn worst_value(self) -> f64 {
        match self {
            Objective::Maximize => f64::NEG_INFINITY,
            Objective::Minimize => f64::INFINITY,
        }
    }

    /// Builds a score from a raw value, treating NaN and this direction's
    /// sentinel infinity as infeasible.
    pub fn score(self, raw: f64) -> Score {
        if raw.is_nan() || raw == self.worst_value() {
            Score::Infeasible
        } else {
            Score::Feasible(raw)
        }
    }

    /// Numeric view of a score; infeasible maps to [`worst_value`](Self::worst_value).
    pub fn value_of(self, score: &Score) -> f64 {
        score.value().unwrap_or_else(|| self.worst_value())
    }

    /// Returns the better of two scores, preferring `a` on ties.
    pub fn best<'a>(self, a: &'a Score, b: &'a Score) -> &'a Score {
        if self.is_better(b, a) {
            b
        } else {
            a
        }
    }
}
