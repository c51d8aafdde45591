//! Budgeted selection fixtures.

use climber_core::{BitVector, Candidates, Neighborhood, Score};
use rand::RngCore;

/// Items with a cost and a benefit, selected under a budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Knapsack {
    pub costs: Vec<f64>,
    pub benefits: Vec<f64>,
    pub budget: f64,
}

impl Knapsack {
    /// Three items of equal cost where only one fits: the optimum picks the
    /// most valuable one, item 2, for a benefit of 30.
    pub fn single_fit() -> Self {
        Self {
            costs: vec![5.0, 5.0, 5.0],
            benefits: vec![10.0, 20.0, 30.0],
            budget: 8.0,
        }
    }

    /// A larger instance for property tests.
    pub fn medium() -> Self {
        Self {
            costs: vec![12.0, 7.0, 11.0, 8.0, 9.0, 6.0, 5.0, 14.0],
            benefits: vec![24.0, 13.0, 23.0, 15.0, 16.0, 10.0, 9.0, 30.0],
            budget: 40.0,
        }
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Total benefit, or infeasible when the selection exceeds the budget.
    pub fn score(selection: &BitVector, knapsack: &Knapsack) -> Score {
        let cost: f64 = selection.selected().map(|i| knapsack.costs[i]).sum();
        if cost > knapsack.budget {
            return Score::Infeasible;
        }
        Score::of(selection.selected().map(|i| knapsack.benefits[i]).sum())
    }
}

/// Every single-bit flip, in index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllFlips;

impl<C: ?Sized> Neighborhood<BitVector, C> for AllFlips {
    fn candidates(
        &self,
        current: &BitVector,
        _context: &C,
        _rng: &mut dyn RngCore,
    ) -> Candidates<BitVector> {
        (0..current.len())
            .map(|i| {
                let mut next = current.clone();
                next.flip(i);
                next
            })
            .collect()
    }
}
