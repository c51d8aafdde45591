//! Closed-tour fixtures.

use climber_core::{Permutation, Score};

/// Symmetric distances between labelled nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    pub distances: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Three nodes with `AB = 1`, `BC = 1`, `AC = 10`. Every closed tour
    /// has length 12.
    pub fn triangle() -> Self {
        Self {
            distances: vec![
                vec![0.0, 1.0, 10.0],
                vec![1.0, 0.0, 1.0],
                vec![10.0, 1.0, 0.0],
            ],
        }
    }

    /// Points on a line at `0, 1, ..., n-1`. The shortest closed tour has
    /// length `2 * (n - 1)`.
    pub fn line(n: usize) -> Self {
        let distances = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        Self { distances }
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Closed tour length. Minimize.
    pub fn tour_length(tour: &Permutation, matrix: &DistanceMatrix) -> Score {
        Score::of(
            tour.closed_edges()
                .map(|(a, b)| matrix.distances[a][b])
                .sum(),
        )
    }
}
