//! Bounded scalar fixtures.

use climber_core::Score;

/// A scalar in `[lower, upper]` scored by closeness to `peak`.
///
/// When `peak` lies outside the bound the best reachable value is the
/// nearest bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedOffset {
    pub lower: f64,
    pub upper: f64,
    pub peak: f64,
}

impl BoundedOffset {
    pub fn new(lower: f64, upper: f64, peak: f64) -> Self {
        Self { lower, upper, peak }
    }

    /// Negated squared distance to the peak. Maximize.
    pub fn closeness(x: &f64, offset: &BoundedOffset) -> Score {
        Score::of(-(x - offset.peak).powi(2))
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.lower..=self.upper).contains(&x)
    }
}
