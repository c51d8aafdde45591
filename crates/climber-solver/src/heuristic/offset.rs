//! Directional steps for a bounded scalar.

use climber_core::error::Result;
use climber_core::{Candidates, ClimbError, Neighborhood};
use rand::RngCore;

/// Candidates `x - step` then `x + step`, dropping any outside
/// `[lower, upper]`.
///
/// The neighborhood is deterministic; the rng is ignored.
///
/// # Examples
///
/// ```
/// use climber_core::Neighborhood;
/// use climber_solver::OffsetSteps;
///
/// let steps = OffsetSteps::new(0.5, -5.0, 5.0).unwrap();
/// let mut rng = rand::rng();
///
/// assert_eq!(steps.candidates(&0.0, &(), &mut rng).as_slice(), &[-0.5, 0.5]);
/// assert_eq!(steps.candidates(&5.0, &(), &mut rng).as_slice(), &[4.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSteps {
    step: f64,
    lower: f64,
    upper: f64,
}

impl OffsetSteps {
    /// Creates the neighborhood, rejecting a non-positive step or an empty
    /// bound.
    pub fn new(step: f64, lower: f64, upper: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(ClimbError::InvalidConfiguration(format!(
                "offset step must be finite and positive, got {}",
                step
            )));
        }
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(ClimbError::InvalidConfiguration(format!(
                "offset bound [{}, {}] is empty",
                lower, upper
            )));
        }
        Ok(Self { step, lower, upper })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}

impl<C: ?Sized> Neighborhood<f64, C> for OffsetSteps {
    fn candidates(&self, current: &f64, _context: &C, _rng: &mut dyn RngCore) -> Candidates<f64> {
        [current - self.step, current + self.step]
            .into_iter()
            .filter(|x| (self.lower..=self.upper).contains(x))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(OffsetSteps::new(0.0, -1.0, 1.0).is_err());
        assert!(OffsetSteps::new(f64::NAN, -1.0, 1.0).is_err());
        assert!(OffsetSteps::new(0.5, 1.0, -1.0).is_err());
    }

    #[test]
    fn test_lower_edge() {
        let steps = OffsetSteps::new(0.5, -5.0, 5.0).unwrap();
        let mut rng = rand::rng();
        assert_eq!(steps.candidates(&-5.0, &(), &mut rng).as_slice(), &[-4.5]);
    }
}
