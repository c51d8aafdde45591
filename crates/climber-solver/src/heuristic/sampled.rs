//! Generator-backed neighborhoods.

use climber_core::{Candidates, NeighborGenerator, Neighborhood};
use rand::RngCore;

/// One proposal per iteration from a generator.
///
/// # Examples
///
/// ```
/// use climber_core::Neighborhood;
/// use climber_solver::Single;
/// use rand::RngCore;
///
/// let double = Single(|x: &u32, _: &(), _: &mut dyn RngCore| x * 2);
/// let mut rng = rand::rng();
/// assert_eq!(double.candidates(&3, &(), &mut rng).as_slice(), &[6]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Single<G>(pub G);

impl<S, C: ?Sized, G> Neighborhood<S, C> for Single<G>
where
    G: NeighborGenerator<S, C>,
{
    fn candidates(&self, current: &S, context: &C, rng: &mut dyn RngCore) -> Candidates<S> {
        let mut candidates = Candidates::new();
        candidates.push(self.0.propose(current, context, rng));
        candidates
    }
}

/// `count` independent proposals per iteration from a generator.
#[derive(Debug, Clone, Copy)]
pub struct Sampled<G> {
    generator: G,
    count: usize,
}

impl<G> Sampled<G> {
    pub fn new(generator: G, count: usize) -> Self {
        Self { generator, count }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl<S, C: ?Sized, G> Neighborhood<S, C> for Sampled<G>
where
    G: NeighborGenerator<S, C>,
{
    fn candidates(&self, current: &S, context: &C, rng: &mut dyn RngCore) -> Candidates<S> {
        (0..self.count)
            .map(|_| self.generator.propose(current, context, rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_sampled_yields_count_proposals() {
        let jitter = |x: &i64, _: &(), rng: &mut dyn RngCore| x + rng.random_range(1..=3);
        let sampled = Sampled::new(jitter, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let candidates = sampled.candidates(&10, &(), &mut rng);
        assert_eq!(candidates.len(), 5);
        assert!(candidates.iter().all(|x| (11..=13).contains(x)));
    }

    #[test]
    fn test_sampled_zero_count_is_empty() {
        let sampled = Sampled::new(|x: &i64, _: &(), _: &mut dyn RngCore| *x, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(sampled.candidates(&1, &(), &mut rng).is_empty());
    }
}
