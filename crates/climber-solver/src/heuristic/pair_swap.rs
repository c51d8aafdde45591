//! Pair swap for permutations.

use climber_core::{Candidates, NeighborGenerator, Neighborhood, Permutation};
use rand::{Rng, RngCore};
use smallvec::smallvec;

/// Swaps two distinct, uniformly chosen positions.
///
/// The result is always a permutation. Permutations shorter than two are
/// returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairSwap;

impl<C: ?Sized> NeighborGenerator<Permutation, C> for PairSwap {
    fn propose(&self, current: &Permutation, _context: &C, rng: &mut dyn RngCore) -> Permutation {
        let mut next = current.clone();
        let n = next.len();
        if n >= 2 {
            let a = rng.random_range(0..n);
            let mut b = rng.random_range(0..n - 1);
            if b >= a {
                b += 1;
            }
            next.swap(a, b);
        }
        next
    }
}

impl<C: ?Sized> Neighborhood<Permutation, C> for PairSwap {
    fn candidates(
        &self,
        current: &Permutation,
        context: &C,
        rng: &mut dyn RngCore,
    ) -> Candidates<Permutation> {
        smallvec![self.propose(current, context, rng)]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let current = Permutation::identity(6);
        for _ in 0..50 {
            let next = PairSwap.propose(&current, &(), &mut rng);
            let moved = current
                .as_slice()
                .iter()
                .zip(next.as_slice())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(moved, 2);
            assert!(Permutation::from_order(next.as_slice().to_vec()).is_some());
        }
    }

    #[test]
    fn test_single_element_unchanged() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let single = Permutation::identity(1);
        assert_eq!(PairSwap.propose(&single, &(), &mut rng), single);
    }
}
