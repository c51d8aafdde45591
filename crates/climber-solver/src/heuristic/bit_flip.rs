//! Single bit flip.

use climber_core::{BitVector, Candidates, NeighborGenerator, Neighborhood};
use rand::{Rng, RngCore};
use smallvec::smallvec;

/// Flips one uniformly chosen bit. The vector length never changes.
///
/// An empty vector is returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitFlip;

impl<C: ?Sized> NeighborGenerator<BitVector, C> for BitFlip {
    fn propose(&self, current: &BitVector, _context: &C, rng: &mut dyn RngCore) -> BitVector {
        let mut next = current.clone();
        if !next.is_empty() {
            next.flip(rng.random_range(0..next.len()));
        }
        next
    }
}

impl<C: ?Sized> Neighborhood<BitVector, C> for BitFlip {
    fn candidates(
        &self,
        current: &BitVector,
        context: &C,
        rng: &mut dyn RngCore,
    ) -> Candidates<BitVector> {
        smallvec![self.propose(current, context, rng)]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_flips_exactly_one_bit() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let current = BitVector::zeros(16);
        for _ in 0..50 {
            let next = BitFlip.propose(&current, &(), &mut rng);
            assert_eq!(next.len(), 16);
            assert_eq!(next.count_ones(), 1);
        }
    }

    #[test]
    fn test_empty_vector_unchanged() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let empty = BitVector::zeros(0);
        assert_eq!(BitFlip.propose(&empty, &(), &mut rng), empty);
    }
}
