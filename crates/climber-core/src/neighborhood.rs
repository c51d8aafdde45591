//! Neighbor generation contracts.
//!
//! A [`NeighborGenerator`] proposes one randomized local perturbation of a
//! solution. A [`Neighborhood`] yields the full candidate set of one engine
//! iteration: a single proposal, several sampled proposals, or a fixed
//! directional set. Neither may mutate the incumbent; both return owned
//! candidates.

use rand::RngCore;
use smallvec::SmallVec;

/// Candidate solutions produced for one iteration.
///
/// Most neighborhoods yield one or two candidates, which stay inline.
pub type Candidates<S> = SmallVec<[S; 2]>;

/// Proposes a single neighbor of `current`.
///
/// The result must stay inside the solution's validity domain. Returning
/// `current` unchanged is allowed; the engine counts such iterations as
/// degenerate instead of failing.
///
/// # Examples
///
/// ```
/// use climber_core::NeighborGenerator;
/// use rand::RngCore;
///
/// let nudge = |x: &i64, step: &i64, _: &mut dyn RngCore| x + step;
/// let mut rng = rand::rng();
///
/// assert_eq!(nudge.propose(&4, &3, &mut rng), 7);
/// ```
pub trait NeighborGenerator<S, C: ?Sized> {
    fn propose(&self, current: &S, context: &C, rng: &mut dyn RngCore) -> S;
}

impl<S, C: ?Sized, F> NeighborGenerator<S, C> for F
where
    F: Fn(&S, &C, &mut dyn RngCore) -> S,
{
    #[inline]
    fn propose(&self, current: &S, context: &C, rng: &mut dyn RngCore) -> S {
        self(current, context, rng)
    }
}

/// Yields the candidates the engine scores in one iteration, in order.
///
/// Candidate order matters: under first improvement the earliest strict
/// improvement wins, and under best-of-step the earliest wins ties.
pub trait Neighborhood<S, C: ?Sized> {
    fn candidates(&self, current: &S, context: &C, rng: &mut dyn RngCore) -> Candidates<S>;
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use smallvec::smallvec;

    use super::*;

    struct Both;

    impl Neighborhood<i32, ()> for Both {
        fn candidates(&self, current: &i32, _: &(), _: &mut dyn RngCore) -> Candidates<i32> {
            smallvec![current - 1, current + 1]
        }
    }

    #[test]
    fn test_closure_generator_uses_rng() {
        let jitter = |x: &u32, bound: &u32, rng: &mut dyn RngCore| x + rng.random_range(0..*bound);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let next = jitter.propose(&10, &5, &mut rng);
            assert!((10..15).contains(&next));
        }
    }

    #[test]
    fn test_neighborhood_keeps_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let candidates = Both.candidates(&0, &(), &mut rng);
        assert_eq!(candidates.as_slice(), &[-1, 1]);
        assert!(!candidates.spilled());
    }
}
