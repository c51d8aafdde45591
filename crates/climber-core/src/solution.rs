//! Solution shapes used by problem adapters.
//!
//! The engine is generic over any `Clone + PartialEq` solution and never
//! inspects its shape. The types here are the shapes the bundled adapters
//! need; each keeps its own validity invariant so that neighborhoods built on
//! top of them cannot leave the valid domain.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// A fixed-length selection of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVector {
    bits: Vec<bool>,
}

impl BitVector {
    /// Creates a vector of `len` cleared bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Creates a vector where every bit is drawn uniformly.
    pub fn random(len: usize, rng: &mut dyn RngCore) -> Self {
        Self {
            bits: (0..len).map(|_| rng.random_bool(0.5)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Flips the bit at `index`. The length never changes.
    pub fn flip(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Indices of set bits, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &bit)| bit.then_some(i))
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }
}

/// An ordering of `0..n` with every index present exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Permutation {
    order: Vec<usize>,
}

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// Creates a uniformly shuffled permutation of `0..len`.
    pub fn shuffled(len: usize, rng: &mut dyn RngCore) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);
        Self { order }
    }

    /// Wraps `order` if it is a permutation of `0..order.len()`.
    pub fn from_order(order: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; order.len()];
        for &index in &order {
            if index >= order.len() || seen[index] {
                return None;
            }
            seen[index] = true;
        }
        Some(Self { order })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Exchanges two positions. Stays a permutation.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.order.swap(a, b);
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Consecutive pairs including the closing edge back to the start.
    pub fn closed_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        (0..n).map(move |i| (self.order[i], self.order[(i + 1) % n]))
    }
}

/// A mapping from item index to an optional value index.
///
/// `None` is the "unassigned" sentinel an adapter uses when no valid value
/// exists for an item. Such items stay fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Assignment {
    values: Vec<Option<usize>>,
}

impl Assignment {
    pub fn new(values: Vec<Option<usize>>) -> Self {
        Self { values }
    }

    /// Creates a fully assigned mapping.
    pub fn assigned(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, item: usize) -> Option<usize> {
        self.values[item]
    }

    pub fn assign(&mut self, item: usize, value: usize) {
        self.values[item] = Some(value);
    }

    /// Exchanges the values of two items.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.values
    }

    /// Number of items left at the unassigned sentinel.
    pub fn unassigned_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// `(item, value)` pairs of assigned items.
    pub fn iter_assigned(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(item, value)| value.map(|v| (item, v)))
    }
}

/// A small vector of numeric parameters, e.g. hyperparameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamTuple {
    values: Vec<f64>,
}

impl ParamTuple {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn set(&mut self, index: usize, value: f64) {
        self.values[index] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Closed set of solution shapes, used where a run's outcome must be handled
/// without knowing the adapter's concrete type (JSON output, logs).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "snake_case"))]
pub enum Genotype {
    Scalar(f64),
    Permutation(Vec<usize>),
    BitVector(Vec<bool>),
    Assignment(Vec<Option<usize>>),
    ParamTuple(Vec<f64>),
}

impl From<f64> for Genotype {
    fn from(value: f64) -> Self {
        Genotype::Scalar(value)
    }
}

impl From<Permutation> for Genotype {
    fn from(value: Permutation) -> Self {
        Genotype::Permutation(value.order)
    }
}

impl From<BitVector> for Genotype {
    fn from(value: BitVector) -> Self {
        Genotype::BitVector(value.bits)
    }
}

impl From<Assignment> for Genotype {
    fn from(value: Assignment) -> Self {
        Genotype::Assignment(value.values)
    }
}

impl From<ParamTuple> for Genotype {
    fn from(value: ParamTuple) -> Self {
        Genotype::ParamTuple(value.values)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_bit_vector_flip_keeps_length() {
        let mut bits = BitVector::zeros(3);
        bits.flip(2);
        assert_eq!(bits.len(), 3);
        assert_eq!(bits.selected().collect::<Vec<_>>(), vec![2]);
        bits.flip(2);
        assert_eq!(bits.count_ones(), 0);
    }

    #[test]
    fn test_permutation_validation() {
        assert!(Permutation::from_order(vec![2, 0, 1]).is_some());
        assert!(Permutation::from_order(vec![0, 0, 1]).is_none());
        assert!(Permutation::from_order(vec![0, 3, 1]).is_none());
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let perm = Permutation::shuffled(10, &mut rng);
        assert!(Permutation::from_order(perm.as_slice().to_vec()).is_some());
    }

    #[test]
    fn test_closed_edges() {
        let perm = Permutation::identity(3);
        let edges: Vec<_> = perm.closed_edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_assignment_unassigned_count() {
        let mut assignment = Assignment::new(vec![Some(1), None, Some(3)]);
        assert_eq!(assignment.unassigned_count(), 1);
        assignment.assign(1, 4);
        assert_eq!(assignment.unassigned_count(), 0);
        assert_eq!(
            assignment.iter_assigned().collect::<Vec<_>>(),
            vec![(0, 1), (1, 4), (2, 3)]
        );
    }

    #[test]
    fn test_genotype_conversions() {
        assert_eq!(Genotype::from(1.5), Genotype::Scalar(1.5));
        assert_eq!(
            Genotype::from(BitVector::from_bits(vec![true, false])),
            Genotype::BitVector(vec![true, false])
        );
        assert_eq!(
            Genotype::from(Assignment::new(vec![None])),
            Genotype::Assignment(vec![None])
        );
    }
}
