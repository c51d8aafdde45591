//! Reusable neighborhoods for the bundled solution shapes.
//!
//! Generators ([`BitFlip`], [`PairSwap`]) propose one random perturbation
//! and are also one-candidate neighborhoods. [`Single`] and [`Sampled`] turn
//! any generator, closures included, into a neighborhood. [`OffsetSteps`] is
//! a deterministic directional neighborhood for bounded scalars.

mod bit_flip;
mod offset;
mod pair_swap;
mod sampled;

pub use bit_flip::BitFlip;
pub use offset::OffsetSteps;
pub use pair_swap::PairSwap;
pub use sampled::{Sampled, Single};
