//! Some strategies for use with `wordly`.
//!
//! Each strategy consists of a single struct, and everything you need to
//! configure the strategy should exist as a method.

mod entropy;
pub use entropy::Entropy;

mod frequency;
pub use frequency::Frequency;

mod beam;
pub use beam::Beam;

mod dfs;
pub use dfs::Dfs;

mod hill_climbing;
pub use hill_climbing::HillClimbing;

mod annealing;
pub use annealing::SimulatedAnnealing;

#[cfg(test)]
mod test;
