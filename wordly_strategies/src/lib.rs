#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod strategies;

pub mod registry;
pub mod util;

pub use registry::{Registry, Solver};
pub use strategies::*;
