//! The simplest possible strategy, to show how they are written.

use std::fmt::Display;

use rand::{seq::SliceRandom, RngCore};

use crate::{
    context::Context,
    strategy::{Strategy, Thought},
};

/// A strategy that guesses any word still consistent with the history.
///
/// This exists to show how [`Strategy`](super::Strategy) is implemented and
/// as a baseline to compare smarter strategies against. It has no opener:
/// the first guess is drawn from the whole corpus. For better strategies,
/// check out the `wordly_strategies` crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Random;

impl Strategy for Random {
    fn rank(&self, _ctx: &Context, candidates: &[usize], rng: &mut dyn RngCore) -> Vec<usize> {
        let mut ranked = candidates.to_vec();
        ranked.shuffle(rng);
        ranked
    }

    fn thoughts(&self, ctx: &Context, candidates: &[usize], ranked: &[usize]) -> Vec<Thought> {
        ranked
            .first()
            .map(|&pick| {
                Thought::new(format!(
                    "Selected {} at random from {} candidates.",
                    ctx.corpus()[pick],
                    candidates.len()
                ))
            })
            .into_iter()
            .collect()
    }

    fn version(&self) -> &'static str {
        "1.0.0"
    }
}

impl Display for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordly::Random")
    }
}
