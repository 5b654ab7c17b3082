use std::fmt::Display;

use rand::RngCore;
use wordly::{
    score::{rank, FrequencyScorer},
    Context, Strategy,
};

/// A strategy that guesses the candidate built from the most common letters
/// at each position.
///
/// Cheaper than [`Entropy`](crate::Entropy), since it only counts letters
/// once per round instead of grading every pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frequency {
    scorer: FrequencyScorer,
}

impl Frequency {
    /// Creates a new strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the penalty per repeated letter.
    pub fn penalty(self, penalty: f64) -> Self {
        Frequency {
            scorer: self.scorer.penalty(penalty),
        }
    }
}

impl Strategy for Frequency {
    fn rank(&self, ctx: &Context, candidates: &[usize], _rng: &mut dyn RngCore) -> Vec<usize> {
        if candidates.len() <= 2 {
            return candidates.to_vec();
        }

        let scores = self.scorer.score_all(ctx, candidates, candidates);
        rank(candidates, &scores)
    }

    fn openers(&self) -> &[&'static str] {
        &["TARES"]
    }

    fn version(&self) -> &'static str {
        "1.0.0"
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordly_strategies::Frequency")
    }
}
