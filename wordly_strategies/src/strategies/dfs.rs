use std::fmt::Display;

use rand::RngCore;
use wordly::{
    score::{rank, LetterPositionScorer, PositionCounts},
    Context, Strategy,
};

use crate::util::LOCAL_SEARCH_OPENERS;

/// A greedy strategy that only looks at the first few candidates.
///
/// Letter counts are taken over every candidate, but only the first
/// [`search_limit`](Dfs::search_limit) candidates, in corpus order, are
/// scored with [`LetterPositionScorer`]. Ties go to the earlier word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dfs {
    scorer: LetterPositionScorer,
    limit: usize,
}

impl Default for Dfs {
    fn default() -> Self {
        Dfs {
            scorer: LetterPositionScorer::new(),
            limit: 100,
        }
    }
}

impl Dfs {
    /// Creates a new strategy that scores up to 100 candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many candidates are scored. At least one always is.
    pub fn search_limit(self, limit: usize) -> Self {
        Dfs {
            limit: limit.max(1),
            ..self
        }
    }
}

impl Strategy for Dfs {
    fn rank(&self, ctx: &Context, candidates: &[usize], _rng: &mut dyn RngCore) -> Vec<usize> {
        let space = &candidates[..candidates.len().min(self.limit)];
        let counts = PositionCounts::new(ctx, candidates);
        let scores: Vec<f64> = space
            .iter()
            .map(|&g| self.scorer.score(&ctx.corpus()[g], &counts))
            .collect();
        rank(space, &scores)
    }

    fn openers(&self) -> &[&'static str] {
        &LOCAL_SEARCH_OPENERS
    }

    fn version(&self) -> &'static str {
        "1.0.0"
    }
}

impl Display for Dfs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordly_strategies::Dfs")
    }
}
