use std::fmt::Display;

use log::debug;
use rand::RngCore;
use wordly::{
    score::{rank, EntropyScorer},
    Context, Strategy,
};

/// A strategy that guesses the word whose feedback tells it the most.
///
/// Each round it ranks the remaining candidates by the entropy of the
/// feedback they would produce against the others. With
/// [`full_corpus()`](Entropy::full_corpus) it ranks every word in the corpus
/// instead: a word that cannot be the answer may still split the candidates
/// better. That variant scores N words per round rather than the candidate
/// count, so it is off by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entropy {
    scorer: EntropyScorer,
    full_corpus: bool,
}

impl Default for Entropy {
    fn default() -> Self {
        Entropy {
            scorer: EntropyScorer::new(),
            full_corpus: false,
        }
    }
}

impl Entropy {
    /// Creates a new strategy that ranks only candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranks every corpus word, not only the candidates.
    pub fn full_corpus(self) -> Self {
        Entropy {
            full_corpus: true,
            ..self
        }
    }

    /// Sets the penalty per repeated letter.
    pub fn penalty(self, penalty: f64) -> Self {
        Entropy {
            scorer: self.scorer.penalty(penalty),
            ..self
        }
    }
}

impl Strategy for Entropy {
    fn rank(&self, ctx: &Context, candidates: &[usize], _rng: &mut dyn RngCore) -> Vec<usize> {
        if candidates.len() <= 2 {
            return candidates.to_vec();
        }

        let guesses: Vec<usize> = if self.full_corpus {
            (0..ctx.corpus().len()).collect()
        } else {
            candidates.to_vec()
        };
        debug!(
            "{} scoring {} guesses against {} candidates",
            self,
            guesses.len(),
            candidates.len()
        );

        let scores = self.scorer.score_all(ctx, &guesses, candidates);
        rank(&guesses, &scores)
    }

    fn openers(&self) -> &[&'static str] {
        &["ROATE"]
    }

    fn version(&self) -> &'static str {
        "1.1.0"
    }
}

impl Display for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.full_corpus {
            write!(f, "wordly_strategies::Entropy (full corpus)")
        } else {
            write!(f, "wordly_strategies::Entropy")
        }
    }
}
