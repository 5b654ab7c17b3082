use std::{cmp::Reverse, fmt::Display};

use itertools::Itertools;
use log::debug;
use rand::RngCore;
use wordly::{
    score::{rank, EntropyScorer},
    strategy::Thought,
    Context, Strategy,
};

use crate::util::{coverage_score, letter_coverage};

/// A two phase strategy: shortlist cheaply, then rank the shortlist well.
///
/// Phase one scores every corpus word by letter coverage: for each distinct
/// letter in the word, how many candidates contain that letter. The best
/// [`beam_width`](Beam::beam_width) words form the beam. Phase two ranks
/// only the beam by entropy against the candidates, which bounds the
/// expensive step no matter how large the corpus is.
///
/// The ranking never holds more than the beam width, and may suggest words
/// that are not candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beam {
    width: usize,
    scorer: EntropyScorer,
}

impl Default for Beam {
    fn default() -> Self {
        Beam {
            width: 50,
            scorer: EntropyScorer::new(),
        }
    }
}

impl Beam {
    /// Creates a new strategy with a beam of 50 words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the beam width. At least one word is always kept.
    pub fn beam_width(self, width: usize) -> Self {
        Beam {
            width: width.max(1),
            ..self
        }
    }

    /// Returns the beam width actually used for `ctx`.
    pub fn effective_width(&self, ctx: &Context) -> usize {
        self.width.min(ctx.corpus().len())
    }

    fn beam(&self, ctx: &Context, candidates: &[usize]) -> Vec<usize> {
        let coverage = letter_coverage(ctx, candidates);
        ctx.corpus()
            .iter()
            .enumerate()
            .sorted_by_key(|(_, word)| Reverse(coverage_score(word, &coverage)))
            .map(|(i, _)| i)
            .take(self.effective_width(ctx))
            .collect()
    }
}

impl Strategy for Beam {
    fn rank(&self, ctx: &Context, candidates: &[usize], _rng: &mut dyn RngCore) -> Vec<usize> {
        if candidates.len() <= 2 {
            return candidates.to_vec();
        }

        let beam = self.beam(ctx, candidates);
        debug!("{} kept {} of {} words", self, beam.len(), ctx.corpus().len());

        let scores = self.scorer.score_all(ctx, &beam, candidates);
        rank(&beam, &scores)
    }

    fn openers(&self) -> &[&'static str] {
        &["ROATE"]
    }

    fn thoughts(&self, ctx: &Context, candidates: &[usize], ranked: &[usize]) -> Vec<Thought> {
        if candidates.len() <= 2 {
            return Vec::new();
        }

        let width = self.effective_width(ctx);
        let mut thoughts = vec![Thought::scored(
            format!(
                "Phase 1 (frequency) reduced search to top {} of {} words.",
                width,
                ctx.corpus().len()
            ),
            width as f64,
        )];
        if !ranked.is_empty() {
            let top = ctx
                .words(&ranked[..ranked.len().min(3)])
                .iter()
                .join(", ");
            thoughts.push(Thought::new(format!("Phase 2 entropy favors: {}.", top)));
        }
        thoughts
    }

    fn version(&self) -> &'static str {
        "1.0.0"
    }
}

impl Display for Beam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordly_strategies::Beam({})", self.width)
    }
}
