//! Scoring guesses against a candidate set.
//!
//! [`EntropyScorer`] measures how evenly a guess splits the candidates by
//! feedback; [`FrequencyScorer`] rewards letters that are common at each
//! position among the candidates. Both subtract the same penalty for
//! repeated letters, so that ties lean towards guesses that test more
//! letters. [`LetterPositionScorer`] works on raw counts and has no penalty.

use std::cmp::Ordering;

use itertools::Itertools;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{context::Context, feedback::NUM_CODES, words::Word, WORD_LEN};

/// The amount subtracted from a score for each repeated letter in a guess.
pub const DUPLICATE_PENALTY: f64 = 0.1;

/// Returns the repeated letter penalty of `word`: `(5 - distinct) * penalty`.
pub fn duplicate_penalty(word: &Word, penalty: f64) -> f64 {
    (WORD_LEN - word.distinct_letters()) as f64 * penalty
}

/// Returns the Shannon entropy, in bits, of a histogram of `total` items.
///
/// Empty buckets contribute nothing, and an empty histogram has no entropy.
///
/// # Examples
///
/// ```rust
/// use wordly::score::entropy_from_counts;
///
/// assert_eq!(entropy_from_counts(&[3, 3, 3, 3], 12), 2.0);
/// assert_eq!(entropy_from_counts(&[5, 0], 5), 0.0);
/// ```
pub fn entropy_from_counts(counts: &[u32], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&k| k > 0)
        .map(|&k| {
            let p = k as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Counts how many candidates fall into each feedback code for `guess`.
pub fn code_histogram(ctx: &Context, guess: usize, candidates: &[usize]) -> [u32; NUM_CODES] {
    let mut counts = [0_u32; NUM_CODES];
    match ctx.table() {
        Some(table) => {
            let row = table.row(guess);
            for &t in candidates {
                counts[row[t] as usize] += 1;
            }
        }
        None => {
            for &t in candidates {
                counts[ctx.code(guess, t).value() as usize] += 1;
            }
        }
    }
    counts
}

/// Returns the raw entropy of the feedback `guess` would produce across
/// `candidates`, without any penalty.
pub fn entropy(ctx: &Context, guess: usize, candidates: &[usize]) -> f64 {
    entropy_from_counts(&code_histogram(ctx, guess, candidates), candidates.len())
}

/// Scores guesses by information gain.
///
/// The score is the entropy of the feedback distribution minus
/// [`duplicate_penalty()`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntropyScorer {
    penalty: f64,
}

impl Default for EntropyScorer {
    fn default() -> Self {
        EntropyScorer {
            penalty: DUPLICATE_PENALTY,
        }
    }
}

impl EntropyScorer {
    /// Creates a scorer with the default penalty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the penalty per repeated letter.
    pub fn penalty(self, penalty: f64) -> Self {
        EntropyScorer { penalty }
    }

    /// Scores one guess.
    pub fn score(&self, ctx: &Context, guess: usize, candidates: &[usize]) -> f64 {
        entropy(ctx, guess, candidates) - duplicate_penalty(&ctx.corpus()[guess], self.penalty)
    }

    /// Scores many guesses at once, one histogram per guess.
    ///
    /// The result lines up with `guesses`.
    pub fn score_all(&self, ctx: &Context, guesses: &[usize], candidates: &[usize]) -> Vec<f64> {
        map_scores(guesses, |g| self.score(ctx, g, candidates))
    }
}

/// Per position letter counts across a candidate set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionCounts {
    counts: [[u32; 26]; WORD_LEN],
    total: usize,
}

impl PositionCounts {
    /// Counts the letters at each position of `candidates`.
    pub fn new(ctx: &Context, candidates: &[usize]) -> Self {
        let mut counts = [[0_u32; 26]; WORD_LEN];
        for &t in candidates {
            for (position, &c) in ctx.corpus()[t].as_bytes().iter().enumerate() {
                counts[position][(c - b'A') as usize] += 1;
            }
        }
        PositionCounts {
            counts,
            total: candidates.len(),
        }
    }

    /// Returns how many candidates have `letter` at `position`.
    pub fn get(&self, position: usize, letter: u8) -> u32 {
        self.counts[position][(letter - b'A') as usize]
    }

    /// Returns how many times `letter` occurs across all candidates,
    /// counting repeats within a word.
    pub fn occurrences(&self, letter: u8) -> u32 {
        (0..WORD_LEN).map(|position| self.get(position, letter)).sum()
    }
}

/// Scores guesses by how common their letters are at each position.
///
/// The score sums, over positions, the fraction of candidates sharing the
/// guess's letter there. Each letter that repeats one already seen earlier
/// in the guess costs the penalty again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyScorer {
    penalty: f64,
}

impl Default for FrequencyScorer {
    fn default() -> Self {
        FrequencyScorer {
            penalty: DUPLICATE_PENALTY,
        }
    }
}

impl FrequencyScorer {
    /// Creates a scorer with the default penalty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the penalty per repeated letter.
    pub fn penalty(self, penalty: f64) -> Self {
        FrequencyScorer { penalty }
    }

    /// Scores `word` against precomputed counts.
    pub fn score(&self, word: &Word, counts: &PositionCounts) -> f64 {
        if counts.total == 0 {
            return 0.0;
        }

        let total = counts.total as f64;
        let mut seen = 0_u32;
        let mut score = 0.0;
        for (position, &c) in word.as_bytes().iter().enumerate() {
            score += counts.get(position, c) as f64 / total;

            let bit = 1 << (c - b'A');
            if seen & bit != 0 {
                score -= self.penalty;
            }
            seen |= bit;
        }
        score
    }

    /// Scores many guesses against the same candidate set.
    pub fn score_all(&self, ctx: &Context, guesses: &[usize], candidates: &[usize]) -> Vec<f64> {
        let counts = PositionCounts::new(ctx, candidates);
        map_scores(guesses, |g| self.score(&ctx.corpus()[g], &counts))
    }
}

/// Scores guesses by raw letter and position counts.
///
/// Each distinct letter of the guess adds how often it occurs across the
/// candidates, and each position adds twice the number of candidates with
/// the same letter there. Repeated letters are not penalized.
///
/// # Examples
///
/// ```rust
/// use wordly::{score::{LetterPositionScorer, PositionCounts}, Context, Corpus};
///
/// let ctx = Context::new(Corpus::new(["crate", "slate", "hello"])?);
/// let counts = PositionCounts::new(&ctx, &[0, 1, 2]);
///
/// let scorer = LetterPositionScorer::new();
/// assert_eq!(scorer.score(&ctx.corpus()[0], &counts), 25.0);
/// assert_eq!(scorer.score(&ctx.corpus()[1], &counts), 27.0);
/// #
/// # Ok::<_, wordly::SolverError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LetterPositionScorer;

impl LetterPositionScorer {
    /// Creates a scorer.
    pub fn new() -> Self {
        LetterPositionScorer
    }

    /// Scores `word` against precomputed counts.
    pub fn score(&self, word: &Word, counts: &PositionCounts) -> f64 {
        let letters: u32 = word
            .as_bytes()
            .iter()
            .unique()
            .map(|&c| counts.occurrences(c))
            .sum();
        let positions: u32 = word
            .as_bytes()
            .iter()
            .enumerate()
            .map(|(position, &c)| counts.get(position, c))
            .sum();
        (letters + 2 * positions) as f64
    }

    /// Scores many guesses against the same candidate set.
    pub fn score_all(&self, ctx: &Context, guesses: &[usize], candidates: &[usize]) -> Vec<f64> {
        let counts = PositionCounts::new(ctx, candidates);
        map_scores(guesses, |g| self.score(&ctx.corpus()[g], &counts))
    }
}

/// Orders `indices` by `scores` from best to worst.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank(indices: &[usize], scores: &[f64]) -> Vec<usize> {
    indices
        .iter()
        .zip(scores)
        .sorted_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(Ordering::Equal))
        .map(|(&i, _)| i)
        .collect()
}

#[cfg(feature = "parallel")]
fn map_scores<F>(guesses: &[usize], score: F) -> Vec<f64>
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    guesses.par_iter().map(|&g| score(g)).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_scores<F>(guesses: &[usize], score: F) -> Vec<f64>
where
    F: Fn(usize) -> f64,
{
    guesses.iter().map(|&g| score(g)).collect()
}
