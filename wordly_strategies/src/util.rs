//! Helpers shared by the strategies.

use std::collections::HashMap;

use itertools::Itertools;
use rand::{seq::SliceRandom, RngCore};
use wordly::{score::EntropyScorer, Context, Word};

/// Openers for the local search strategies, in order of preference.
pub const LOCAL_SEARCH_OPENERS: [&str; 5] = ["AROSE", "SLATE", "CRATE", "TRACE", "STARE"];

/// Counts, for each letter, how many candidates contain it at least once.
pub fn letter_coverage(ctx: &Context, candidates: &[usize]) -> [u32; 26] {
    let mut counts = [0; 26];

    candidates
        .iter()
        .flat_map(|&t| ctx.corpus()[t].as_bytes().iter().copied().unique())
        .for_each(|c| counts[(c - b'A') as usize] += 1);

    counts
}

/// Sums the coverage of each distinct letter in `word`.
///
/// # Examples
///
/// ```rust
/// use wordly::Word;
/// use wordly_strategies::util::coverage_score;
///
/// let mut coverage = [0; 26];
/// coverage[(b'E' - b'A') as usize] = 4;
/// coverage[(b'R' - b'A') as usize] = 1;
///
/// // the second E counts only once
/// assert_eq!(coverage_score(&"EERIE".parse::<Word>()?, &coverage), 5);
/// #
/// # Ok::<_, wordly::SolverError>(())
/// ```
pub fn coverage_score(word: &Word, coverage: &[u32; 26]) -> u32 {
    word.as_bytes()
        .iter()
        .unique()
        .map(|&c| coverage[(c - b'A') as usize])
        .sum()
}

/// Draws up to `size` candidates other than `current`, in random order.
pub fn sample_neighbors(
    candidates: &[usize],
    current: usize,
    size: usize,
    rng: &mut dyn RngCore,
) -> Vec<usize> {
    let mut neighbors = candidates.to_vec();
    neighbors.shuffle(rng);
    neighbors.truncate(size);
    neighbors.retain(|&i| i != current);
    neighbors
}

/// The course of one local search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Walk {
    /// The best word found.
    pub(crate) best: usize,
    /// Every word the search stood on, the start first.
    pub(crate) path: Vec<usize>,
    /// How many rounds ran.
    pub(crate) rounds: usize,
}

impl Walk {
    /// Returns how many times the search moved.
    pub(crate) fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Every word a local search has scored, with its score.
///
/// Each word is scored at most once per search.
#[derive(Debug)]
pub struct Explored<'a> {
    ctx: &'a Context,
    candidates: &'a [usize],
    scorer: EntropyScorer,
    scores: HashMap<usize, f64>,
    order: Vec<usize>,
}

impl<'a> Explored<'a> {
    /// Starts an empty record of a search over `candidates`.
    pub fn new(ctx: &'a Context, candidates: &'a [usize], scorer: EntropyScorer) -> Self {
        Explored {
            ctx,
            candidates,
            scorer,
            scores: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Returns the score of `guess`, computing it on first use.
    pub fn score(&mut self, guess: usize) -> f64 {
        if let Some(&score) = self.scores.get(&guess) {
            return score;
        }
        let score = self.scorer.score(self.ctx, guess, self.candidates);
        self.scores.insert(guess, score);
        self.order.push(guess);
        score
    }

    /// Returns how many distinct words were scored.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Puts `best` first, then every other scored word by score, best
    /// first. Ties keep the order in which words were first scored.
    pub fn into_ranking(self, best: usize) -> Vec<usize> {
        let scores = self.scores;
        let rest = self
            .order
            .into_iter()
            .filter(|&i| i != best)
            .sorted_by(|a, b| {
                scores[b]
                    .partial_cmp(&scores[a])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        std::iter::once(best).chain(rest).collect()
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};
    use wordly::Corpus;

    use super::*;

    fn ctx() -> Context {
        Context::new(Corpus::new(["CRATE", "TRACE", "SLATE", "GRAZE", "EERIE", "BUMPY"]).unwrap())
    }

    #[test]
    fn coverage_counts_each_word_once_per_letter() {
        let ctx = ctx();
        let coverage = letter_coverage(&ctx, &[0, 4]);
        // CRATE has one E, EERIE has three
        assert_eq!(coverage[(b'E' - b'A') as usize], 2);
        assert_eq!(coverage[(b'R' - b'A') as usize], 2);
        assert_eq!(coverage[(b'C' - b'A') as usize], 1);
        assert_eq!(coverage[(b'Z' - b'A') as usize], 0);
    }

    #[test]
    fn neighbors_exclude_the_current_word() {
        let mut rng = StdRng::seed_from_u64(5);
        let candidates = [0, 1, 2, 3, 4, 5];
        for _ in 0..20 {
            let neighbors = sample_neighbors(&candidates, 2, 6, &mut rng);
            assert_eq!(neighbors.len(), 5);
            assert!(!neighbors.contains(&2));
        }
        assert!(sample_neighbors(&candidates, 0, 3, &mut rng).len() <= 3);
    }

    #[test]
    fn explored_ranks_best_first() {
        let ctx = ctx();
        let candidates = [0, 1, 2, 3];
        let mut explored = Explored::new(&ctx, &candidates, EntropyScorer::new());

        for guess in [5, 0, 5, 2] {
            explored.score(guess);
        }
        assert_eq!(explored.len(), 3);

        // BUMPY splits nothing, so it ranks after the others
        let ranking = explored.into_ranking(2);
        assert_eq!(ranking[0], 2);
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[2], 5);
    }
}
