use std::fmt::Display;

use log::trace;
use rand::{Rng, RngCore};
use wordly::{score::EntropyScorer, Context, Strategy};

use crate::util::{sample_neighbors, Explored, Walk, LOCAL_SEARCH_OPENERS};

/// A first-improvement local search on entropy.
///
/// It starts from one of the first few candidates and repeatedly samples a
/// batch of other candidates, moving to the first one that scores strictly
/// better. It stops at a batch with no improvement or after
/// [`max_iterations`](HillClimbing::max_iterations) rounds, so the result
/// may be a local optimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillClimbing {
    scorer: EntropyScorer,
    max_iterations: usize,
    neighbors: usize,
    start_window: usize,
}

impl Default for HillClimbing {
    fn default() -> Self {
        HillClimbing {
            scorer: EntropyScorer::new(),
            max_iterations: 20,
            neighbors: 30,
            start_window: 10,
        }
    }
}

impl HillClimbing {
    /// Creates a new strategy: 20 rounds of up to 30 neighbors, starting
    /// from one of the first 10 candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the most rounds the search runs.
    pub fn max_iterations(self, max_iterations: usize) -> Self {
        HillClimbing {
            max_iterations,
            ..self
        }
    }

    /// Sets how many neighbors are sampled each round.
    pub fn neighbors(self, neighbors: usize) -> Self {
        HillClimbing { neighbors, ..self }
    }

    /// Sets how many leading candidates the start is drawn from.
    pub fn start_window(self, start_window: usize) -> Self {
        HillClimbing {
            start_window: start_window.max(1),
            ..self
        }
    }
}

impl HillClimbing {
    /// Runs the search, recording every move.
    pub(crate) fn walk(
        &self,
        ctx: &Context,
        explored: &mut Explored<'_>,
        candidates: &[usize],
        rng: &mut dyn RngCore,
    ) -> Walk {
        let start = rng.gen_range(0..self.start_window.min(candidates.len()));
        let mut current = candidates[start];
        let mut current_score = explored.score(current);
        let mut path = vec![current];

        let mut improved = true;
        let mut rounds = 0;
        while improved && rounds < self.max_iterations {
            improved = false;
            rounds += 1;

            let size = self.neighbors.min(candidates.len());
            for neighbor in sample_neighbors(candidates, current, size, rng) {
                let score = explored.score(neighbor);
                if score > current_score {
                    trace!("{} moved to {} ({:.3})", self, ctx.corpus()[neighbor], score);
                    current = neighbor;
                    current_score = score;
                    path.push(current);
                    improved = true;
                    break;
                }
            }
        }

        Walk {
            best: current,
            path,
            rounds,
        }
    }
}

impl Strategy for HillClimbing {
    fn rank(&self, ctx: &Context, candidates: &[usize], rng: &mut dyn RngCore) -> Vec<usize> {
        let mut explored = Explored::new(ctx, candidates, self.scorer);
        let walk = self.walk(ctx, &mut explored, candidates, rng);

        trace!(
            "{} stopped after {} rounds and {} moves, having scored {} words",
            self,
            walk.rounds,
            walk.moves(),
            explored.len()
        );
        explored.into_ranking(walk.best)
    }

    fn openers(&self) -> &[&'static str] {
        &LOCAL_SEARCH_OPENERS
    }

    fn version(&self) -> &'static str {
        "1.0.0"
    }
}

impl Display for HillClimbing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordly_strategies::HillClimbing")
    }
}
