use std::fmt::Display;

use log::trace;
use rand::{seq::SliceRandom, Rng, RngCore};
use wordly::{score::EntropyScorer, Context, Strategy};

use crate::util::{sample_neighbors, Explored, Walk, LOCAL_SEARCH_OPENERS};

/// A local search on entropy that sometimes accepts worse words.
///
/// Each round it picks one random neighbor from a sampled batch. A better
/// neighbor is always accepted; a worse one with probability `exp(Δ/T)`,
/// where `Δ` is the drop in score and `T` the temperature. The temperature
/// is multiplied by the cooling rate every round, and the search ends once
/// it falls to the minimum or the round limit is hit. The best word seen at
/// any point is returned, not the word the search ended on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedAnnealing {
    scorer: EntropyScorer,
    temperature: f64,
    cooling_rate: f64,
    min_temperature: f64,
    max_iterations: usize,
    neighbors: usize,
    start_window: usize,
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        SimulatedAnnealing {
            scorer: EntropyScorer::new(),
            temperature: 100.0,
            cooling_rate: 0.85,
            min_temperature: 1.0,
            max_iterations: 50,
            neighbors: 20,
            start_window: 10,
        }
    }
}

impl SimulatedAnnealing {
    /// Creates a new strategy.
    ///
    /// Defaults:
    /// 1. starting temperature 100
    /// 2. cooling rate 0.85
    /// 3. minimum temperature 1
    /// 4. at most 50 rounds
    /// 5. batches of up to 20 neighbors
    /// 6. starting from one of the first 10 candidates
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting temperature.
    pub fn temperature(self, temperature: f64) -> Self {
        SimulatedAnnealing {
            temperature,
            ..self
        }
    }

    /// Sets the factor applied to the temperature each round.
    pub fn cooling_rate(self, cooling_rate: f64) -> Self {
        SimulatedAnnealing {
            cooling_rate,
            ..self
        }
    }

    /// Sets the temperature at which the search stops.
    pub fn min_temperature(self, min_temperature: f64) -> Self {
        SimulatedAnnealing {
            min_temperature,
            ..self
        }
    }

    /// Sets the most rounds the search runs.
    pub fn max_iterations(self, max_iterations: usize) -> Self {
        SimulatedAnnealing {
            max_iterations,
            ..self
        }
    }

    /// Sets how many neighbors are sampled each round.
    pub fn neighbors(self, neighbors: usize) -> Self {
        SimulatedAnnealing { neighbors, ..self }
    }

    /// Sets how many leading candidates the start is drawn from.
    pub fn start_window(self, start_window: usize) -> Self {
        SimulatedAnnealing {
            start_window: start_window.max(1),
            ..self
        }
    }
}

impl SimulatedAnnealing {
    /// Runs the search, recording every accepted move.
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
        let (mut best, mut best_score) = (current, current_score);
        let mut path = vec![current];

        let mut temperature = self.temperature;
        let mut rounds = 0;
        while temperature > self.min_temperature && rounds < self.max_iterations {
            rounds += 1;

            let neighbors = sample_neighbors(candidates, current, self.neighbors, rng);
            let neighbor = match neighbors.choose(&mut *rng) {
                Some(&n) => n,
                None => break,
            };
            let score = explored.score(neighbor);

            let delta = score - current_score;
            let acceptance = if delta > 0.0 {
                1.0
            } else {
                (delta / temperature).exp()
            };
            if rng.gen::<f64>() < acceptance {
                current = neighbor;
                current_score = score;
                path.push(current);
                if current_score > best_score {
                    best = current;
                    best_score = current_score;
                    trace!("{} found {} ({:.3})", self, ctx.corpus()[best], best_score);
                }
            }

            temperature *= self.cooling_rate;
        }

        trace!("{} cooled to {:.2}", self, temperature);
        Walk { best, path, rounds }
    }
}

impl Strategy for SimulatedAnnealing {
    fn rank(&self, ctx: &Context, candidates: &[usize], rng: &mut dyn RngCore) -> Vec<usize> {
        let mut explored = Explored::new(ctx, candidates, self.scorer);
        let walk = self.walk(ctx, &mut explored, candidates, rng);

        trace!(
            "{} stopped after {} rounds and {} moves",
            self,
            walk.rounds,
            walk.moves()
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

impl Display for SimulatedAnnealing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordly_strategies::SimulatedAnnealing")
    }
}
