//! Looking up strategies by name and solving with them.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use log::debug;
use rand::RngCore;
use wordly::{
    strategy::{
        random::Random, solve_with_rng, GuessFeedback, SolveParameters, SolveResponse,
        StrategyKind,
    },
    Context, Strategy,
};

use crate::{Beam, Dfs, Entropy, Frequency, HillClimbing, SimulatedAnnealing};

/// Maps each [`StrategyKind`] to a shared strategy instance.
///
/// Instances are created with their default configuration the first time
/// they are asked for and reused after that. A configured instance can be
/// put in place with [`register()`](Registry::register).
#[derive(Debug, Default)]
pub struct Registry {
    cache: Mutex<HashMap<StrategyKind, Arc<dyn Strategy>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `strategy` whenever `kind` is asked for, replacing any instance
    /// already cached.
    pub fn register(&self, kind: StrategyKind, strategy: Arc<dyn Strategy>) {
        debug!("registering {} for {}", strategy, kind);
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, strategy);
    }

    /// Returns the instance for `kind`, creating it if needed.
    pub fn get(&self, kind: StrategyKind) -> Arc<dyn Strategy> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(kind).or_insert_with(|| {
            debug!("creating strategy for {}", kind);
            create(kind)
        }))
    }
}

/// Creates the default instance of the strategy behind `kind`.
pub fn create(kind: StrategyKind) -> Arc<dyn Strategy> {
    match kind {
        StrategyKind::Entropy => Arc::new(Entropy::new()),
        StrategyKind::BetterEntropy => Arc::new(Entropy::new().full_corpus()),
        StrategyKind::Frequency => Arc::new(Frequency::new()),
        StrategyKind::Random => Arc::new(Random),
        StrategyKind::Beam => Arc::new(Beam::new()),
        StrategyKind::Dfs => Arc::new(Dfs::new()),
        StrategyKind::HillClimbing => Arc::new(HillClimbing::new()),
        StrategyKind::SimulatedAnnealing => Arc::new(SimulatedAnnealing::new()),
    }
}

/// A loaded context together with the strategies that run on it.
///
/// A solver holds no per-game state, so one instance can answer any number
/// of independent requests, from any number of threads.
///
/// # Examples
///
/// ```rust
/// use wordly::{
///     strategy::{GuessFeedback, SolveParameters, StrategyKind},
///     Context, Corpus,
/// };
/// use wordly_strategies::Solver;
///
/// let solver = Solver::new(Context::with_table(Corpus::new(["roate", "slate", "plate", "crate"])?));
///
/// let opening = solver.solve(&[], &SolveParameters::new());
/// assert_eq!(opening.next_guess, Some("roate".parse()?));
///
/// let kind: StrategyKind = "frequency".parse()?;
/// let history = [GuessFeedback::new("roate", "00222")?];
/// let response = solver.solve(&history, &SolveParameters::new().with_strategy(kind));
/// assert_eq!(response.remaining_candidates, 2);
/// #
/// # Ok::<_, wordly::SolverError>(())
/// ```
#[derive(Debug)]
pub struct Solver {
    ctx: Context,
    registry: Registry,
}

impl Solver {
    /// Creates a solver with a fresh registry.
    pub fn new(ctx: Context) -> Self {
        Self::with_registry(ctx, Registry::new())
    }

    /// Creates a solver that uses `registry`.
    pub fn with_registry(ctx: Context, registry: Registry) -> Self {
        Solver { ctx, registry }
    }

    /// Returns the context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Recommends the next guess for `history` with the strategy named in
    /// `params`.
    pub fn solve(&self, history: &[GuessFeedback], params: &SolveParameters) -> SolveResponse {
        let mut rng = params.rng();
        self.solve_with_rng(history, params, &mut rng)
    }

    /// Like [`solve()`](Solver::solve), but with a caller supplied random
    /// source.
    pub fn solve_with_rng(
        &self,
        history: &[GuessFeedback],
        params: &SolveParameters,
        rng: &mut dyn RngCore,
    ) -> SolveResponse {
        let strategy = self.registry.get(params.strategy());
        solve_with_rng(&self.ctx, strategy.as_ref(), history, params, rng)
    }
}
