//! Tools for defining strategies, and the driver that runs them.

use std::{
    collections::HashSet,
    fmt::{Debug, Display},
    str::FromStr,
};

use log::debug;
use rand::{rngs::StdRng, RngCore, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    context::Context,
    feedback::Pattern,
    words::Word,
    Result, SolverError,
};

pub mod random;

/// The most suggestions a single response carries.
pub const MAX_SUGGESTIONS: usize = 5;

/// One turn of history: a guess and the feedback it received.
///
/// # Examples
///
/// ```rust
/// use wordly::strategy::GuessFeedback;
///
/// let turn = GuessFeedback::new("arose", "02000")?;
/// assert_eq!(turn.guess.to_string(), "AROSE");
///
/// assert!(GuessFeedback::new("arose", "0200").is_err());
/// assert!(GuessFeedback::new("arose", "02003").is_err());
/// assert!(GuessFeedback::new("aros", "02000").is_err());
/// #
/// # Ok::<_, wordly::SolverError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct GuessFeedback {
    /// The word that was guessed.
    pub guess: Word,

    /// The feedback the game gave for it.
    pub feedback: Pattern,
}

impl GuessFeedback {
    /// Validates and pairs a guess with its wire pattern.
    pub fn new(guess: &str, feedback: &str) -> Result<Self> {
        Ok(GuessFeedback {
            guess: guess.parse()?,
            feedback: feedback.parse()?,
        })
    }
}

impl Display for GuessFeedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.guess, self.feedback)
    }
}

/// The strategies a caller can ask for by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "snake_case")
)]
pub enum StrategyKind {
    /// Rank the candidates by entropy.
    Entropy,

    /// Rank the whole corpus by entropy against the candidates.
    BetterEntropy,

    /// Rank the candidates by positional letter frequency.
    Frequency,

    /// Sample candidates uniformly.
    Random,

    /// Shortlist by letter coverage, then rank the shortlist by entropy.
    Beam,

    /// Greedy frequency search over a bounded prefix of the candidates.
    Dfs,

    /// First-improvement local search on entropy.
    HillClimbing,

    /// Annealed local search on entropy.
    SimulatedAnnealing,
}

impl StrategyKind {
    /// Every strategy, in declaration order.
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::Entropy,
        StrategyKind::BetterEntropy,
        StrategyKind::Frequency,
        StrategyKind::Random,
        StrategyKind::Beam,
        StrategyKind::Dfs,
        StrategyKind::HillClimbing,
        StrategyKind::SimulatedAnnealing,
    ];

    /// Returns the identifier used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Entropy => "entropy",
            StrategyKind::BetterEntropy => "better_entropy",
            StrategyKind::Frequency => "frequency",
            StrategyKind::Random => "random",
            StrategyKind::Beam => "beam",
            StrategyKind::Dfs => "dfs",
            StrategyKind::HillClimbing => "hill_climbing",
            StrategyKind::SimulatedAnnealing => "simulated_annealing",
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::Entropy
    }
}

impl FromStr for StrategyKind {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| SolverError::UnknownStrategy(s.to_string()))
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Options for a single [`solve()`] call.
///
/// The configuration methods consume the existing parameters and return new
/// ones.
///
/// # Examples
///
/// ```rust
/// use wordly::strategy::{SolveParameters, StrategyKind};
///
/// let params = SolveParameters::new()
///     .with_max_suggestions(3)
///     .with_strategy(StrategyKind::Beam)
///     .with_seed(7);
/// assert_eq!(params.max_suggestions(), 3);
///
/// // clamped to the allowed range
/// let params = SolveParameters::new().with_max_suggestions(40);
/// assert_eq!(params.max_suggestions(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", default)
)]
pub struct SolveParameters {
    max_suggestions: usize,
    allow_repeats: bool,
    strategy: StrategyKind,
    seed: Option<u64>,
}

impl Default for SolveParameters {
    fn default() -> Self {
        SolveParameters {
            max_suggestions: 1,
            allow_repeats: false,
            strategy: StrategyKind::default(),
            seed: None,
        }
    }
}

impl SolveParameters {
    /// Creates parameters with the defaults.
    ///
    /// Defaults:
    /// 1. one suggestion
    /// 2. words already guessed are not suggested again
    /// 3. the [`StrategyKind::Entropy`] strategy
    /// 4. randomized strategies are seeded from the operating system
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many suggestions to return, between 1 and [`MAX_SUGGESTIONS`].
    pub fn with_max_suggestions(self, n: usize) -> Self {
        SolveParameters {
            max_suggestions: n.clamp(1, MAX_SUGGESTIONS),
            ..self
        }
    }

    /// Sets whether words already guessed may be suggested again.
    pub fn with_allow_repeats(self, allow: bool) -> Self {
        SolveParameters {
            allow_repeats: allow,
            ..self
        }
    }

    /// Chooses the strategy.
    pub fn with_strategy(self, strategy: StrategyKind) -> Self {
        SolveParameters { strategy, ..self }
    }

    /// Seeds the random source handed to the strategy.
    pub fn with_seed(self, seed: u64) -> Self {
        SolveParameters {
            seed: Some(seed),
            ..self
        }
    }

    /// Returns the number of suggestions to return.
    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions.clamp(1, MAX_SUGGESTIONS)
    }

    /// Returns true if repeated guesses may be suggested.
    pub fn allow_repeats(&self) -> bool {
        self.allow_repeats
    }

    /// Returns the chosen strategy.
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Returns the seed, if one was set.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Builds the random source described by these parameters.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// One step of a strategy's reasoning, for people to read.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Thought {
    /// What happened.
    pub message: String,

    /// A number attached to the step, such as a candidate count.
    pub score: Option<f64>,
}

impl Thought {
    /// Creates a thought without a score.
    pub fn new(message: impl Into<String>) -> Self {
        Thought {
            message: message.into(),
            score: None,
        }
    }

    /// Creates a thought with a score.
    pub fn scored(message: impl Into<String>, score: f64) -> Self {
        Thought {
            message: message.into(),
            score: Some(score),
        }
    }
}

/// What [`solve()`] recommends.
///
/// When no word in the corpus fits the history, `next_guess` is `None` and
/// `remaining_candidates` is zero. That is an answer, not an error: the
/// history itself is contradictory or the word list lacks the answer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct SolveResponse {
    /// The recommended guess.
    pub next_guess: Option<Word>,

    /// The recommended guess followed by alternates, best first.
    pub suggestions: Vec<Word>,

    /// How many corpus words are still consistent with the history.
    pub remaining_candidates: usize,

    /// The reasoning trace. Informational only.
    pub thoughts: Vec<Thought>,
}

impl SolveResponse {
    /// Returns true if no candidate fits the history.
    pub fn is_exhausted(&self) -> bool {
        self.next_guess.is_none()
    }

    /// Returns the chance that the next guess is the answer, assuming every
    /// remaining candidate is equally likely.
    pub fn confidence(&self) -> f64 {
        match self.remaining_candidates {
            0 => 0.0,
            n => (1.0 / n as f64).min(1.0),
        }
    }

    /// Summarizes the state of the search in one line.
    pub fn reasoning(&self) -> String {
        match self.remaining_candidates {
            0 => "No word matches all clues.".to_string(),
            1 => "Only one word matches all clues!".to_string(),
            n if n <= 5 => format!("Narrowed to {} possibilities - high confidence guess", n),
            n if n <= 20 => format!("{} words remain - strategic elimination", n),
            n if n <= 100 => format!("Filtering from {} candidates", n),
            n => format!("Exploring {} possibilities", n),
        }
    }
}

/// Trait defining a guess-ranking strategy.
///
/// A strategy is stateless between calls: everything it needs arrives as
/// arguments, and [`solve()`] supplies the full candidate set each turn.
/// The driver takes care of openers, empty and single candidate sets,
/// repeated guesses and truncation, so a strategy only has to rank.
///
/// # How to implement
///
/// Make a new struct and implement [`Display`] on it; the name appears in
/// logs. Then implement [`Strategy`]:
///
/// ```rust
/// use std::fmt::Display;
///
/// use rand::RngCore;
/// use wordly::{Context, Strategy};
///
/// /// Guesses candidates in word list order.
/// #[derive(Debug)]
/// struct InOrder;
///
/// impl Display for InOrder {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "InOrder")
///     }
/// }
///
/// impl Strategy for InOrder {
///     fn rank(&self, _ctx: &Context, candidates: &[usize], _rng: &mut dyn RngCore) -> Vec<usize> {
///         candidates.to_vec()
///     }
///
///     fn version(&self) -> &'static str {
///         "0.1.0"
///     }
/// }
/// ```
pub trait Strategy: Display + Debug + Send + Sync {
    /// Orders guesses from most to least preferred.
    ///
    /// `candidates` holds at least two corpus indices, in corpus order. The
    /// result may contain any corpus indices, not only candidates. Any
    /// randomness must come from `rng`.
    fn rank(&self, ctx: &Context, candidates: &[usize], rng: &mut dyn RngCore) -> Vec<usize>;

    /// Words to open with when there is no history, in order of preference.
    ///
    /// The first one present in the corpus is used. When none is, the
    /// whole corpus is ranked instead.
    fn openers(&self) -> &[&'static str] {
        &[]
    }

    /// Extra reasoning steps describing the last ranking.
    fn thoughts(&self, _ctx: &Context, _candidates: &[usize], _ranked: &[usize]) -> Vec<Thought> {
        Vec::new()
    }

    /// Provides a version for this strategy.
    ///
    /// Change this whenever the ranking logic changes.
    fn version(&self) -> &'static str;
}

/// Returns the strategy's opener, if one of them is in the corpus.
pub fn opener(ctx: &Context, strategy: &dyn Strategy) -> Option<Word> {
    strategy
        .openers()
        .iter()
        .filter_map(|s| s.parse::<Word>().ok())
        .find(|w| ctx.corpus().contains(w))
}

/// Recommends the next guess for `history` using `strategy`.
///
/// The random source is built from [`SolveParameters::rng()`]; see
/// [`solve_with_rng()`] to supply one directly.
///
/// # Examples
///
/// ```rust
/// use wordly::{
///     solve,
///     strategy::{random::Random, GuessFeedback, SolveParameters},
///     Context, Corpus,
/// };
///
/// let ctx = Context::new(Corpus::new(["crate", "slate", "graze"])?);
/// let history = [GuessFeedback::new("crate", "22222")?];
///
/// let response = solve(&ctx, &Random, &history, &SolveParameters::new());
/// assert_eq!(response.next_guess, Some("crate".parse()?));
/// assert_eq!(response.remaining_candidates, 1);
/// #
/// # Ok::<_, wordly::SolverError>(())
/// ```
pub fn solve(
    ctx: &Context,
    strategy: &dyn Strategy,
    history: &[GuessFeedback],
    params: &SolveParameters,
) -> SolveResponse {
    let mut rng = params.rng();
    solve_with_rng(ctx, strategy, history, params, &mut rng)
}

/// Like [`solve()`], but with a caller supplied random source.
pub fn solve_with_rng(
    ctx: &Context,
    strategy: &dyn Strategy,
    history: &[GuessFeedback],
    params: &SolveParameters,
    rng: &mut dyn RngCore,
) -> SolveResponse {
    let max = params.max_suggestions();

    if history.is_empty() {
        if let Some(word) = opener(ctx, strategy) {
            debug!("{} opens with {}", strategy, word);
            return SolveResponse {
                next_guess: Some(word),
                suggestions: vec![word],
                remaining_candidates: ctx.corpus().len(),
                thoughts: vec![Thought::new(
                    "No prior guesses supplied; using default opener.",
                )],
            };
        }
    }

    let candidates = ctx.filter(history);
    let remaining = candidates.len();

    let mut thoughts = Vec::new();
    if let Some(last) = history.last() {
        thoughts.push(Thought::new(format!(
            "Processed guess '{}' with feedback {}.",
            last.guess, last.feedback
        )));
    }

    let ranked = match remaining {
        0 => {
            debug!("{}: no candidates remain", strategy);
            thoughts.push(Thought::new(
                "No candidates match the provided feedback history.",
            ));
            return SolveResponse {
                next_guess: None,
                suggestions: Vec::new(),
                remaining_candidates: 0,
                thoughts,
            };
        }
        1 => candidates.clone(),
        _ => {
            let mut ranked = strategy.rank(ctx, &candidates, rng);
            thoughts.extend(strategy.thoughts(ctx, &candidates, &ranked));
            if !params.allow_repeats() {
                drop_tried(&mut ranked, ctx, history);
            }
            ranked
        }
    };

    let suggestions = ctx.words(&ranked[..ranked.len().min(max)]);
    debug!(
        "{}: {} candidates remain, suggesting {:?}",
        strategy,
        remaining,
        suggestions.iter().map(Word::to_string).collect::<Vec<_>>()
    );

    thoughts.push(Thought::scored(
        format!("{} candidates remain after filtering.", remaining),
        remaining as f64,
    ));
    if !ranked.is_empty() {
        let top = ctx.words(&ranked[..ranked.len().min(3)]);
        let joined = top
            .iter()
            .map(Word::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        thoughts.push(Thought::new(format!("Top recommendations: {}.", joined)));
    }

    SolveResponse {
        next_guess: suggestions.first().copied(),
        suggestions,
        remaining_candidates: remaining,
        thoughts,
    }
}

/// Removes words already guessed, unless that would remove everything.
fn drop_tried(ranked: &mut Vec<usize>, ctx: &Context, history: &[GuessFeedback]) {
    let tried: HashSet<usize> = history
        .iter()
        .filter_map(|h| ctx.corpus().index_of(&h.guess))
        .collect();
    if ranked.iter().any(|i| !tried.contains(i)) {
        ranked.retain(|i| !tried.contains(i));
    }
}
