use std::collections::HashSet;

use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use wordly::{
    score::EntropyScorer,
    strategy::{GuessFeedback, SolveParameters, StrategyKind},
    Context, Corpus, Strategy, Word,
};

use crate::{
    util::{sample_neighbors, Explored},
    Beam, Dfs, Entropy, Frequency, HillClimbing, SimulatedAnnealing, Solver,
};

const WORDS: [&str; 14] = [
    "ROATE", "TARES", "AROSE", "SLATE", "CRATE", "TRACE", "GRAZE", "BRINE", "TRIBE", "PROBE",
    "SPOOL", "SOBER", "CRANE", "PLATE",
];

const NIGHTS: [&str; 7] = ["MIGHT", "NIGHT", "LIGHT", "SIGHT", "FIGHT", "FLAMS", "CRATE"];

fn ctx(words: &[&str]) -> Context {
    Context::with_table(Corpus::new(words).unwrap())
}

fn word(s: &str) -> Word {
    s.parse().unwrap()
}

fn entry(guess: &str, feedback: &str) -> GuessFeedback {
    GuessFeedback::new(guess, feedback).unwrap()
}

fn opener_of(solver: &Solver, kind: StrategyKind) -> Option<Word> {
    solver
        .solve(&[], &SolveParameters::new().with_strategy(kind))
        .next_guess
}

#[test]
fn each_strategy_opens_with_its_own_word() {
    let solver = Solver::new(ctx(&WORDS));

    assert_eq!(opener_of(&solver, StrategyKind::Entropy), Some(word("ROATE")));
    assert_eq!(opener_of(&solver, StrategyKind::BetterEntropy), Some(word("ROATE")));
    assert_eq!(opener_of(&solver, StrategyKind::Beam), Some(word("ROATE")));
    assert_eq!(opener_of(&solver, StrategyKind::Frequency), Some(word("TARES")));
    for kind in [
        StrategyKind::Dfs,
        StrategyKind::HillClimbing,
        StrategyKind::SimulatedAnnealing,
    ] {
        assert_eq!(opener_of(&solver, kind), Some(word("AROSE")));
    }

    let opening = solver.solve(&[], &SolveParameters::new().with_max_suggestions(5));
    assert_eq!(opening.suggestions, vec![word("ROATE")]);
    assert_eq!(opening.remaining_candidates, WORDS.len());
}

#[test]
fn local_search_opens_with_first_available() {
    let solver = Solver::new(ctx(&["CRATE", "STARE", "SLATE", "GRAZE"]));
    assert_eq!(opener_of(&solver, StrategyKind::Dfs), Some(word("SLATE")));
}

#[test]
fn missing_opener_ranks_the_corpus() {
    let solver = Solver::new(ctx(&["CRATE", "SLATE", "GRAZE"]));
    let response = solver.solve(&[], &SolveParameters::new().with_max_suggestions(3));
    assert_eq!(response.remaining_candidates, 3);
    assert_eq!(response.suggestions.len(), 3);
}

#[test]
fn every_strategy_finds_the_only_candidate() {
    let solver = Solver::new(ctx(&["CRATE", "SLATE", "GRAZE"]));
    let history = [entry("CRATE", "22222")];

    for kind in StrategyKind::ALL {
        let response = solver.solve(&history, &SolveParameters::new().with_strategy(kind).with_seed(1));
        assert_eq!(response.next_guess, Some(word("CRATE")), "{}", kind);
        assert_eq!(response.remaining_candidates, 1, "{}", kind);
    }
}

#[test]
fn every_strategy_reports_exhaustion() {
    let solver = Solver::new(ctx(&WORDS));
    let history = [entry("CRATE", "22220")];

    for kind in StrategyKind::ALL {
        let response = solver.solve(&history, &SolveParameters::new().with_strategy(kind));
        assert!(response.is_exhausted(), "{}", kind);
        assert_eq!(response.remaining_candidates, 0);
    }
}

#[test]
fn candidate_strategies_only_suggest_candidates() {
    let solver = Solver::new(ctx(&WORDS));
    // leaves ROATE, CRATE and TRACE
    let history = [entry("LATER", "01111")];
    let candidates: HashSet<Word> = ["ROATE", "CRATE", "TRACE"].iter().map(|s| word(s)).collect();

    for kind in [
        StrategyKind::Entropy,
        StrategyKind::Frequency,
        StrategyKind::Random,
        StrategyKind::Dfs,
        StrategyKind::HillClimbing,
        StrategyKind::SimulatedAnnealing,
    ] {
        let params = SolveParameters::new().with_strategy(kind).with_max_suggestions(5).with_seed(11);
        let response = solver.solve(&history, &params);
        assert_eq!(response.remaining_candidates, 3, "{}", kind);
        assert!(!response.suggestions.is_empty(), "{}", kind);
        assert!(
            response.suggestions.iter().all(|w| candidates.contains(w)),
            "{} suggested {:?}",
            kind,
            response.suggestions
        );
    }
}

#[test]
fn full_corpus_entropy_finds_better_splitters() {
    let ctx = ctx(&NIGHTS);
    let history = [entry("TIGHT", "02222")];
    let candidates = ctx.filter(&history);
    assert_eq!(candidates.len(), 5);
    let mut rng = StdRng::seed_from_u64(0);

    // every candidate splits the rest the same way, so the first one wins
    let ranked = Entropy::new().rank(&ctx, &candidates, &mut rng);
    assert_eq!(ctx.corpus()[ranked[0]], word("MIGHT"));
    assert_eq!(ranked.len(), 5);

    // FLAMS cannot be the answer, but gives a different pattern for each
    let ranked = Entropy::new().full_corpus().rank(&ctx, &candidates, &mut rng);
    assert_eq!(ctx.corpus()[ranked[0]], word("FLAMS"));
    assert_eq!(ranked.len(), NIGHTS.len());
}

#[test]
fn tiny_candidate_sets_keep_corpus_order() {
    let ctx = ctx(&WORDS);
    let mut rng = StdRng::seed_from_u64(0);
    let pair = [4, 13];

    assert_eq!(Entropy::new().rank(&ctx, &pair, &mut rng), pair);
    assert_eq!(Entropy::new().full_corpus().rank(&ctx, &pair, &mut rng), pair);
    assert_eq!(Frequency::new().rank(&ctx, &pair, &mut rng), pair);
    assert_eq!(Beam::new().rank(&ctx, &pair, &mut rng), pair);
}

#[test]
fn beam_ranks_its_shortlist() {
    let ctx = ctx(&NIGHTS);
    let history = [entry("TIGHT", "02222")];
    let candidates = ctx.filter(&history);
    let mut rng = StdRng::seed_from_u64(0);

    // the *IGHT words cover the most letters, so FLAMS misses the beam
    let beam = Beam::new().beam_width(3);
    let ranked = beam.rank(&ctx, &candidates, &mut rng);
    assert_eq!(
        ctx.words(&ranked),
        vec![word("MIGHT"), word("NIGHT"), word("LIGHT")]
    );

    let thoughts = beam.thoughts(&ctx, &candidates, &ranked);
    assert_eq!(
        thoughts[0].message,
        "Phase 1 (frequency) reduced search to top 3 of 7 words."
    );
    assert_eq!(thoughts[1].message, "Phase 2 entropy favors: MIGHT, NIGHT, LIGHT.");

    // a wide beam takes in FLAMS, which then ranks first
    let ranked = Beam::new().rank(&ctx, &candidates, &mut rng);
    assert_eq!(ranked.len(), NIGHTS.len());
    assert_eq!(ctx.corpus()[ranked[0]], word("FLAMS"));
}

#[test]
fn beam_thoughts_reach_the_response() {
    let solver = Solver::new(ctx(&NIGHTS));
    let history = [entry("TIGHT", "02222")];
    let response = solver.solve(&history, &SolveParameters::new().with_strategy(StrategyKind::Beam));

    let messages: Vec<&str> = response.thoughts.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages[0], "Processed guess 'TIGHT' with feedback 02222.");
    assert!(messages[1].starts_with("Phase 1"));
    assert!(messages[2].starts_with("Phase 2"));
    assert_eq!(messages[3], "5 candidates remain after filtering.");
}

#[test]
fn dfs_only_scores_its_search_space() {
    let ctx = ctx(&WORDS);
    let candidates: Vec<usize> = (0..WORDS.len()).collect();
    let mut rng = StdRng::seed_from_u64(0);

    let ranked = Dfs::new().search_limit(4).rank(&ctx, &candidates, &mut rng);
    let mut sorted = ranked.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2, 3]);

    assert_eq!(Dfs::new().rank(&ctx, &candidates, &mut rng).len(), WORDS.len());
}

#[test]
fn dfs_counts_raw_letters_and_positions() {
    let ctx = ctx(&["CRATE", "SLATE", "HELLO"]);
    let candidates = [0, 1, 2];
    let mut rng = StdRng::seed_from_u64(0);

    // SLATE 27, CRATE 25, HELLO 18
    assert_eq!(Dfs::new().rank(&ctx, &candidates, &mut rng), vec![1, 0, 2]);
    // positional fractions tie CRATE and SLATE, and the earlier one wins
    assert_eq!(Frequency::new().rank(&ctx, &candidates, &mut rng)[0], 0);

    let solver = Solver::new(ctx);
    let history = [entry("BUMPY", "00000")];
    let response = solver.solve(&history, &SolveParameters::new().with_strategy(StrategyKind::Dfs));
    assert_eq!(response.next_guess, Some(word("SLATE")));
}

#[test]
fn dfs_ties_go_to_the_earlier_word() {
    let ctx = ctx(&["TRACE", "CRATE"]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(Dfs::new().rank(&ctx, &[0, 1], &mut rng), vec![0, 1]);
}

#[test]
fn local_search_is_reproducible() {
    let ctx = ctx(&WORDS);
    let candidates: Vec<usize> = (0..WORDS.len()).collect();
    let strategies: [&dyn Strategy; 2] = [&HillClimbing::new(), &SimulatedAnnealing::new()];

    for strategy in strategies {
        let first = strategy.rank(&ctx, &candidates, &mut StdRng::seed_from_u64(42));
        for _ in 0..3 {
            assert_eq!(
                strategy.rank(&ctx, &candidates, &mut StdRng::seed_from_u64(42)),
                first
            );
        }

        let distinct: HashSet<usize> = first.iter().copied().collect();
        assert_eq!(distinct.len(), first.len());
        assert!(first.iter().all(|i| candidates.contains(i)));
    }
}

#[test]
fn hill_climbing_never_ends_below_its_start() {
    let ctx = ctx(&WORDS);
    let candidates: Vec<usize> = (0..WORDS.len()).collect();
    let scorer = EntropyScorer::new();

    for seed in 0..10 {
        let ranked = HillClimbing::new().rank(&ctx, &candidates, &mut StdRng::seed_from_u64(seed));
        let best = scorer.score(&ctx, ranked[0], &candidates);
        // the start is one of the first ten candidates
        let worst_start = (0..10)
            .map(|i| scorer.score(&ctx, i, &candidates))
            .fold(f64::INFINITY, f64::min);
        assert!(best >= worst_start);
    }
}

#[test]
fn annealing_returns_the_best_word_seen() {
    let ctx = ctx(&WORDS);
    let candidates: Vec<usize> = (0..WORDS.len()).collect();
    let scorer = EntropyScorer::new();

    for seed in 0..10 {
        let ranked =
            SimulatedAnnealing::new().rank(&ctx, &candidates, &mut StdRng::seed_from_u64(seed));
        let best = scorer.score(&ctx, ranked[0], &candidates);
        for &other in &ranked[1..] {
            assert!(scorer.score(&ctx, other, &candidates) <= best + 1e-12);
        }
    }
}

#[test]
fn hill_climbing_takes_the_first_better_neighbor() {
    let ctx = ctx(&WORDS);
    let candidates: Vec<usize> = (0..WORDS.len()).collect();
    let scorer = EntropyScorer::new();
    let score = |g: usize| scorer.score(&ctx, g, &candidates);

    for seed in 0..20 {
        let mut explored = Explored::new(&ctx, &candidates, scorer);
        let walk = HillClimbing::new().walk(
            &ctx,
            &mut explored,
            &candidates,
            &mut StdRng::seed_from_u64(seed),
        );

        // the same draws, moving to the first neighbor that beats the current word
        let mut rng = StdRng::seed_from_u64(seed);
        let mut current = candidates[rng.gen_range(0..10_usize)];
        let mut path = vec![current];
        let mut rounds = 0;
        while rounds < 20 {
            rounds += 1;
            let batch = sample_neighbors(&candidates, current, WORDS.len(), &mut rng);
            match batch.into_iter().find(|&n| score(n) > score(current)) {
                Some(n) => {
                    current = n;
                    path.push(n);
                }
                None => break,
            }
        }

        assert_eq!(walk.path, path, "seed {}", seed);
        assert_eq!(walk.rounds, rounds, "seed {}", seed);
        assert_eq!(walk.best, current);
        if walk.rounds < 20 {
            // every round moved except the last
            assert_eq!(walk.moves() + 1, walk.rounds);
        }
    }
}

#[test]
fn hill_climbing_stops_on_a_flat_batch() {
    let ctx = ctx(&NIGHTS);
    // five *IGHT words, each splitting the others the same way
    let candidates = ctx.filter(&[entry("TIGHT", "02222")]);

    for seed in 0..5 {
        let mut explored = Explored::new(&ctx, &candidates, EntropyScorer::new());
        let walk = HillClimbing::new().walk(
            &ctx,
            &mut explored,
            &candidates,
            &mut StdRng::seed_from_u64(seed),
        );
        assert_eq!(walk.rounds, 1);
        assert_eq!(walk.moves(), 0);
        assert_eq!(walk.path, vec![walk.best]);
    }

    let mut explored = Explored::new(&ctx, &candidates, EntropyScorer::new());
    let walk = HillClimbing::new().start_window(1).walk(
        &ctx,
        &mut explored,
        &candidates,
        &mut StdRng::seed_from_u64(9),
    );
    assert_eq!(walk.best, candidates[0]);
}

#[test]
fn annealing_cools_on_schedule() {
    let ctx = ctx(&WORDS);
    let candidates: Vec<usize> = (0..WORDS.len()).collect();

    for seed in 0..5 {
        let rounds = |annealing: SimulatedAnnealing| {
            let mut explored = Explored::new(&ctx, &candidates, EntropyScorer::new());
            annealing
                .walk(&ctx, &mut explored, &candidates, &mut StdRng::seed_from_u64(seed))
                .rounds
        };

        // 100 * 0.85^28 is still above 1, 100 * 0.85^29 is not
        assert_eq!(rounds(SimulatedAnnealing::new()), 29);
        assert_eq!(rounds(SimulatedAnnealing::new().cooling_rate(0.5)), 7);
        assert_eq!(rounds(SimulatedAnnealing::new().min_temperature(50.0)), 5);
        assert_eq!(rounds(SimulatedAnnealing::new().max_iterations(10)), 10);
        assert_eq!(rounds(SimulatedAnnealing::new().temperature(1.0)), 0);
    }
}

#[test]
fn annealing_always_takes_equal_moves() {
    let ctx = ctx(&NIGHTS);
    let candidates = ctx.filter(&[entry("TIGHT", "02222")]);

    for seed in 0..5 {
        let mut explored = Explored::new(&ctx, &candidates, EntropyScorer::new());
        let walk = SimulatedAnnealing::new().start_window(1).walk(
            &ctx,
            &mut explored,
            &candidates,
            &mut StdRng::seed_from_u64(seed),
        );

        assert_eq!(walk.rounds, 29);
        assert_eq!(walk.moves(), 29);
        assert!(walk.path.windows(2).all(|pair| pair[0] != pair[1]));
        // nothing beats the start, so it stays the best
        assert_eq!(walk.path[0], candidates[0]);
        assert_eq!(walk.best, candidates[0]);
    }
}

proptest! {
    #[test]
    fn beam_never_exceeds_its_width(width in 1_usize..20, seed in any::<u64>()) {
        let ctx = ctx(&WORDS);
        let candidates: Vec<usize> = (0..WORDS.len()).collect();
        let ranked = Beam::new()
            .beam_width(width)
            .rank(&ctx, &candidates, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(ranked.len(), width.min(WORDS.len()));
        prop_assert!(ranked.iter().all(|&i| i < ctx.corpus().len()));
    }
}
