use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use wordly::{
    display::print_response,
    strategy::{GuessFeedback, SolveParameters, StrategyKind},
    ContextBuilder, SolverError,
};
use wordly_strategies::Solver;

/// Recommend the next guess from the guesses made so far.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory holding wordlist.json or words.txt.
    #[clap(short, long, default_value = "data")]
    words: PathBuf,

    /// Where the feedback table is persisted.
    ///
    /// By default it lives next to the word list.
    #[clap(short, long)]
    table: Option<PathBuf>,

    /// Grade every pair on the fly instead of loading a table.
    #[clap(long, conflicts_with = "table")]
    no_table: bool,

    /// The strategy to rank with, e.g. entropy, beam or hill_climbing.
    #[clap(short, long, default_value = "entropy")]
    strategy: StrategyKind,

    /// How many suggestions to show, between 1 and 5.
    #[clap(short = 'n', long, default_value = "3")]
    max_suggestions: usize,

    /// Allow suggesting words that were already guessed.
    #[clap(long)]
    allow_repeats: bool,

    /// Seed for the randomized strategies.
    #[clap(long)]
    seed: Option<u64>,

    /// Show a progress bar while building the table.
    #[clap(short, long)]
    verbose: bool,

    /// The guesses so far, each as GUESS:PATTERN, e.g. crate:01200.
    #[clap(parse(try_from_str = parse_entry))]
    history: Vec<GuessFeedback>,
}

fn parse_entry(s: &str) -> Result<GuessFeedback, SolverError> {
    let (guess, feedback) = s
        .split_once(':')
        .ok_or_else(|| wordly::WordError::InvalidPattern(s.to_string()))?;
    GuessFeedback::new(guess, feedback)
}

fn main() -> Result<(), SolverError> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = ContextBuilder::new(&args.words);
    if let Some(table) = &args.table {
        builder = builder.table_path(table);
    }
    if args.no_table {
        builder = builder.without_table();
    }
    if args.verbose {
        builder = builder.verbose();
    }
    let ctx = builder.build()?;
    info!("loaded {} words", ctx.corpus().len());

    let mut params = SolveParameters::new()
        .with_strategy(args.strategy)
        .with_max_suggestions(args.max_suggestions)
        .with_allow_repeats(args.allow_repeats);
    if let Some(seed) = args.seed {
        params = params.with_seed(seed);
    }

    let candidates = ctx.try_filter(&args.history)?;
    debug!("{} candidates fit the history", candidates.len());

    let solver = Solver::new(ctx);
    let response = solver.solve(&args.history, &params);
    print_response(&args.history, &response);

    Ok(())
}
