//! The loaded word list and feedback table, and filtering candidates with them.

use std::path::{Path, PathBuf};

use either::Either;
use log::{debug, info};

use crate::{
    feedback::Code,
    strategy::GuessFeedback,
    table::FeedbackTable,
    words::{Corpus, Word},
    Result, TableError, WordError,
};

/// The file name used for the persisted table when none is configured.
pub const DEFAULT_TABLE_FILE: &str = "feedback_table.bin";

/// Everything the scorers and strategies read: the corpus and, optionally,
/// its feedback table.
///
/// A context is built once and then only borrowed, so it can be shared
/// between threads serving independent requests. Without a table, codes are
/// graded on the fly; the results are identical either way.
#[derive(Clone, Debug)]
pub struct Context {
    corpus: Corpus,
    table: Option<FeedbackTable>,
}

impl Context {
    /// Creates a context that grades every pair on demand.
    pub fn new(corpus: Corpus) -> Self {
        Context {
            corpus,
            table: None,
        }
    }

    /// Creates a context and builds its feedback table in memory.
    pub fn with_table(corpus: Corpus) -> Self {
        let table = FeedbackTable::build(&corpus, false);
        Context {
            corpus,
            table: Some(table),
        }
    }

    /// Creates a context from a corpus and a table that was built for it.
    ///
    /// Returns [`TableError::Stale`] if the table's size does not match.
    pub fn from_parts(corpus: Corpus, table: FeedbackTable) -> Result<Self> {
        if table.size() != corpus.len() {
            return Err(TableError::Stale {
                expected: corpus.len() * corpus.len(),
                found: table.size() * table.size(),
            }
            .into());
        }
        Ok(Context {
            corpus,
            table: Some(table),
        })
    }

    /// Returns the corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Returns the feedback table, if one was loaded.
    pub fn table(&self) -> Option<&FeedbackTable> {
        self.table.as_ref()
    }

    /// Returns the code for guessing corpus word `guess` when the answer is
    /// corpus word `target`.
    pub fn code(&self, guess: usize, target: usize) -> Code {
        match &self.table {
            Some(table) => table.code(guess, target),
            None => Code::compute(&self.corpus[guess], &self.corpus[target]),
        }
    }

    /// Returns the indices of every corpus word consistent with `history`.
    ///
    /// A word survives if, had it been the answer, every guess in the
    /// history would have produced exactly the recorded feedback. The
    /// entries are independent constraints, so their order does not matter.
    /// An empty history keeps the whole corpus. The result is in corpus
    /// order.
    ///
    /// A guess outside the corpus has no table row, so it is graded
    /// directly even when a table is loaded. Use
    /// [`try_filter()`](Context::try_filter) to reject such guesses instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wordly::{strategy::GuessFeedback, Context, Corpus};
    ///
    /// let ctx = Context::new(Corpus::new(["crate", "slate", "graze"])?);
    /// let history = [GuessFeedback::new("crate", "00222")?];
    /// assert_eq!(ctx.filter(&history), vec![1]);
    /// #
    /// # Ok::<_, wordly::SolverError>(())
    /// ```
    pub fn filter(&self, history: &[GuessFeedback]) -> Vec<usize> {
        let mut candidates: Vec<usize> = (0..self.corpus.len()).collect();

        for entry in history {
            let code = entry.feedback.code();
            // Guesses outside the corpus have no table row and are graded directly.
            let grader = match (&self.table, self.corpus.index_of(&entry.guess)) {
                (Some(table), Some(g)) => Either::Left(table.row(g)),
                _ => Either::Right(entry.guess),
            };

            candidates.retain(|&t| match &grader {
                Either::Left(row) => row[t] == code.value(),
                Either::Right(guess) => Code::compute(guess, &self.corpus[t]) == code,
            });
            debug!(
                "{} {} leaves {} candidates",
                entry.guess,
                entry.feedback,
                candidates.len()
            );
        }

        candidates
    }

    /// Like [`filter()`](Context::filter), but fails with
    /// [`WordError::NotInCorpus`] if a table is loaded and a guess in the
    /// history has no row in it.
    ///
    /// Without a table every guess is graded directly, so nothing is
    /// rejected.
    pub fn try_filter(&self, history: &[GuessFeedback]) -> Result<Vec<usize>, WordError> {
        if self.table.is_some() {
            for entry in history {
                self.corpus.require(&entry.guess)?;
            }
        }
        Ok(self.filter(history))
    }

    /// Maps candidate indices back to words.
    pub fn words(&self, indices: &[usize]) -> Vec<Word> {
        indices.iter().map(|&i| self.corpus[i]).collect()
    }
}

/// Loads a [`Context`] from disk.
///
/// The builder methods consume the existing builder and return a new one.
///
/// # Examples
///
/// ```rust,no_run
/// use wordly::ContextBuilder;
///
/// let ctx = ContextBuilder::new("data")
///     .table_path("data/table.bin")
///     .verbose()
///     .build()?;
/// #
/// # Ok::<_, wordly::SolverError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ContextBuilder {
    words_dir: PathBuf,
    table_path: Option<PathBuf>,
    use_table: bool,
    verbose: bool,
}

impl ContextBuilder {
    /// Creates a builder that reads the word list from `words_dir`.
    ///
    /// Defaults:
    /// 1. uses a feedback table
    /// 2. persists the table as [`DEFAULT_TABLE_FILE`] inside `words_dir`
    /// 3. quiet mode
    pub fn new(words_dir: impl AsRef<Path>) -> Self {
        ContextBuilder {
            words_dir: words_dir.as_ref().to_path_buf(),
            table_path: None,
            use_table: true,
            verbose: false,
        }
    }

    /// Sets where the feedback table is persisted.
    pub fn table_path(self, path: impl AsRef<Path>) -> Self {
        ContextBuilder {
            table_path: Some(path.as_ref().to_path_buf()),
            use_table: true,
            ..self
        }
    }

    /// Skips the feedback table entirely.
    pub fn without_table(self) -> Self {
        ContextBuilder {
            use_table: false,
            ..self
        }
    }

    /// Shows a progress bar if the table has to be built.
    pub fn verbose(self) -> Self {
        ContextBuilder {
            verbose: true,
            ..self
        }
    }

    /// Builds silently.
    pub fn quiet(self) -> Self {
        ContextBuilder {
            verbose: false,
            ..self
        }
    }

    /// Loads the corpus, then loads or builds the table.
    pub fn build(self) -> Result<Context> {
        let corpus = Corpus::load(&self.words_dir)?;

        if !self.use_table {
            info!("running without a feedback table");
            return Ok(Context::new(corpus));
        }

        let path = self
            .table_path
            .unwrap_or_else(|| self.words_dir.join(DEFAULT_TABLE_FILE));
        let table = FeedbackTable::load_or_build(path, &corpus, self.verbose)?;
        Context::from_parts(corpus, table)
    }
}
