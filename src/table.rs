//! The precomputed feedback code of every guess against every target.

use std::{fs, io::ErrorKind, path::Path};

use log::{info, warn};
#[cfg(all(feature = "fancy", not(feature = "parallel")))]
use indicatif::ProgressIterator;
#[cfg(all(feature = "fancy", feature = "parallel"))]
use indicatif::ParallelProgressIterator;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    feedback::{self, Code, Pattern, NUM_CODES},
    words::{Corpus, Word},
    Result, TableError, WordError,
};

/// An N×N matrix of feedback codes for a corpus of N words.
///
/// Cell `(g, t)` holds the code of guessing word `g` when the answer is word
/// `t`. The matrix is not symmetric: with repeated letters, grading `g`
/// against `t` can differ from grading `t` against `g`.
///
/// On disk the table is the raw row-major bytes with no header, so a
/// persisted table is only reused when its length is exactly N×N.
///
/// # Examples
///
/// ```rust
/// use wordly::{Code, Corpus, FeedbackTable};
///
/// let corpus = Corpus::new(["crate", "trace", "spool"])?;
/// let table = FeedbackTable::build(&corpus, false);
///
/// let (crate_, trace) = (corpus[0], corpus[1]);
/// assert_eq!(table.code(0, 1), Code::compute(&crate_, &trace));
/// assert_eq!(table.code(2, 2), Code::SOLVED);
/// #
/// # Ok::<_, wordly::SolverError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackTable {
    size: usize,
    codes: Vec<u8>,
}

impl FeedbackTable {
    /// Computes the table for `corpus`.
    ///
    /// Rows are independent, so with the `parallel` feature each row is
    /// filled on the rayon pool, writing only to its own slice of the
    /// buffer. With `verbose` and the `fancy` feature a progress bar is
    /// drawn while building.
    pub fn build(corpus: &Corpus, verbose: bool) -> Self {
        let size = corpus.len();
        let mut codes = vec![0_u8; size * size];
        info!("building {}x{} feedback table", size, size);

        let words = corpus.words();
        let fill = |(g, row): (usize, &mut [u8])| fill_row(&words[g], words, row);

        if size > 0 {
            #[cfg(feature = "parallel")]
            {
                let rows = codes.par_chunks_mut(size).enumerate();
                #[cfg(feature = "fancy")]
                {
                    if verbose {
                        rows.progress_count(size as u64).for_each(fill);
                    } else {
                        rows.for_each(fill);
                    }
                }
                #[cfg(not(feature = "fancy"))]
                {
                    let _ = verbose;
                    rows.for_each(fill);
                }
            }

            #[cfg(not(feature = "parallel"))]
            {
                let rows = codes.chunks_mut(size).enumerate();
                #[cfg(feature = "fancy")]
                {
                    if verbose {
                        rows.progress_count(size as u64).for_each(fill);
                    } else {
                        rows.for_each(fill);
                    }
                }
                #[cfg(not(feature = "fancy"))]
                {
                    let _ = verbose;
                    rows.for_each(fill);
                }
            }
        }

        FeedbackTable { size, codes }
    }

    /// Reads a persisted table and checks that it fits `corpus`.
    ///
    /// Returns [`TableError::Stale`] if the file does not hold exactly
    /// N×N codes and [`TableError::CorruptCode`] if a byte is not a code.
    pub fn load(path: impl AsRef<Path>, corpus: &Corpus) -> Result<Self> {
        let codes = fs::read(path)?;
        let size = corpus.len();

        if codes.len() != size * size {
            return Err(TableError::Stale {
                expected: size * size,
                found: codes.len(),
            }
            .into());
        }
        if let Some((offset, &code)) = codes
            .iter()
            .enumerate()
            .find(|(_, &c)| c as usize >= NUM_CODES)
        {
            return Err(TableError::CorruptCode { offset, code }.into());
        }

        Ok(FeedbackTable { size, codes })
    }

    /// Writes the table's raw bytes to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.codes)?;
        Ok(())
    }

    /// Loads the table persisted at `path`, or builds and persists it.
    ///
    /// A missing, stale or corrupt file is rebuilt. Other IO errors are
    /// returned.
    pub fn load_or_build(path: impl AsRef<Path>, corpus: &Corpus, verbose: bool) -> Result<Self> {
        let path = path.as_ref();

        match Self::load(path, corpus) {
            Ok(table) => {
                info!("loaded feedback table from {}", path.display());
                return Ok(table);
            }
            Err(crate::SolverError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!("no feedback table at {}", path.display());
            }
            Err(crate::SolverError::Table { kind }) => {
                warn!("rebuilding feedback table at {}: {}", path.display(), kind);
            }
            Err(e) => return Err(e),
        }

        let table = Self::build(corpus, verbose);
        table.save(path)?;
        info!("saved feedback table to {}", path.display());
        Ok(table)
    }

    /// Returns the number of words the table was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the code for guess index `guess` against target index `target`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn code(&self, guess: usize, target: usize) -> Code {
        assert!(target < self.size, "target index {} out of bounds", target);
        Code::from_raw(self.codes[guess * self.size + target])
    }

    /// Returns the raw codes of every target for guess index `guess`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn row(&self, guess: usize) -> &[u8] {
        &self.codes[guess * self.size..(guess + 1) * self.size]
    }

    /// Looks up the code for a pair of words through the corpus index.
    ///
    /// Words missing from `corpus` are reported as
    /// [`WordError::NotInCorpus`] rather than graded on the fly.
    pub fn lookup(&self, corpus: &Corpus, guess: &Word, target: &Word) -> Result<Code, WordError> {
        let g = corpus.require(guess)?;
        let t = corpus.require(target)?;
        Ok(self.code(g, t))
    }
}

fn fill_row(guess: &Word, targets: &[Word], row: &mut [u8]) {
    for (slot, target) in row.iter_mut().zip(targets) {
        *slot = Pattern::new(feedback::grade(guess.as_bytes(), target.as_bytes()))
            .code()
            .value();
    }
}
