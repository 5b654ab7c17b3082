#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use std::path::PathBuf;

use thiserror::Error;

pub mod feedback;
pub use feedback::{Code, Grade, Pattern};

pub mod words;
pub use words::{Corpus, Word};

pub mod table;
pub use table::FeedbackTable;

pub mod context;
pub use context::{Context, ContextBuilder};

pub mod score;

pub mod strategy;
pub use strategy::{solve, Strategy};

#[cfg(feature = "fancy")]
pub mod display;

#[cfg(test)]
mod mock;

/// The number of letters in every word.
pub const WORD_LEN: usize = 5;

/// The errors that `wordly` can produce.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid word or pattern")]
    Word {
        #[from]
        kind: WordError,
    },

    #[error("could not load the word list")]
    Corpus {
        #[from]
        kind: CorpusError,
    },

    #[error("the feedback table is unusable")]
    Table {
        #[from]
        kind: TableError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("trouble deserializing the word list")]
    Serde(#[from] serde_json::Error),

    /// The strategy identifier does not name any known strategy.
    #[error("unknown solver strategy \"{0}\"")]
    UnknownStrategy(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    /// The string is not five ASCII letters.
    #[error("\"{0}\" is not a five letter word")]
    InvalidWord(String),

    /// The string is not five digits drawn from `0`, `1` and `2`.
    #[error("\"{0}\" is not a five digit feedback pattern")]
    InvalidPattern(String),

    /// A table lookup was asked for a word the corpus does not contain.
    #[error("the word \"{0}\" is not in the word list")]
    NotInCorpus(String),

    /// The index does not correspond to a word in the corpus.
    #[error("the index {0} does not correspond to a word in the word list")]
    InvalidIndex(usize),

    /// The code lies outside `0..243`.
    #[error("{0} is not a valid feedback code")]
    InvalidCode(u8),
}

#[derive(Debug, Error)]
pub enum CorpusError {
    /// Neither the JSON word list nor the legacy text list exists.
    #[error("no word list found in {0}")]
    Missing(PathBuf),

    /// Every entry was malformed, or there were none.
    #[error("the word list is empty or malformed")]
    Empty,

    #[error("unsupported word list format")]
    UnsupportedFormat,
}

#[derive(Debug, Error)]
pub enum TableError {
    /// The persisted table was built for a corpus of a different size.
    #[error("the persisted table holds {found} codes but the word list needs {expected}")]
    Stale { expected: usize, found: usize },

    #[error("byte {offset} of the persisted table holds invalid code {code}")]
    CorruptCode { offset: usize, code: u8 },
}

pub type Result<T, E = SolverError> = std::result::Result<T, E>;
