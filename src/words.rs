//! Words and the word list they come from.

use std::{
    collections::HashMap,
    fmt::Display,
    fs,
    path::Path,
    str::FromStr,
};

use log::{info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CorpusError, Result, WordError, WORD_LEN};

/// The JSON word list looked for by [`Corpus::load()`].
pub const WORDLIST_JSON: &str = "wordlist.json";

/// The legacy plain text word list, one word per line.
pub const WORDLIST_LEGACY: &str = "words.txt";

/// A five letter word.
///
/// Words are stored upper case, so `"crate".parse()` and `"CRATE".parse()`
/// produce the same value. Construction rejects anything that is not five
/// ASCII letters.
///
/// # Examples
///
/// ```rust
/// use wordly::Word;
///
/// let word: Word = "crate".parse()?;
/// assert_eq!(word.to_string(), "CRATE");
///
/// assert!("cr4te".parse::<Word>().is_err());
/// assert!("crates".parse::<Word>().is_err());
/// #
/// # Ok::<_, wordly::WordError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "String", into = "String")
)]
pub struct Word([u8; WORD_LEN]);

impl Word {
    /// Returns the letters as upper case ASCII bytes.
    pub fn as_bytes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }

    /// Returns the number of different letters in the word.
    pub fn distinct_letters(&self) -> usize {
        let mut seen = 0_u32;
        for &c in &self.0 {
            seen |= 1 << (c - b'A');
        }
        seen.count_ones() as usize
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != WORD_LEN || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(WordError::InvalidWord(s.to_string()));
        }

        let mut letters = [0; WORD_LEN];
        for (slot, b) in letters.iter_mut().zip(bytes) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(Word(letters))
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.to_string()
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &c in &self.0 {
            write!(f, "{}", c as char)?;
        }
        Ok(())
    }
}

/// The ordered, duplicate free list of every valid guess and answer.
///
/// A word's position in the list is its index, which is what the
/// [feedback table](crate::FeedbackTable) and the candidate filter work in.
/// The list never changes once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    words: Vec<Word>,
    index: HashMap<Word, usize>,
}

impl Corpus {
    /// Builds a corpus from raw entries.
    ///
    /// Entries are trimmed and upper cased. Entries that are not five letters
    /// are skipped, and repeated words keep their first position. Returns
    /// [`CorpusError::Empty`] if nothing usable remains.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wordly::Corpus;
    ///
    /// let corpus = Corpus::new(["crate", " slate ", "nope", "CRATE", "graze"])?;
    /// assert_eq!(corpus.len(), 3);
    /// assert_eq!(corpus.index_of(&"graze".parse()?), Some(2));
    /// #
    /// # Ok::<_, wordly::SolverError>(())
    /// ```
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut corpus = Corpus::default();
        let mut skipped = 0_usize;

        for entry in entries {
            match entry.as_ref().trim().parse::<Word>() {
                Ok(word) => corpus.push(word),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("skipped {} malformed word list entries", skipped);
        }
        if corpus.is_empty() {
            return Err(CorpusError::Empty.into());
        }
        Ok(corpus)
    }

    fn push(&mut self, word: Word) {
        if !self.index.contains_key(&word) {
            self.index.insert(word, self.words.len());
            self.words.push(word);
        }
    }

    /// Loads the word list stored in `dir`.
    ///
    /// The JSON list ([`WORDLIST_JSON`]) is preferred. If it does not exist,
    /// the legacy text list ([`WORDLIST_LEGACY`]) is tried once instead.
    /// See [`from_json()`](Corpus::from_json()) for the accepted JSON shapes.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let json_path = dir.join(WORDLIST_JSON);
        let legacy_path = dir.join(WORDLIST_LEGACY);

        #[cfg(feature = "serde")]
        {
            if json_path.exists() {
                let corpus = Self::from_json(&fs::read_to_string(&json_path)?)?;
                info!("loaded {} words from {}", corpus.len(), json_path.display());
                return Ok(corpus);
            }
        }

        if legacy_path.exists() {
            let corpus = Self::from_lines(&fs::read_to_string(&legacy_path)?)?;
            info!(
                "loaded {} words from legacy {}",
                corpus.len(),
                legacy_path.display()
            );
            return Ok(corpus);
        }

        Err(CorpusError::Missing(dir.to_path_buf()).into())
    }

    /// Parses a JSON word list.
    ///
    /// The document may be an array or an object whose `words` member is an
    /// array. Array elements may be strings or records with a `word` string
    /// field; anything else is skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wordly::Corpus;
    ///
    /// let corpus = Corpus::from_json(r#"{"words": [{"word": "crate"}, "slate", 7]}"#)?;
    /// assert_eq!(corpus.len(), 2);
    /// #
    /// # Ok::<_, wordly::SolverError>(())
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        use serde_json::Value;

        let data: Value = serde_json::from_str(json)?;
        let payload = match &data {
            Value::Array(entries) => entries,
            Value::Object(map) => match map.get("words") {
                Some(Value::Array(entries)) => entries,
                None => return Err(CorpusError::Empty.into()),
                Some(_) => return Err(CorpusError::UnsupportedFormat.into()),
            },
            _ => return Err(CorpusError::UnsupportedFormat.into()),
        };

        Self::new(payload.iter().map(|entry| match entry {
            Value::String(s) => s.as_str(),
            Value::Object(record) => record.get("word").and_then(Value::as_str).unwrap_or(""),
            _ => "",
        }))
    }

    /// Parses the legacy text format, one word per line.
    pub fn from_lines(text: &str) -> Result<Self> {
        Self::new(text.lines())
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the corpus holds no words.
    ///
    /// A corpus built by this crate is never empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the word at `index`.
    pub fn get(&self, index: usize) -> Result<Word, WordError> {
        self.words
            .get(index)
            .copied()
            .ok_or(WordError::InvalidIndex(index))
    }

    /// Returns the index of `word`, if it is in the corpus.
    pub fn index_of(&self, word: &Word) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Like [`index_of()`](Corpus::index_of()), but missing words are an error.
    pub fn require(&self, word: &Word) -> Result<usize, WordError> {
        self.index_of(word)
            .ok_or_else(|| WordError::NotInCorpus(word.to_string()))
    }

    /// Returns true if `word` is in the corpus.
    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(word)
    }

    /// Returns the words in order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Iterates over the words in order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> + '_ {
        self.words.iter()
    }
}

impl std::ops::Index<usize> for Corpus {
    type Output = Word;

    fn index(&self, index: usize) -> &Self::Output {
        &self.words[index]
    }
}
