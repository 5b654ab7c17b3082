//! The feedback codec: grading a guess against a target and converting
//! between grades, wire patterns and compact codes.

use std::{fmt::Display, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{words::Word, WordError, WORD_LEN};

/// The number of distinct feedback codes, `3^5`.
pub const NUM_CODES: usize = 243;

/// A "grade" that indicates the correctness of a letter in a guess.
///
/// The discriminants are the digits used on the wire: `0` for absent, `1`
/// for present and `2` for correct.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Grade {
    /// The letter does not appear in the target (or every copy is spoken for).
    Absent = 0,

    /// The letter is in the target, but not at this position.
    Present = 1,

    /// The letter is in the correct position.
    Correct = 2,
}

impl Grade {
    fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Grade::Absent),
            1 => Some(Grade::Present),
            2 => Some(Grade::Correct),
            _ => None,
        }
    }
}

/// The grades for each letter of a guess, in guess order.
///
/// On the wire a pattern is a five character string over `0`, `1` and `2`,
/// where character `i` describes letter `i` of the guess.
///
/// # Examples
///
/// ```rust
/// use wordly::{Pattern, Word};
///
/// let guess: Word = "crate".parse()?;
/// let target: Word = "trace".parse()?;
/// assert_eq!(Pattern::compute(&guess, &target).to_string(), "12212");
/// #
/// # Ok::<_, wordly::SolverError>(())
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "String", into = "String")
)]
pub struct Pattern([Grade; WORD_LEN]);

impl Pattern {
    /// The pattern of a guess that is the target.
    pub const SOLVED: Pattern = Pattern([Grade::Correct; WORD_LEN]);

    /// Creates a pattern from grades.
    pub fn new(grades: [Grade; WORD_LEN]) -> Self {
        Pattern(grades)
    }

    /// Grades `guess` against `target`.
    ///
    /// Correct letters are marked first. Every target letter that was not
    /// matched in place goes into a pool, and the remaining guess letters
    /// draw from that pool left to right. A letter therefore never receives
    /// more [`Grade::Correct`] and [`Grade::Present`] marks together than it
    /// has copies in the target: guessing `spool` against `sober` marks the
    /// first `o` present and the second absent.
    pub fn compute(guess: &Word, target: &Word) -> Self {
        Pattern(grade(guess.as_bytes(), target.as_bytes()))
    }

    /// Returns the grades in guess order.
    pub fn grades(&self) -> &[Grade; WORD_LEN] {
        &self.0
    }

    /// Encodes the pattern in base 3, first letter most significant.
    pub fn code(&self) -> Code {
        Code(self.0.iter().fold(0_u8, |acc, &g| acc * 3 + g as u8))
    }

    /// Returns true if every letter is correct.
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }
}

impl FromStr for Pattern {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != WORD_LEN {
            return Err(WordError::InvalidPattern(s.to_string()));
        }

        let mut grades = [Grade::Absent; WORD_LEN];
        for (slot, &b) in grades.iter_mut().zip(bytes) {
            *slot = b
                .checked_sub(b'0')
                .and_then(Grade::from_digit)
                .ok_or_else(|| WordError::InvalidPattern(s.to_string()))?;
        }
        Ok(Pattern(grades))
    }
}

impl TryFrom<String> for Pattern {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for grade in self.0 {
            write!(f, "{}", grade as u8)?;
        }
        Ok(())
    }
}

/// A pattern packed into a single byte in `0..243`.
///
/// This is the form stored in the [feedback table](crate::FeedbackTable).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Code(u8);

impl Code {
    /// The code of [`Pattern::SOLVED`].
    pub const SOLVED: Code = Code(NUM_CODES as u8 - 1);

    /// Wraps a raw code, checking that it is in range.
    pub fn new(code: u8) -> Result<Self, WordError> {
        if (code as usize) < NUM_CODES {
            Ok(Code(code))
        } else {
            Err(WordError::InvalidCode(code))
        }
    }

    /// Wraps a byte already known to be in range.
    pub(crate) const fn from_raw(code: u8) -> Self {
        Code(code)
    }

    /// Grades `guess` against `target` straight to a code.
    pub fn compute(guess: &Word, target: &Word) -> Self {
        Pattern::compute(guess, target).code()
    }

    /// Returns the raw byte.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Decodes back into a pattern.
    pub fn pattern(self) -> Pattern {
        let mut grades = [Grade::Absent; WORD_LEN];
        let mut rest = self.0;
        for slot in grades.iter_mut().rev() {
            // in range by construction, so the digit is always 0, 1 or 2
            *slot = Grade::from_digit(rest % 3).unwrap_or(Grade::Absent);
            rest /= 3;
        }
        Pattern(grades)
    }
}

impl From<Pattern> for Code {
    fn from(pattern: Pattern) -> Self {
        pattern.code()
    }
}

impl From<Code> for Pattern {
    fn from(code: Code) -> Self {
        code.pattern()
    }
}

/// The two pass grading shared by [`Pattern::compute`] and the table builder.
pub(crate) fn grade(guess: &[u8; WORD_LEN], target: &[u8; WORD_LEN]) -> [Grade; WORD_LEN] {
    let mut res = [Grade::Absent; WORD_LEN];
    let mut remaining = [0_u8; 26];
    let slot = |c: u8| (c - b'A') as usize;

    // correct letters first, since those get priority
    for i in 0..WORD_LEN {
        if guess[i] == target[i] {
            res[i] = Grade::Correct;
        } else {
            remaining[slot(target[i])] += 1;
        }
    }

    for i in 0..WORD_LEN {
        if res[i] == Grade::Correct {
            continue;
        }
        let count = &mut remaining[slot(guess[i])];
        if *count > 0 {
            *count -= 1;
            res[i] = Grade::Present;
        }
    }

    res
}
