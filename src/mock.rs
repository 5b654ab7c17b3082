use std::fmt::Display;

use rand::RngCore;

use crate::{Context, Strategy, Word};

/// Ranks a fixed list of words, or the candidates in reverse when none is
/// given.
#[derive(Debug, Clone)]
pub(crate) struct Mock {
    ranking: Option<Vec<&'static str>>,
    openers: &'static [&'static str],
}

impl Mock {
    pub(crate) fn new() -> Self {
        Self {
            ranking: None,
            openers: &[],
        }
    }

    pub(crate) fn ranked(ranking: Vec<&'static str>) -> Self {
        Self {
            ranking: Some(ranking),
            openers: &[],
        }
    }

    pub(crate) fn openers(self, openers: &'static [&'static str]) -> Self {
        Self { openers, ..self }
    }
}

impl Strategy for Mock {
    fn rank(&self, ctx: &Context, candidates: &[usize], _rng: &mut dyn RngCore) -> Vec<usize> {
        match &self.ranking {
            None => candidates.iter().rev().copied().collect(),
            Some(v) => v
                .iter()
                .map(|s| {
                    let word: Word = s.parse().unwrap();
                    ctx.corpus().index_of(&word).unwrap()
                })
                .collect(),
        }
    }

    fn openers(&self) -> &[&'static str] {
        self.openers
    }

    fn version(&self) -> &'static str {
        "1.2.4"
    }
}

impl Display for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mock {:?}", self.ranking)
    }
}
