#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use crate::error::TemplateError;

/// A sorted character set; each character's position is its class index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    chars: BTreeSet<char>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    pub fn index_of(&self, c: char) -> Option<usize> {
        if !self.chars.contains(&c) {
            return None;
        }
        Some(self.chars.range(..c).count())
    }

    pub fn union(&mut self, other: &Alphabet) {
        self.chars.extend(other.chars.iter().copied());
    }

    /// Maps each character of `text` to its index.
    pub fn encode(&self, text: &str) -> Result<Vec<usize>, TemplateError> {
        let sorted: Vec<char> = self.chars().collect();
        text.chars()
            .map(|c| {
                sorted
                    .binary_search(&c)
                    .map_err(|_| TemplateError::OutOfAlphabet { character: c })
            })
            .collect()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

impl Extend<char> for Alphabet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.chars.extend(iter);
    }
}
