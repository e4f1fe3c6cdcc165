//! Closed symbol alphabets.
//!
//! Complement and difference are only defined relative to an explicit,
//! finite alphabet. An [`Alphabet`] is a set of character ranges; it never
//! defaults to "every character" unless built with [`Alphabet::unicode`].

use super::symbol::CharRange;
use crate::error::AlphabetError;
use rangemap::RangeInclusiveSet;

/// A finite set of characters, stored as disjoint ranges of code points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    ranges: RangeInclusiveSet<u32>,
}

impl Alphabet {
    /// An empty (undeclared) alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every Unicode scalar value.
    pub fn unicode() -> Self {
        Self::from_ranges([CharRange::full()])
    }

    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut alphabet = Self::new();
        for c in chars {
            alphabet.insert_char(c);
        }
        alphabet
    }

    pub fn from_ranges(ranges: impl IntoIterator<Item = CharRange>) -> Self {
        let mut alphabet = Self::new();
        for range in ranges {
            alphabet.insert_range(range);
        }
        alphabet
    }

    pub fn insert_char(&mut self, c: char) {
        self.insert_range(CharRange::single(c));
    }

    pub fn insert_range(&mut self, range: CharRange) {
        self.ranges.insert(range.lo as u32..=range.hi as u32);
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.iter().next().is_none()
    }

    pub fn contains(&self, c: char) -> bool {
        self.ranges.contains(&(c as u32))
    }

    /// Check that the alphabet was declared, i.e. is non-empty.
    pub fn require_declared(&self) -> Result<(), AlphabetError> {
        if self.is_empty() {
            Err(AlphabetError::Undeclared)
        } else {
            Ok(())
        }
    }

    /// Check that every character of `input` belongs to the alphabet.
    pub fn check_str(&self, input: &str) -> Result<(), AlphabetError> {
        match input.chars().find(|&c| !self.contains(c)) {
            Some(symbol) => Err(AlphabetError::SymbolOutside { symbol }),
            None => Ok(()),
        }
    }

    /// Check that `range` lies entirely within the alphabet.
    ///
    /// On failure the error names the smallest uncovered character.
    pub fn check_range(&self, range: CharRange) -> Result<(), AlphabetError> {
        let outer = range.lo as u32..=range.hi as u32;
        let first_gap = self
            .ranges
            .gaps(&outer)
            .find_map(|gap| CharRange::from_points(*gap.start(), *gap.end()));
        match first_gap {
            Some(gap) => Err(AlphabetError::SymbolOutside { symbol: gap.lo }),
            None => Ok(()),
        }
    }

    /// The alphabet's ranges in ascending order.
    pub fn ranges(&self) -> impl Iterator<Item = CharRange> + '_ {
        self.ranges
            .iter()
            .filter_map(|range| CharRange::from_points(*range.start(), *range.end()))
    }

    /// The parts of `range` that belong to the alphabet.
    pub fn clip(&self, range: CharRange) -> Vec<CharRange> {
        let outer = range.lo as u32..=range.hi as u32;
        self.ranges
            .overlapping(&outer)
            .filter_map(|part| {
                let lo = (*part.start()).max(*outer.start());
                let hi = (*part.end()).min(*outer.end());
                CharRange::from_points(lo, hi)
            })
            .collect()
    }

    /// The parts of the alphabet not covered by any of `covered`.
    pub fn uncovered<'a>(
        &self,
        covered: impl IntoIterator<Item = &'a CharRange>,
    ) -> Vec<CharRange> {
        let mut rest = self.ranges.clone();
        for range in covered {
            rest.remove(range.lo as u32..=range.hi as u32);
        }
        rest.iter()
            .filter_map(|range| CharRange::from_points(*range.start(), *range.end()))
            .collect()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::from_chars(iter)
    }
}

impl From<&str> for Alphabet {
    fn from(chars: &str) -> Self {
        Self::from_chars(chars.chars())
    }
}
