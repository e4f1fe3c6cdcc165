//! Character ranges labelling transitions.

use std::fmt;

/// Index of a symbol class in a [`Dfa`](super::dfa::Dfa) table.
pub type SymbolId = u32;

/// One past the largest Unicode scalar value.
pub const POINT_LIMIT: u32 = char::MAX as u32 + 1;

const SURROGATE_LO: u32 = 0xD800;
const SURROGATE_HI: u32 = 0xDFFF;

/// An inclusive range of characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharRange {
    pub lo: char,
    pub hi: char,
}

impl CharRange {
    /// Create a range, or `None` when `lo > hi`.
    pub fn new(lo: char, hi: char) -> Option<Self> {
        (lo <= hi).then_some(Self { lo, hi })
    }

    pub fn single(c: char) -> Self {
        Self { lo: c, hi: c }
    }

    /// Every Unicode scalar value.
    pub fn full() -> Self {
        Self {
            lo: '\0',
            hi: char::MAX,
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.lo <= c && c <= self.hi
    }

    /// The overlap of two ranges, if any.
    pub fn intersect(&self, other: &CharRange) -> Option<CharRange> {
        CharRange::new(self.lo.max(other.lo), self.hi.min(other.hi))
    }

    /// Check if `other` starts right after this range ends.
    pub fn precedes(&self, other: &CharRange) -> bool {
        self.end_point() == other.lo as u32 || next_char(self.hi) == Some(other.lo)
    }

    /// The range as half-open code point bounds `[start, end)`.
    pub fn points(&self) -> (u32, u32) {
        (self.lo as u32, self.end_point())
    }

    fn end_point(&self) -> u32 {
        self.hi as u32 + 1
    }

    /// Build a range from inclusive code point bounds, trimming surrogates.
    ///
    /// Returns `None` if no scalar value lies within the bounds.
    pub fn from_points(lo: u32, hi: u32) -> Option<Self> {
        let lo = if (SURROGATE_LO..=SURROGATE_HI).contains(&lo) {
            SURROGATE_HI + 1
        } else {
            lo
        };
        let hi = if (SURROGATE_LO..=SURROGATE_HI).contains(&hi) {
            SURROGATE_LO - 1
        } else {
            hi.min(char::MAX as u32)
        };
        if lo > hi {
            return None;
        }
        CharRange::new(char::from_u32(lo)?, char::from_u32(hi)?)
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lo == self.hi {
            write!(f, "{:?}", self.lo)
        } else {
            write!(f, "{:?}-{:?}", self.lo, self.hi)
        }
    }
}

/// The scalar value following `c`, skipping the surrogate block.
pub fn next_char(c: char) -> Option<char> {
    match c as u32 {
        0xD7FF => Some('\u{E000}'),
        n => char::from_u32(n + 1),
    }
}

/// Sorted, deduplicated boundaries of `ranges`: every start, and every end + 1.
///
/// Consecutive points delimit intervals on which every range is either fully
/// present or fully absent.
pub fn start_points<'a>(ranges: impl IntoIterator<Item = &'a CharRange>) -> Vec<u32> {
    let mut points = Vec::new();
    for range in ranges {
        let (start, end) = range.points();
        points.push(start);
        points.push(end);
    }
    points.sort_unstable();
    points.dedup();
    points
}

/// The intervals between consecutive `points`, as character ranges.
pub fn intervals(points: &[u32]) -> impl Iterator<Item = CharRange> + '_ {
    points
        .windows(2)
        .filter_map(|pair| CharRange::from_points(pair[0], pair[1] - 1))
}

/// Sort `ranges` and merge overlapping or adjacent ones.
pub fn normalize(ranges: &mut Vec<CharRange>) {
    ranges.sort_unstable();
    let mut merged: Vec<CharRange> = Vec::with_capacity(ranges.len());
    for range in ranges.drain(..) {
        match merged.last_mut() {
            Some(last) if range.lo <= last.hi || last.precedes(&range) => {
                last.hi = last.hi.max(range.hi);
            }
            _ => merged.push(range),
        }
    }
    *ranges = merged;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect() {
        let az = CharRange::new('a', 'z').unwrap();
        let digits_to_f = CharRange::new('0', 'f').unwrap();
        assert_eq!(az.intersect(&digits_to_f), CharRange::new('a', 'f'));
        assert_eq!(az.intersect(&CharRange::single('A')), None);
    }

    #[test]
    fn test_from_points_trims_surrogates() {
        let range = CharRange::from_points(0xD000, 0xE005).unwrap();
        assert_eq!(range.lo, '\u{D000}');
        assert_eq!(range.hi, '\u{E005}');

        let trimmed = CharRange::from_points(0xD800, 0xE001).unwrap();
        assert_eq!(trimmed.lo, '\u{E000}');

        assert_eq!(CharRange::from_points(0xD800, 0xDFFF), None);
    }

    #[test]
    fn test_precedes_across_surrogates() {
        let below = CharRange::new('a', '\u{D7FF}').unwrap();
        let above = CharRange::single('\u{E000}');
        assert!(below.precedes(&above));
        assert!(CharRange::single('a').precedes(&CharRange::single('b')));
        assert!(!CharRange::single('a').precedes(&CharRange::single('c')));
    }

    #[test]
    fn test_start_points_and_intervals() {
        let ranges = [
            CharRange::new('a', 'z').unwrap(),
            CharRange::new('m', 'p').unwrap(),
        ];
        let points = start_points(&ranges);
        assert_eq!(
            points,
            vec!['a' as u32, 'm' as u32, 'q' as u32, 'z' as u32 + 1]
        );
        let parts: Vec<CharRange> = intervals(&points).collect();
        assert_eq!(
            parts,
            vec![
                CharRange::new('a', 'l').unwrap(),
                CharRange::new('m', 'p').unwrap(),
                CharRange::new('q', 'z').unwrap(),
            ]
        );
    }

    #[test]
    fn test_normalize_merges_adjacent() {
        let mut ranges = vec![
            CharRange::single('c'),
            CharRange::new('a', 'b').unwrap(),
            CharRange::new('x', 'z').unwrap(),
            CharRange::new('y', 'y').unwrap(),
        ];
        normalize(&mut ranges);
        assert_eq!(
            ranges,
            vec![
                CharRange::new('a', 'c').unwrap(),
                CharRange::new('x', 'z').unwrap(),
            ]
        );
    }
}
