//! State handles and state sets.

use fixedbitset::FixedBitSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Index of a state in a [`StateGraph`](super::StateGraph) arena.
pub type StateId = u32;

/// A set of states as a bit per state, grown on demand.
///
/// Equality and hashing look only at the members, never at the capacity, so
/// sets built for graphs of different sizes still compare by content and a
/// set can key the subset table directly.
#[derive(Clone, Default)]
pub struct StateSet(FixedBitSet);

impl StateSet {
    /// An empty set with room for states `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        StateSet(FixedBitSet::with_capacity(capacity))
    }

    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = StateSet::with_capacity(capacity.max(state as usize + 1));
        set.0.insert(state as usize);
        set
    }

    /// Add `state`; `false` if it was already a member.
    pub fn insert(&mut self, state: StateId) -> bool {
        let bit = state as usize;
        if bit >= self.0.len() {
            self.0.grow(bit + 1);
        }
        !self.0.put(bit)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.0.contains(state as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_clear()
    }

    pub fn len(&self) -> usize {
        self.0.count_ones(..)
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.ones().map(|bit| bit as StateId)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for member in self.iter() {
            member.hash(state);
        }
        self.len().hash(state);
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for member in iter {
            self.insert(member);
        }
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = StateSet::default();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_insert_grows_on_demand() {
        let mut set = StateSet::with_capacity(4);
        assert!(set.is_empty());
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.insert(9));
        assert_eq!(set.len(), 2);
        assert!(set.contains(9));
        assert!(!set.contains(4));
        assert!(!set.contains(100));
        assert_eq!(set.to_vec(), vec![3, 9]);
    }

    #[test]
    fn test_extend_and_clear() {
        let mut set: StateSet = [5, 1].into_iter().collect();
        set.extend([7, 1]);
        assert_eq!(set.to_vec(), vec![1, 5, 7]);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_equality_and_hash_ignore_capacity() {
        let small = StateSet::singleton(2, 3);
        let large = StateSet::singleton(2, 64);
        assert_eq!(small, large);

        let mut seen = HashSet::new();
        seen.insert(small);
        assert!(seen.contains(&large));
        assert!(!seen.contains(&StateSet::singleton(3, 3)));
    }
}
