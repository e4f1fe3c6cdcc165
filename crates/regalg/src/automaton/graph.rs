//! The automaton representation shared by every construction.
//!
//! A [`StateGraph`] is an arena of states indexed by [`StateId`]. Each state
//! carries an accepting flag, labelled transitions on character ranges and
//! unlabelled (epsilon) successors. The same type holds nondeterministic
//! intermediate results and deterministic / minimal automata; the
//! deterministic form simply has no epsilons and disjoint ranges per state.

use super::alphabet::Alphabet;
use super::state::{StateId, StateSet};
use super::symbol::{self, CharRange};
use crate::error::{AutomatonError, Result};
use std::collections::VecDeque;

/// A labelled edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition {
    pub range: CharRange,
    pub target: StateId,
}

/// One state of a [`StateGraph`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct State {
    pub accepting: bool,
    pub transitions: Vec<Transition>,
    pub epsilons: Vec<StateId>,
}

/// A finite automaton over characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateGraph {
    states: Vec<State>,
    initial: StateId,
}

impl StateGraph {
    /// Create a graph with a single non-accepting initial state (the empty language).
    pub fn new() -> Self {
        Self {
            states: vec![State::default()],
            initial: 0,
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self, accepting: bool) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(State {
            accepting,
            ..State::default()
        });
        id
    }

    pub fn set_initial(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        self.initial = state;
        Ok(())
    }

    pub fn set_accepting(&mut self, state: StateId, accepting: bool) -> Result<()> {
        self.check_state(state)?;
        self.mark_accepting(state, accepting);
        Ok(())
    }

    /// Add a transition on every character of `range`.
    ///
    /// Both ends must already be states of this graph.
    pub fn add_transition(
        &mut self,
        source: StateId,
        range: CharRange,
        target: StateId,
    ) -> Result<()> {
        self.check_state(source)?;
        self.check_state(target)?;
        self.push_transition(source, range, target);
        Ok(())
    }

    /// Add an epsilon transition from source to target.
    pub fn add_epsilon(&mut self, source: StateId, target: StateId) -> Result<()> {
        self.check_state(source)?;
        self.check_state(target)?;
        self.push_epsilon(source, target);
        Ok(())
    }

    fn check_state(&self, state: StateId) -> Result<()> {
        if (state as usize) < self.states.len() {
            Ok(())
        } else {
            Err(AutomatonError::invariant(format!(
                "state {state} does not exist in a graph of {} states",
                self.states.len()
            )))
        }
    }

    pub(crate) fn mark_accepting(&mut self, state: StateId, accepting: bool) {
        self.states[state as usize].accepting = accepting;
    }

    pub(crate) fn push_transition(&mut self, source: StateId, range: CharRange, target: StateId) {
        self.states[source as usize]
            .transitions
            .push(Transition { range, target });
    }

    pub(crate) fn push_epsilon(&mut self, source: StateId, target: StateId) {
        self.states[source as usize].epsilons.push(target);
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn state(&self, state: StateId) -> &State {
        &self.states[state as usize]
    }

    /// All states with their IDs.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(id, state)| (id as StateId, state))
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Number of labelled transitions, epsilons excluded.
    pub fn num_transitions(&self) -> usize {
        self.states.iter().map(|state| state.transitions.len()).sum()
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states[state as usize].accepting
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states()
            .filter(|(_, state)| state.accepting)
            .map(|(id, _)| id)
    }

    pub fn has_epsilons(&self) -> bool {
        self.states.iter().any(|state| !state.epsilons.is_empty())
    }

    /// Check that no state has epsilons or overlapping transition ranges.
    pub fn is_deterministic(&self) -> bool {
        self.states.iter().all(|state| {
            if !state.epsilons.is_empty() {
                return false;
            }
            let mut ranges: Vec<CharRange> =
                state.transitions.iter().map(|t| t.range).collect();
            ranges.sort_unstable();
            ranges.windows(2).all(|pair| pair[0].hi < pair[1].lo)
        })
    }

    /// Every character used on some transition.
    pub fn symbols(&self) -> Alphabet {
        Alphabet::from_ranges(
            self.states
                .iter()
                .flat_map(|state| state.transitions.iter().map(|t| t.range)),
        )
    }

    /// Check the structural invariants: the initial state exists and every
    /// edge targets an existing state.
    pub fn validate(&self) -> Result<()> {
        let len = self.states.len() as StateId;
        if self.initial >= len {
            return Err(AutomatonError::invariant(format!(
                "initial state {} does not exist in a graph of {} states",
                self.initial, len
            )));
        }
        for (id, state) in self.states() {
            let targets = state
                .transitions
                .iter()
                .map(|t| t.target)
                .chain(state.epsilons.iter().copied());
            for target in targets {
                if target >= len {
                    return Err(AutomatonError::invariant(format!(
                        "state {id} has an edge to missing state {target}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Compute the epsilon closure of a set of states using DFS.
    ///
    /// Members that are not states of this graph are skipped.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let len = self.states.len() as StateId;
        let mut stack: Vec<StateId> = states.iter().filter(|&s| s < len).collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }
            for &dest in &self.states[s as usize].epsilons {
                if !closure.contains(dest) {
                    stack.push(dest);
                }
            }
        }

        closure
    }

    /// The epsilon-closed set of states reached from `states` on `c`.
    pub fn step(&self, states: &StateSet, c: char) -> StateSet {
        let mut reached = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            let Some(state) = self.states.get(state as usize) else {
                continue;
            };
            for transition in &state.transitions {
                if transition.range.contains(c) {
                    reached.insert(transition.target);
                }
            }
        }
        self.epsilon_closure(&reached)
    }

    /// Check whether the automaton accepts `input`.
    pub fn accepts(&self, input: &str) -> bool {
        self.accepts_chars(input.chars())
    }

    /// Simulate the automaton on a sequence of characters, tracking the set
    /// of active states.
    pub fn accepts_chars(&self, input: impl IntoIterator<Item = char>) -> bool {
        if self.validate().is_err() {
            return false;
        }
        let mut active =
            self.epsilon_closure(&StateSet::singleton(self.initial, self.states.len()));
        for c in input {
            active = self.step(&active, c);
            if active.is_empty() {
                return false;
            }
        }
        active.iter().any(|state| self.is_accepting(state))
    }

    /// Find all states reachable from the initial state.
    pub fn reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.states.len());
        if self.initial as usize >= self.states.len() {
            return reachable;
        }
        let mut stack = vec![self.initial];
        while let Some(state) = stack.pop() {
            if !reachable.insert(state) {
                continue;
            }
            let state = &self.states[state as usize];
            for next in state
                .transitions
                .iter()
                .map(|t| t.target)
                .chain(state.epsilons.iter().copied())
            {
                if !reachable.contains(next) {
                    stack.push(next);
                }
            }
        }
        reachable
    }

    /// Find all states from which some accepting state is reachable.
    pub fn live_states(&self) -> StateSet {
        let mut predecessors: Vec<Vec<StateId>> = vec![Vec::new(); self.states.len()];
        for (id, state) in self.states() {
            for next in state
                .transitions
                .iter()
                .map(|t| t.target)
                .chain(state.epsilons.iter().copied())
            {
                predecessors[next as usize].push(id);
            }
        }

        let mut live = StateSet::with_capacity(self.states.len());
        let mut queue: VecDeque<StateId> = self.accepting_states().collect();
        while let Some(state) = queue.pop_front() {
            if !live.insert(state) {
                continue;
            }
            for &prev in &predecessors[state as usize] {
                if !live.contains(prev) {
                    queue.push_back(prev);
                }
            }
        }
        live
    }

    /// Check if the graph accepts no string at all.
    pub fn is_empty_language(&self) -> bool {
        !self
            .reachable_states()
            .iter()
            .any(|state| self.is_accepting(state))
    }

    /// Keep only states that are reachable and, when `live_only`, that can
    /// still reach an accepting state. The initial state is always kept and
    /// renumbered to 0.
    pub fn trimmed(&self, live_only: bool) -> StateGraph {
        let reachable = self.reachable_states();
        let live = live_only.then(|| self.live_states());
        let keep = |state: StateId| {
            state == self.initial
                || (reachable.contains(state) && live.as_ref().is_none_or(|l| l.contains(state)))
        };

        let mut renumber: Vec<Option<StateId>> = vec![None; self.states.len()];
        let mut order = vec![self.initial];
        order.extend(reachable.iter().filter(|&s| s != self.initial && keep(s)));
        for (new_id, &old_id) in order.iter().enumerate() {
            renumber[old_id as usize] = Some(new_id as StateId);
        }

        let states = order
            .iter()
            .map(|&old_id| {
                let state = &self.states[old_id as usize];
                State {
                    accepting: state.accepting,
                    transitions: state
                        .transitions
                        .iter()
                        .filter_map(|t| {
                            renumber[t.target as usize].map(|target| Transition {
                                range: t.range,
                                target,
                            })
                        })
                        .collect(),
                    epsilons: state
                        .epsilons
                        .iter()
                        .filter_map(|&e| renumber[e as usize])
                        .collect(),
                }
            })
            .collect();

        StateGraph { states, initial: 0 }
    }

    /// Renumber states in breadth-first order from the initial state.
    ///
    /// Transitions are sorted by range and adjacent ranges leading to the
    /// same target are merged, so two minimal automata for the same language
    /// have equal canonical forms. Unreachable states are dropped.
    pub fn canonical(&self) -> StateGraph {
        let mut renumber: Vec<Option<StateId>> = vec![None; self.states.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        renumber[self.initial as usize] = Some(0);
        order.push(self.initial);
        queue.push_back(self.initial);

        let mut sorted: Vec<Vec<Transition>> = Vec::with_capacity(self.states.len());
        for state in &self.states {
            sorted.push(merge_transitions(&state.transitions));
        }

        while let Some(old_id) = queue.pop_front() {
            let state = &self.states[old_id as usize];
            let mut epsilons = state.epsilons.clone();
            epsilons.sort_unstable();
            let successors = sorted[old_id as usize]
                .iter()
                .map(|t| t.target)
                .chain(epsilons);
            for next in successors {
                if renumber[next as usize].is_none() {
                    renumber[next as usize] = Some(order.len() as StateId);
                    order.push(next);
                    queue.push_back(next);
                }
            }
        }

        let lookup = |id: StateId| renumber[id as usize].unwrap_or_default();
        let states = order
            .iter()
            .map(|&old_id| {
                let state = &self.states[old_id as usize];
                let mut transitions: Vec<Transition> = sorted[old_id as usize]
                    .iter()
                    .map(|t| Transition {
                        range: t.range,
                        target: lookup(t.target),
                    })
                    .collect();
                transitions.sort_unstable();
                let mut epsilons: Vec<StateId> =
                    state.epsilons.iter().map(|&e| lookup(e)).collect();
                epsilons.sort_unstable();
                epsilons.dedup();
                State {
                    accepting: state.accepting,
                    transitions,
                    epsilons,
                }
            })
            .collect();

        StateGraph { states, initial: 0 }
    }

    /// Check whether two graphs are equal up to state renumbering.
    ///
    /// For minimized graphs this is language equality.
    pub fn is_isomorphic(&self, other: &StateGraph) -> bool {
        self.canonical() == other.canonical()
    }

    /// Copy every state of `other` into this graph, returning the ID offset
    /// applied to `other`'s states.
    pub(crate) fn absorb(&mut self, other: &StateGraph) -> StateId {
        let offset = self.states.len() as StateId;
        self.states.extend(other.states.iter().map(|state| State {
            accepting: state.accepting,
            transitions: state
                .transitions
                .iter()
                .map(|t| Transition {
                    range: t.range,
                    target: t.target + offset,
                })
                .collect(),
            epsilons: state.epsilons.iter().map(|&e| e + offset).collect(),
        }));
        offset
    }

    pub(crate) fn from_parts(states: Vec<State>, initial: StateId) -> Self {
        Self { states, initial }
    }

    pub(crate) fn into_parts(self) -> (Vec<State>, StateId) {
        (self.states, self.initial)
    }
}

impl Default for StateGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort transitions, drop duplicates and merge adjacent ranges that share a
/// target.
pub(crate) fn merge_transitions(transitions: &[Transition]) -> Vec<Transition> {
    let mut sorted = transitions.to_vec();
    sorted.sort_unstable_by_key(|t| (t.target, t.range));
    sorted.dedup();

    let mut merged: Vec<Transition> = Vec::with_capacity(sorted.len());
    for transition in sorted {
        match merged.last_mut() {
            Some(last)
                if last.target == transition.target
                    && (transition.range.lo <= last.range.hi
                        || last.range.precedes(&transition.range)) =>
            {
                last.range.hi = last.range.hi.max(transition.range.hi);
            }
            _ => merged.push(transition),
        }
    }
    merged.sort_unstable_by_key(|t| (t.range, t.target));
    merged
}

/// Boundaries of every transition leaving any of `states`.
pub(crate) fn state_start_points(graph: &StateGraph, states: &StateSet) -> Vec<u32> {
    symbol::start_points(
        states
            .iter()
            .flat_map(|s| graph.state(s).transitions.iter().map(|t| &t.range)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lo: char, hi: char) -> CharRange {
        CharRange::new(lo, hi).unwrap()
    }

    // 0 -a-> 1 -ε-> 2(final), 0 -b-> 3
    fn sample() -> StateGraph {
        let mut graph = StateGraph::new();
        let s1 = graph.add_state(false);
        let s2 = graph.add_state(true);
        let s3 = graph.add_state(false);
        graph.add_transition(0, CharRange::single('a'), s1).unwrap();
        graph.add_epsilon(s1, s2).unwrap();
        graph.add_transition(0, CharRange::single('b'), s3).unwrap();
        graph
    }

    #[test]
    fn test_new_graph_is_empty_language() {
        let graph = StateGraph::new();
        assert_eq!(graph.num_states(), 1);
        assert!(graph.is_empty_language());
        assert!(!graph.accepts(""));
    }

    #[test]
    fn test_accepts_follows_epsilons() {
        let graph = sample();
        assert!(graph.accepts("a"));
        assert!(!graph.accepts("b"));
        assert!(!graph.accepts("ab"));
        assert!(!graph.accepts(""));
        assert!(!graph.accepts("z"));
    }

    #[test]
    fn test_epsilon_closure() {
        let mut graph = StateGraph::new();
        let s1 = graph.add_state(false);
        let s2 = graph.add_state(false);
        graph.add_epsilon(0, s1).unwrap();
        graph.add_epsilon(s1, s2).unwrap();
        graph.add_epsilon(s2, 0).unwrap();

        let closure = graph.epsilon_closure(&StateSet::singleton(0, 3));
        assert_eq!(closure.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_reachable_and_live_states() {
        let mut graph = sample();
        let orphan = graph.add_state(true);

        let reachable = graph.reachable_states();
        assert_eq!(reachable.to_vec(), vec![0, 1, 2, 3]);
        assert!(!reachable.contains(orphan));

        let live = graph.live_states();
        assert!(live.contains(0));
        assert!(live.contains(orphan));
        assert!(!live.contains(3));
        assert!(!graph.is_empty_language());
    }

    #[test]
    fn test_trimmed_drops_dead_and_unreachable() {
        let mut graph = sample();
        graph.add_state(true);
        let trimmed = graph.trimmed(true);
        assert_eq!(trimmed.num_states(), 3);
        assert!(trimmed.accepts("a"));
        assert!(!trimmed.accepts("b"));
    }

    #[test]
    fn test_is_deterministic() {
        let mut graph = StateGraph::new();
        let s1 = graph.add_state(true);
        graph.add_transition(0, range('a', 'f'), s1).unwrap();
        graph.add_transition(0, range('g', 'z'), 0).unwrap();
        assert!(graph.is_deterministic());

        graph.add_transition(0, range('c', 'c'), 0).unwrap();
        assert!(!graph.is_deterministic());
        assert!(!sample().is_deterministic());
    }

    #[test]
    fn test_mutators_reject_missing_states() {
        let mut graph = StateGraph::new();
        let s1 = graph.add_state(true);
        for result in [
            graph.set_initial(5),
            graph.set_accepting(2, true),
            graph.add_transition(0, CharRange::single('a'), 5),
            graph.add_transition(7, CharRange::single('a'), s1),
            graph.add_epsilon(s1, 9),
        ] {
            assert!(matches!(result, Err(AutomatonError::InvariantViolation { .. })));
        }

        // Nothing was changed by the rejected calls.
        assert_eq!(graph.initial(), 0);
        assert_eq!(graph.num_states(), 2);
        assert_eq!(graph.num_transitions(), 0);
        assert!(graph.validate().is_ok());
        assert!(graph.determinize().is_empty_language());
        assert!(graph.is_isomorphic(&StateGraph::new()));
    }

    #[test]
    fn test_validate_reports_dangling_target() {
        let dangling = State {
            accepting: false,
            transitions: vec![Transition {
                range: CharRange::single('a'),
                target: 5,
            }],
            epsilons: Vec::new(),
        };
        let graph = StateGraph::from_parts(vec![dangling], 0);
        let error = graph.validate().unwrap_err();
        assert!(matches!(error, AutomatonError::InvariantViolation { .. }));
        assert!(!graph.accepts("a"));

        let graph = StateGraph::from_parts(vec![State::default()], 3);
        assert!(graph.validate().is_err());
        assert!(!graph.accepts(""));
    }

    #[test]
    fn test_foreign_members_are_skipped() {
        let graph = sample();
        let foreign: StateSet = [0, 40].into_iter().collect();
        assert_eq!(graph.epsilon_closure(&foreign).to_vec(), vec![0]);
        assert_eq!(graph.step(&foreign, 'a').to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_canonical_merges_adjacent_ranges() {
        let mut split = StateGraph::new();
        let done = split.add_state(true);
        split.add_transition(0, range('d', 'f'), done).unwrap();
        split.add_transition(0, range('a', 'c'), done).unwrap();

        let mut whole = StateGraph::new();
        whole.add_state(false);
        let done = whole.add_state(true);
        whole.add_transition(0, range('a', 'f'), done).unwrap();

        assert!(split.is_isomorphic(&whole));
        assert_eq!(split.canonical().state(0).transitions.len(), 1);
    }

    #[test]
    fn test_symbols() {
        let symbols = sample().symbols();
        assert!(symbols.contains('a'));
        assert!(symbols.contains('b'));
        assert!(!symbols.contains('c'));
    }
}
