//! Deterministic transition table over symbol classes.
//!
//! Partition refinement needs to ask "which states reach block B on symbol
//! a?". Characters are grouped into classes: maximal intervals on which no
//! transition of the automaton starts or stops. Every transition range is a
//! union of consecutive classes, so the table is indexed by
//! `(state, class)` instead of by character.

use super::graph::{State, StateGraph, Transition, merge_transitions};
use super::state::{StateId, StateSet};
use super::symbol::{self, CharRange, SymbolId};
use crate::error::{AutomatonError, Result};
use std::collections::HashMap;

/// A deterministic automaton whose symbols are character classes.
#[derive(Debug, Clone)]
pub struct Dfa {
    /// States are `0..num_states`
    num_states: StateId,
    start_state: StateId,
    final_states: StateSet,
    /// Symbol class ranges, indexed by `SymbolId`
    classes: Vec<CharRange>,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, SymbolId), StateId>,
    /// Reverse transitions: (destination, symbol) -> sources
    reverse_transitions: HashMap<(StateId, SymbolId), Vec<StateId>>,
}

impl Dfa {
    /// Build the class table of a deterministic graph.
    pub fn from_graph(graph: &StateGraph) -> Result<Self> {
        graph.validate()?;
        if !graph.is_deterministic() {
            return Err(AutomatonError::invariant(
                "class table requires a deterministic graph",
            ));
        }

        let points = symbol::start_points(
            graph
                .states()
                .flat_map(|(_, state)| state.transitions.iter().map(|t| &t.range)),
        );
        let classes: Vec<CharRange> = symbol::intervals(&points)
            .filter(|class| {
                graph.states().any(|(_, state)| {
                    state.transitions.iter().any(|t| t.range.contains(class.lo))
                })
            })
            .collect();

        let mut dfa = Dfa {
            num_states: graph.num_states() as StateId,
            start_state: graph.initial(),
            final_states: graph.accepting_states().collect(),
            classes,
            transitions: HashMap::new(),
            reverse_transitions: HashMap::new(),
        };

        for (source, state) in graph.states() {
            for transition in &state.transitions {
                let first = dfa
                    .classes
                    .partition_point(|class| class.lo < transition.range.lo);
                for id in first..dfa.classes.len() {
                    if dfa.classes[id].lo > transition.range.hi {
                        break;
                    }
                    dfa.add_transition(source, id as SymbolId, transition.target);
                }
            }
        }

        Ok(dfa)
    }

    fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.transitions.insert((source, symbol), destination);
        self.reverse_transitions
            .entry((destination, symbol))
            .or_default()
            .push(source);
    }

    /// The successor of `source` on `symbol`, if any.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn num_symbols(&self) -> SymbolId {
        self.classes.len() as SymbolId
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// The character range of a symbol class.
    pub fn class(&self, symbol: SymbolId) -> CharRange {
        self.classes[symbol as usize]
    }

    /// Find all states that move into `targets` on `symbol`.
    pub fn predecessors<'a>(
        &'a self,
        targets: impl IntoIterator<Item = &'a StateId>,
        symbol: SymbolId,
    ) -> Vec<StateId> {
        let mut predecessors = Vec::new();
        for target in targets {
            if let Some(sources) = self.reverse_transitions.get(&(*target, symbol)) {
                predecessors.extend(sources.iter().copied());
            }
        }
        predecessors
    }

    /// Collapse every block of equivalent states into one state.
    ///
    /// `block_of[s]` is the block of state `s`; blocks are numbered
    /// `0..num_blocks`.
    pub fn quotient(&self, block_of: &[usize], num_blocks: usize) -> StateGraph {
        let mut representatives: Vec<Option<StateId>> = vec![None; num_blocks];
        for state in 0..self.num_states {
            representatives[block_of[state as usize]].get_or_insert(state);
        }

        let states = representatives
            .iter()
            .map(|representative| {
                let Some(rep) = *representative else {
                    return State::default();
                };
                let transitions: Vec<Transition> = (0..self.num_symbols())
                    .filter_map(|symbol| {
                        self.transition(rep, symbol).map(|dest| Transition {
                            range: self.class(symbol),
                            target: block_of[dest as usize] as StateId,
                        })
                    })
                    .collect();
                State {
                    accepting: self.is_final(rep),
                    transitions: merge_transitions(&transitions),
                    epsilons: Vec::new(),
                }
            })
            .collect();

        StateGraph::from_parts(states, block_of[self.start_state as usize] as StateId)
    }
}
