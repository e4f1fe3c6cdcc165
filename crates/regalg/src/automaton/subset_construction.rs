//! Subset construction: converting an automaton with epsilons and
//! overlapping ranges into an equivalent deterministic one.

use super::graph::{StateGraph, merge_transitions, state_start_points};
use super::state::{StateId, StateSet};
use super::symbol;
use indexmap::IndexMap;
use tracing::{debug, trace};

/// Convert a graph to a deterministic graph using the powerset construction.
///
/// Each output state stands for the epsilon-closed set of input states
/// reachable by the same input. The character space is split at the
/// boundaries of the member states' transitions, so every interval leads to
/// a single successor set. Sets with no successor get no transition: the
/// result is deterministic but not necessarily total.
pub fn determinize(graph: &StateGraph) -> StateGraph {
    determinize_from(
        graph,
        &StateSet::singleton(graph.initial(), graph.num_states()),
    )
}

/// Subset construction started from the closure of `start` instead of from
/// the initial state of `graph`.
///
/// An empty `start` gives a single non-accepting state.
pub fn determinize_from(graph: &StateGraph, start: &StateSet) -> StateGraph {
    let mut subsets: IndexMap<StateSet, StateId> = IndexMap::new();
    let mut dfa = StateGraph::new();

    let initial_set = graph.epsilon_closure(start);
    dfa.mark_accepting(dfa.initial(), contains_accepting(graph, &initial_set));
    subsets.insert(initial_set, dfa.initial());

    // Subsets are numbered in discovery order, so the index into `subsets`
    // doubles as the worklist cursor.
    let mut next_unprocessed = 0;
    while next_unprocessed < subsets.len() {
        let Some((current_set, &current)) = subsets.get_index(next_unprocessed) else {
            break;
        };
        let current_set = current_set.clone();
        next_unprocessed += 1;

        for interval in symbol::intervals(&state_start_points(graph, &current_set)) {
            // Every transition either covers the whole interval or none of it.
            let reached: StateSet = current_set
                .iter()
                .flat_map(|state| &graph.state(state).transitions)
                .filter(|transition| transition.range.contains(interval.lo))
                .map(|transition| transition.target)
                .collect();
            if reached.is_empty() {
                continue;
            }
            let next_set = graph.epsilon_closure(&reached);

            let next = match subsets.get(&next_set) {
                Some(&existing) => existing,
                None => {
                    let new_state = dfa.add_state(contains_accepting(graph, &next_set));
                    trace!(state = new_state, members = ?next_set, "new subset");
                    subsets.insert(next_set, new_state);
                    new_state
                }
            };
            dfa.push_transition(current, interval, next);
        }
    }

    let (mut states, initial) = dfa.into_parts();
    for state in &mut states {
        state.transitions = merge_transitions(&state.transitions);
    }
    debug!(
        nfa_states = graph.num_states(),
        dfa_states = states.len(),
        "determinized"
    );
    StateGraph::from_parts(states, initial)
}

impl StateGraph {
    /// See [`determinize`].
    pub fn determinize(&self) -> StateGraph {
        determinize(self)
    }
}

fn contains_accepting(graph: &StateGraph, states: &StateSet) -> bool {
    states.iter().any(|state| graph.is_accepting(state))
}
