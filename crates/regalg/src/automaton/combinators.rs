//! Algebraic operators over automata.
//!
//! Every operator borrows its operands and builds a fresh graph: the input
//! states are copied with an ID offset, so the result never aliases its
//! inputs and the same sub-automaton can be reused in many expressions.

use super::alphabet::Alphabet;
use super::builders;
use super::graph::{State, StateGraph, Transition};
use super::state::{StateId, StateSet};
use super::subset_construction::determinize;
use crate::error::Result;
use indexmap::IndexMap;
use tracing::debug;

/// Strings made of a word of `a` followed by a word of `b`.
pub fn concatenate(a: &StateGraph, b: &StateGraph) -> StateGraph {
    let mut graph = a.clone();
    let exits: Vec<StateId> = a.accepting_states().collect();
    append(&mut graph, &exits, b, false);
    graph
}

/// Concatenate a sequence of graphs; the empty sequence gives `ε`.
pub fn concatenate_all<'a>(graphs: impl IntoIterator<Item = &'a StateGraph>) -> StateGraph {
    let mut graph = builders::epsilon();
    let mut exits = vec![graph.initial()];
    for part in graphs {
        exits = append(&mut graph, &exits, part, false);
    }
    graph
}

/// Copy `part` into `graph` and link every exit to its initial state.
///
/// Exits stop accepting unless `keep_exits` is set. Returns the accepting
/// states of the copy, which become the next exits.
fn append(
    graph: &mut StateGraph,
    exits: &[StateId],
    part: &StateGraph,
    keep_exits: bool,
) -> Vec<StateId> {
    let offset = graph.absorb(part);
    for &exit in exits {
        if !keep_exits {
            graph.mark_accepting(exit, false);
        }
        graph.push_epsilon(exit, part.initial() + offset);
    }
    part.accepting_states().map(|state| state + offset).collect()
}

/// Strings accepted by `a` or by `b`.
pub fn union(a: &StateGraph, b: &StateGraph) -> StateGraph {
    union_all([a, b])
}

/// Strings accepted by any of the graphs; the empty sequence gives the
/// empty language.
pub fn union_all<'a>(graphs: impl IntoIterator<Item = &'a StateGraph>) -> StateGraph {
    let mut graph = StateGraph::new();
    let initial = graph.initial();
    for member in graphs {
        let offset = graph.absorb(member);
        graph.push_epsilon(initial, member.initial() + offset);
    }
    graph
}

/// Kleene star: zero or more words of `a`.
pub fn star(a: &StateGraph) -> StateGraph {
    let mut graph = builders::epsilon();
    let offset = graph.absorb(a);
    let inner = a.initial() + offset;
    graph.push_epsilon(graph.initial(), inner);
    for state in a.accepting_states() {
        graph.push_epsilon(state + offset, inner);
    }
    graph
}

/// One or more words of `a`.
pub fn plus(a: &StateGraph) -> StateGraph {
    let mut graph = a.clone();
    for state in a.accepting_states() {
        graph.push_epsilon(state, a.initial());
    }
    graph
}

/// Zero or one word of `a`.
pub fn optional(a: &StateGraph) -> StateGraph {
    union(a, &builders::epsilon())
}

/// Between `min` and `max` words of `a`; `max = None` is unbounded.
///
/// `min > max` gives the empty language.
pub fn repeat(a: &StateGraph, min: u32, max: Option<u32>) -> StateGraph {
    if max.is_some_and(|max| max < min) {
        return builders::empty();
    }
    let mut graph = builders::epsilon();
    let mut exits = vec![graph.initial()];
    for _ in 0..min {
        exits = append(&mut graph, &exits, a, false);
    }
    match max {
        None => {
            append(&mut graph, &exits, &star(a), false);
        }
        // a{0,3} is the chain (a(a(a)?)?)?: each optional copy hangs off the
        // accepting states of the previous one.
        Some(max) => {
            for _ in min..max {
                exits = append(&mut graph, &exits, a, true);
            }
        }
    }
    graph
}

/// Product construction: strings accepted by both `a` and `b`.
///
/// States of the result are pairs of states of the epsilon-free operands; a
/// pair moves on the overlap of two ranges and accepts when both halves do.
pub fn intersection(a: &StateGraph, b: &StateGraph) -> StateGraph {
    let a = remove_epsilons(a);
    let b = remove_epsilons(b);

    let mut pairs: IndexMap<(StateId, StateId), StateId> = IndexMap::new();
    let mut graph = StateGraph::new();
    let start = (a.initial(), b.initial());
    pairs.insert(start, graph.initial());
    let accepting = a.is_accepting(start.0) && b.is_accepting(start.1);
    graph.mark_accepting(graph.initial(), accepting);

    let mut worklist = vec![start];
    while let Some((p, q)) = worklist.pop() {
        let current = pairs[&(p, q)];
        for ta in &a.state(p).transitions {
            for tb in &b.state(q).transitions {
                let Some(range) = ta.range.intersect(&tb.range) else {
                    continue;
                };
                let pair = (ta.target, tb.target);
                let next = match pairs.get(&pair) {
                    Some(&existing) => existing,
                    None => {
                        let accepting = a.is_accepting(pair.0) && b.is_accepting(pair.1);
                        let new_state = graph.add_state(accepting);
                        pairs.insert(pair, new_state);
                        worklist.push(pair);
                        new_state
                    }
                };
                graph.push_transition(current, range, next);
            }
        }
    }

    debug!(
        left = a.num_states(),
        right = b.num_states(),
        product = graph.num_states(),
        "intersected"
    );
    graph
}

/// Strings over `alphabet` that `x` rejects.
///
/// `x` is determinized, its transitions are clipped to the alphabet, every
/// missing move goes to a non-accepting sink, and acceptance is flipped.
pub fn complement(x: &StateGraph, alphabet: &Alphabet) -> Result<StateGraph> {
    alphabet.require_declared()?;
    let dfa = if x.is_deterministic() {
        x.clone()
    } else {
        determinize(x)
    };
    let (states, initial) = dfa.into_parts();
    let sink = states.len() as StateId;

    let mut complemented: Vec<State> = states
        .into_iter()
        .map(|state| {
            let mut transitions: Vec<Transition> = state
                .transitions
                .iter()
                .flat_map(|t| {
                    alphabet
                        .clip(t.range)
                        .into_iter()
                        .map(move |range| Transition {
                            range,
                            target: t.target,
                        })
                })
                .collect();
            let covered: Vec<_> = transitions.iter().map(|t| t.range).collect();
            transitions.extend(
                alphabet
                    .uncovered(&covered)
                    .into_iter()
                    .map(|range| Transition { range, target: sink }),
            );
            State {
                accepting: !state.accepting,
                transitions,
                epsilons: Vec::new(),
            }
        })
        .collect();

    complemented.push(State {
        accepting: true,
        transitions: alphabet
            .ranges()
            .map(|range| Transition { range, target: sink })
            .collect(),
        epsilons: Vec::new(),
    });

    Ok(StateGraph::from_parts(complemented, initial))
}

/// Strings accepted by `a` but not by `b`, as `a ∩ complement(b)`.
///
/// Fails if the alphabet is empty or if `a` can read a symbol outside it:
/// the complement is taken relative to the alphabet, so such words would be
/// silently lost.
pub fn difference(a: &StateGraph, b: &StateGraph, alphabet: &Alphabet) -> Result<StateGraph> {
    alphabet.require_declared()?;
    for state in a.reachable_states().iter() {
        for transition in &a.state(state).transitions {
            alphabet.check_range(transition.range)?;
        }
    }
    Ok(intersection(a, &complement(b, alphabet)?))
}

/// The mirror image of `a`: every edge is reversed, the old accepting states
/// become the targets of a new initial state, and the old initial state is
/// the only accepting one.
pub fn reverse(a: &StateGraph) -> StateGraph {
    let mut states: Vec<State> = vec![State::default(); a.num_states() + 1];
    for (source, state) in a.states() {
        for transition in &state.transitions {
            states[transition.target as usize]
                .transitions
                .push(Transition {
                    range: transition.range,
                    target: source,
                });
        }
        for &target in &state.epsilons {
            states[target as usize].epsilons.push(source);
        }
    }

    let initial = a.num_states() as StateId;
    states[initial as usize].epsilons = a.accepting_states().collect();
    states[a.initial() as usize].accepting = true;
    StateGraph::from_parts(states, initial)
}

/// An equivalent graph without epsilon transitions.
///
/// Each state takes over the transitions and acceptance of its epsilon
/// closure; states that become unreachable are dropped.
pub fn remove_epsilons(a: &StateGraph) -> StateGraph {
    if !a.has_epsilons() {
        return a.clone();
    }

    let states = a
        .states()
        .map(|(id, _)| {
            let closure = a.epsilon_closure(&StateSet::singleton(id, a.num_states()));
            let mut transitions: Vec<Transition> = closure
                .iter()
                .flat_map(|member| a.state(member).transitions.iter().copied())
                .collect();
            transitions.sort_unstable();
            transitions.dedup();
            State {
                accepting: closure.iter().any(|member| a.is_accepting(member)),
                transitions,
                epsilons: Vec::new(),
            }
        })
        .collect();

    StateGraph::from_parts(states, a.initial()).trimmed(false)
}

impl StateGraph {
    /// See [`concatenate`].
    pub fn concatenate(&self, other: &StateGraph) -> StateGraph {
        concatenate(self, other)
    }

    /// See [`union`].
    pub fn union(&self, other: &StateGraph) -> StateGraph {
        union(self, other)
    }

    /// See [`star`].
    pub fn star(&self) -> StateGraph {
        star(self)
    }

    pub fn plus(&self) -> StateGraph {
        plus(self)
    }

    pub fn optional(&self) -> StateGraph {
        optional(self)
    }

    /// See [`repeat`].
    pub fn repeat(&self, min: u32, max: Option<u32>) -> StateGraph {
        repeat(self, min, max)
    }

    /// See [`intersection`].
    pub fn intersection(&self, other: &StateGraph) -> StateGraph {
        intersection(self, other)
    }

    /// See [`complement`].
    pub fn complement(&self, alphabet: &Alphabet) -> Result<StateGraph> {
        complement(self, alphabet)
    }

    /// See [`difference`].
    pub fn difference(&self, other: &StateGraph, alphabet: &Alphabet) -> Result<StateGraph> {
        difference(self, other, alphabet)
    }

    pub fn reverse(&self) -> StateGraph {
        reverse(self)
    }

    pub fn remove_epsilons(&self) -> StateGraph {
        remove_epsilons(self)
    }
}
