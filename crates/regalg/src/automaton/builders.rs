//! Primitive automata.

use super::alphabet::Alphabet;
use super::graph::StateGraph;
use super::state::StateId;
use super::symbol::CharRange;
use indexmap::IndexMap;

/// The empty language.
pub fn empty() -> StateGraph {
    StateGraph::new()
}

/// The language containing only the empty string.
pub fn epsilon() -> StateGraph {
    let mut graph = StateGraph::new();
    graph.mark_accepting(graph.initial(), true);
    graph
}

/// Every single character.
pub fn any_char() -> StateGraph {
    single_step([CharRange::full()])
}

/// Every string, `any_char()*`.
pub fn any_string() -> StateGraph {
    let mut graph = epsilon();
    graph.push_transition(graph.initial(), CharRange::full(), graph.initial());
    graph
}

/// A single character.
pub fn char(c: char) -> StateGraph {
    single_step([CharRange::single(c)])
}

/// Any one character of `chars`, with one transition per character.
pub fn char_set(chars: impl IntoIterator<Item = char>) -> StateGraph {
    single_step(chars.into_iter().map(CharRange::single))
}

/// Any one character in `lo..=hi`; the empty language when `lo > hi`.
pub fn char_range(lo: char, hi: char) -> StateGraph {
    match CharRange::new(lo, hi) {
        Some(range) => single_step([range]),
        None => empty(),
    }
}

/// Any one character in any of `ranges`.
pub fn char_ranges(ranges: impl IntoIterator<Item = CharRange>) -> StateGraph {
    single_step(ranges)
}

/// Any one character of the alphabet.
pub fn from_alphabet(alphabet: &Alphabet) -> StateGraph {
    single_step(alphabet.ranges())
}

/// Exactly the string `s`.
pub fn string(s: &str) -> StateGraph {
    let mut graph = StateGraph::new();
    let mut current = graph.initial();
    for c in s.chars() {
        let next = graph.add_state(false);
        graph.push_transition(current, CharRange::single(c), next);
        current = next;
    }
    graph.mark_accepting(current, true);
    graph
}

/// Any of `strings`, built as a trie: strings sharing a prefix share the
/// states spelling it, and a state is accepting where some string ends.
///
/// The trie is deterministic; an empty iterator gives the empty language.
pub fn string_union<I, S>(strings: I) -> StateGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut graph = StateGraph::new();
    let mut children: Vec<IndexMap<char, StateId>> = vec![IndexMap::new()];

    for s in strings {
        let mut current = graph.initial();
        for c in s.as_ref().chars() {
            current = match children[current as usize].get(&c) {
                Some(&next) => next,
                None => {
                    let next = graph.add_state(false);
                    children.push(IndexMap::new());
                    children[current as usize].insert(c, next);
                    graph.push_transition(current, CharRange::single(c), next);
                    next
                }
            };
        }
        graph.mark_accepting(current, true);
    }

    graph
}

/// Two states with one transition per range from the initial state to the
/// accepting one.
fn single_step(ranges: impl IntoIterator<Item = CharRange>) -> StateGraph {
    let mut graph = StateGraph::new();
    let accept = graph.add_state(true);
    for range in ranges {
        graph.push_transition(graph.initial(), range, accept);
    }
    graph
}
