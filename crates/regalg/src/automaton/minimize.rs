//! DFA minimization.
//!
//! Every algorithm produces the unique minimal partial DFA: unreachable
//! states and states that can never accept are dropped, equivalent states
//! are merged, and the result is renumbered canonically so that two
//! minimized graphs for the same language compare equal.

use super::combinators;
use super::dfa::Dfa;
use super::graph::StateGraph;
use super::state::{StateId, StateSet};
use super::subset_construction::{determinize, determinize_from};
use super::symbol::SymbolId;
use crate::error::{AutomatonError, Result};
use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, debug_span, trace};

/// Which minimization algorithm to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Minimization {
    /// Hopcroft's partition refinement, `O(n log n)` splits.
    #[default]
    Hopcroft,
    /// Moore's iterated signature refinement.
    Moore,
    /// Brzozowski's double reversal.
    Brzozowski,
}

impl Minimization {
    /// Get all valid algorithm names
    pub fn variants() -> &'static [&'static str] {
        &["hopcroft", "moore", "brzozowski"]
    }
}

impl FromStr for Minimization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hopcroft" => Ok(Minimization::Hopcroft),
            "moore" => Ok(Minimization::Moore),
            "brzozowski" => Ok(Minimization::Brzozowski),
            _ => Err(format!("Unknown minimization algorithm: {}", s)),
        }
    }
}

impl fmt::Display for Minimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Minimization::Hopcroft => "hopcroft",
            Minimization::Moore => "moore",
            Minimization::Brzozowski => "brzozowski",
        };
        f.write_str(name)
    }
}

/// Compute the minimal deterministic automaton recognizing the language of
/// `graph`. Nondeterministic input is determinized first.
pub fn minimize(graph: &StateGraph, algorithm: Minimization) -> Result<StateGraph> {
    graph.validate()?;
    let span = debug_span!("minimize", %algorithm, states = graph.num_states());
    let _enter = span.enter();

    let minimal = match algorithm {
        Minimization::Brzozowski => brzozowski(graph),
        Minimization::Hopcroft | Minimization::Moore => {
            let deterministic = if graph.is_deterministic() {
                graph.trimmed(true)
            } else {
                determinize(graph).trimmed(true)
            };
            let dfa = Dfa::from_graph(&deterministic)?;
            let (block_of, num_blocks) = match algorithm {
                Minimization::Moore => moore(&dfa),
                _ => hopcroft(&dfa),
            };
            dfa.quotient(&block_of, num_blocks)
        }
    };

    let minimal = minimal.trimmed(true).canonical();
    if !minimal.is_deterministic() {
        return Err(AutomatonError::invariant(
            "minimization produced a nondeterministic graph",
        ));
    }
    debug!(states = minimal.num_states(), "minimized");
    Ok(minimal)
}

impl StateGraph {
    /// Replace this graph with its minimal equivalent.
    pub fn minimize(&mut self, algorithm: Minimization) -> Result<()> {
        *self = minimize(self, algorithm)?;
        Ok(())
    }

    /// The minimal equivalent of this graph.
    pub fn minimized(&self, algorithm: Minimization) -> Result<StateGraph> {
        minimize(self, algorithm)
    }
}

/// Refine the partition {final, non-final} with Hopcroft's algorithm.
///
/// Returns the block of every state and the number of blocks.
fn hopcroft(dfa: &Dfa) -> (Vec<usize>, usize) {
    let num_states = dfa.num_states() as usize;
    let (finals, non_finals): (Vec<StateId>, Vec<StateId>) =
        (0..dfa.num_states()).partition(|&state| dfa.is_final(state));

    let mut partitions: Vec<Vec<StateId>> = [finals, non_finals]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect();
    let mut block_of = vec![0; num_states];
    for (idx, block) in partitions.iter().enumerate() {
        for &state in block {
            block_of[state as usize] = idx;
        }
    }

    // Worklist of (partition_index, symbol) splitters. Both initial blocks
    // are queued, which keeps the refinement correct for partial DFAs.
    let mut worklist: VecDeque<(usize, SymbolId)> = VecDeque::new();
    for idx in 0..partitions.len() {
        for symbol in 0..dfa.num_symbols() {
            worklist.push_back((idx, symbol));
        }
    }

    let mut marked = StateSet::with_capacity(num_states);
    while let Some((splitter_idx, symbol)) = worklist.pop_front() {
        let predecessors = dfa.predecessors(&partitions[splitter_idx], symbol);
        if predecessors.is_empty() {
            continue;
        }

        // Group predecessors by the block they currently live in.
        let mut touched: IndexMap<usize, usize> = IndexMap::new();
        marked.clear();
        for &state in &predecessors {
            if marked.insert(state) {
                *touched.entry(block_of[state as usize]).or_default() += 1;
            }
        }

        for (part_idx, count) in touched {
            if count == partitions[part_idx].len() {
                continue;
            }
            let (inside, outside): (Vec<StateId>, Vec<StateId>) = partitions[part_idx]
                .iter()
                .partition(|&&state| marked.contains(state));

            // Keep the larger part in place and queue the smaller one.
            let (keep, add) = if inside.len() <= outside.len() {
                (outside, inside)
            } else {
                (inside, outside)
            };
            let new_idx = partitions.len();
            for &state in &add {
                block_of[state as usize] = new_idx;
            }
            trace!(block = part_idx, kept = keep.len(), split = add.len(), "split");
            partitions[part_idx] = keep;
            partitions.push(add);

            for sym in 0..dfa.num_symbols() {
                worklist.push_back((new_idx, sym));
            }
        }
    }

    (block_of, partitions.len())
}

/// Refine by signatures until the number of blocks stops growing.
///
/// A state's signature is its own block together with the blocks of its
/// successors on every symbol class.
fn moore(dfa: &Dfa) -> (Vec<usize>, usize) {
    let num_states = dfa.num_states() as usize;
    let mut block_of: Vec<usize> = (0..dfa.num_states())
        .map(|state| usize::from(dfa.is_final(state)))
        .collect();
    // Count the blocks actually present: with every state accepting (or
    // none) the first partition has a single block.
    let mut num_blocks = [false, true]
        .into_iter()
        .filter(|&accepting| {
            (0..dfa.num_states()).any(|state| dfa.is_final(state) == accepting)
        })
        .count();

    loop {
        let mut signatures: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
        let mut next_block_of = Vec::with_capacity(num_states);
        for state in 0..dfa.num_states() {
            let successors = (0..dfa.num_symbols())
                .map(|symbol| {
                    dfa.transition(state, symbol)
                        .map(|dest| block_of[dest as usize])
                })
                .collect();
            let next_id = signatures.len();
            let block = *signatures
                .entry((block_of[state as usize], successors))
                .or_insert(next_id);
            next_block_of.push(block);
        }

        let next_num_blocks = signatures.len();
        block_of = next_block_of;
        if next_num_blocks == num_blocks {
            break;
        }
        trace!(blocks = next_num_blocks, "refined");
        num_blocks = next_num_blocks;
    }

    (block_of, num_blocks)
}

/// Determinizing the reversal twice yields the minimal DFA.
fn brzozowski(graph: &StateGraph) -> StateGraph {
    let once = determinize_reversed(graph);
    determinize_reversed(&once)
}

/// Subset construction over the mirror image of `graph`, started from its
/// accepting states. The fresh initial state of the reversal never joins a
/// subset.
fn determinize_reversed(graph: &StateGraph) -> StateGraph {
    let accepting: StateSet = graph.accepting_states().collect();
    determinize_from(&combinators::reverse(graph), &accepting)
}
