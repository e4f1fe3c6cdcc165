//! Finite automata over character ranges.
//!
//! This module provides:
//! - [`StateGraph`], the arena-based automaton used by every construction
//! - primitive automata ([`builders`])
//! - concatenation, union, repetition, intersection, complement and difference
//! - subset construction (NFA to DFA conversion)
//! - Hopcroft, Moore and Brzozowski minimization
//! - Graphviz DOT rendering

pub mod alphabet;
pub mod builders;
pub mod combinators;
pub mod dfa;
mod dot;
mod graph;
pub mod minimize;
mod state;
mod subset_construction;
pub mod symbol;

pub use alphabet::Alphabet;
pub use dot::range_label;
pub use graph::{State, StateGraph, Transition};
pub use minimize::Minimization;
pub use state::{StateId, StateSet};
pub use subset_construction::{determinize, determinize_from};
pub use symbol::{CharRange, SymbolId};
