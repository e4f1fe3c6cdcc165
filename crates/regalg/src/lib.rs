//! Finite-automaton construction and regular-language algebra.
//!
//! Automata are built from primitives ([`builders`]) or regular expressions
//! ([`regex::compile`]), combined with algebraic operators, minimized to a
//! canonical form and rendered as Graphviz DOT.
//!
//! ```
//! use regalg::{Alphabet, Minimization, builders};
//!
//! let alphabet = Alphabet::from("_0123456789abcdefghijklmnopqrstuvwxyz");
//! let first = builders::char_set("_abcdefghijklmnopqrstuvwxyz".chars());
//! let rest = builders::from_alphabet(&alphabet);
//! let identifiers = first.concatenate(&rest.star());
//! let keywords = builders::string_union(["if", "then", "else"]);
//!
//! let mut names = identifiers.difference(&keywords, &alphabet)?;
//! names.minimize(Minimization::Hopcroft)?;
//! assert!(names.accepts("x"));
//! assert!(names.accepts("if2"));
//! assert!(!names.accepts("if"));
//! # Ok::<(), regalg::AutomatonError>(())
//! ```

pub mod automaton;
pub mod error;
pub mod regex;

pub use automaton::{
    Alphabet, CharRange, Minimization, State, StateGraph, StateId, StateSet, Transition,
    builders, combinators,
};
pub use error::{AlphabetError, AutomatonError, Result, SyntaxErrorKind};
