//! Regular expressions compiled to automata.
//!
//! ```
//! use regalg::{Minimization, regex};
//!
//! let digits = regex::compile_with("[0-9]+(\\.[0-9]+)?", Minimization::Hopcroft)?;
//! assert!(digits.accepts("3.14"));
//! assert!(!digits.accepts("3."));
//! # Ok::<(), regalg::AutomatonError>(())
//! ```

pub mod ast;
mod compile;
mod parser;

pub use compile::{compile, compile_with};
pub use parser::{NEST_LIMIT, REPEAT_LIMIT, parse};
