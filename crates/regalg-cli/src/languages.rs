//! Lexical languages built from the library's primitives: identifiers,
//! keywords, signed integers, and list and tuple literals.

use regalg::{Alphabet, Minimization, Result, StateGraph, builders, combinators, regex};
use std::fmt;

pub const IDENTIFIER_CHARS: &str = "_0123456789qwertyuiopasdfghjklzxcvbnm";
pub const IDENTIFIER_START_CHARS: &str = "_qwertyuiopasdfghjklzxcvbnm";
pub const KEYWORDS: [&str; 7] = ["if", "then", "else", "let", "in", "true", "false"];
pub const INTEGER_PATTERN: &str = "[+-]{0,1}(0|[1-9][0-9]*)";

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    /// A letter or underscore followed by letters, digits and underscores
    Identifiers,
    /// if, then, else, let, in, true, false
    Keywords,
    /// Identifiers that are not keywords
    IdentifiersWithoutKeywords,
    /// Optionally signed decimal integers without leading zeros
    Integer,
    /// `[1; -2; 3]`, integers separated by semicolons
    List,
    /// `(x, 1, [2; 3])`, identifiers, integers and lists separated by commas
    Tuple,
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::Identifiers => "identifiers",
            Language::Keywords => "keywords",
            Language::IdentifiersWithoutKeywords => "identifiers-without-keywords",
            Language::Integer => "integer",
            Language::List => "list",
            Language::Tuple => "tuple",
        }
    }

    /// Build the automaton, minimizing intermediate and final results with
    /// `algorithm` when one is given.
    pub fn build(&self, algorithm: Option<Minimization>) -> Result<StateGraph> {
        let builder = Builder { algorithm };
        match self {
            Language::Identifiers => builder.finish(identifiers()),
            Language::Keywords => builder.finish(keywords()),
            Language::IdentifiersWithoutKeywords => {
                let alphabet = Alphabet::from(IDENTIFIER_CHARS);
                builder.finish(identifiers().difference(&keywords(), &alphabet)?)
            }
            Language::Integer => builder.finish(regex::compile(INTEGER_PATTERN)?),
            Language::List => builder.list(),
            Language::Tuple => builder.tuple(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn identifiers() -> StateGraph {
    let first = builders::char_set(IDENTIFIER_START_CHARS.chars());
    let rest = builders::char_set(IDENTIFIER_CHARS.chars());
    first.concatenate(&rest.star())
}

pub fn keywords() -> StateGraph {
    builders::string_union(KEYWORDS)
}

struct Builder {
    algorithm: Option<Minimization>,
}

impl Builder {
    fn finish(&self, graph: StateGraph) -> Result<StateGraph> {
        match self.algorithm {
            Some(algorithm) => graph.minimized(algorithm),
            None => Ok(graph),
        }
    }

    /// `[` then `item sep item sep ... item` or only spaces, then `]`, with
    /// optional spaces around every item.
    fn delimited(
        &self,
        open: char,
        item: &StateGraph,
        separator: char,
        close: char,
    ) -> Result<StateGraph> {
        let spaces = spaces();
        let items = combinators::concatenate_all([item, &spaces, &builders::char(separator)])
            .star()
            .concatenate(item)
            .union(&spaces);
        self.finish(combinators::concatenate_all([
            &builders::char(open),
            &items,
            &spaces,
            &builders::char(close),
        ]))
    }

    fn spaced_integer(&self) -> Result<StateGraph> {
        self.finish(spaces().concatenate(&regex::compile(INTEGER_PATTERN)?))
    }

    fn list(&self) -> Result<StateGraph> {
        self.delimited('[', &self.spaced_integer()?, ';', ']')
    }

    fn tuple(&self) -> Result<StateGraph> {
        let integer = regex::compile(INTEGER_PATTERN)?;
        let element = self.finish(combinators::union_all([
            &identifiers(),
            &integer,
            &self.list()?,
        ]))?;
        let spaced_element = self.finish(spaces().concatenate(&element))?;
        self.delimited('(', &spaced_element, ',', ')')
    }
}

fn spaces() -> StateGraph {
    builders::char(' ').star()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(language: Language, accepted: &[&str], rejected: &[&str]) {
        for algorithm in [None, Some(Minimization::Hopcroft)] {
            let graph = language.build(algorithm).unwrap();
            for input in accepted {
                assert!(graph.accepts(input), "{language} should accept {input:?}");
            }
            for input in rejected {
                assert!(!graph.accepts(input), "{language} should reject {input:?}");
            }
        }
    }

    #[test]
    fn test_identifiers() {
        check(Language::Identifiers, &["x", "_tmp", "if", "a1_b2"], &["", "1a", "A", "a-b"]);
    }

    #[test]
    fn test_keywords() {
        check(Language::Keywords, &["if", "then", "false"], &["", "i", "iff", "x"]);
    }

    #[test]
    fn test_identifiers_without_keywords() {
        check(
            Language::IdentifiersWithoutKeywords,
            &["x", "if2", "iff", "lettuce", "_"],
            &["if", "true", "let", "in", "", "9"],
        );
    }

    #[test]
    fn test_integer() {
        check(Language::Integer, &["0", "+12", "-7", "1000"], &["", "00", "+", "-01", "1.5"]);
    }

    #[test]
    fn test_list() {
        check(
            Language::List,
            &["[]", "[ ]", "[1]", "[1;2;3]", "[ 1; -2 ;3 ]", "[  +0  ]"],
            &["", "[", "[1;]", "[;]", "[01]", "[1,2]", "[1 2]"],
        );
    }

    #[test]
    fn test_tuple() {
        check(
            Language::Tuple,
            &["()", "( )", "(x)", "(x, 1, [2; 3])", "( [] ,y,-4 )"],
            &["", "(,)", "(1,)", "(x y)", "(007)", "[x]"],
        );
    }

    #[test]
    fn test_minimized_list_is_deterministic() {
        let list = Language::List.build(Some(Minimization::Moore)).unwrap();
        assert!(list.is_deterministic());
        assert_eq!(
            list,
            Language::List.build(Some(Minimization::Hopcroft)).unwrap()
        );
    }

    #[test]
    fn test_language_names() {
        assert_eq!(Language::IdentifiersWithoutKeywords.to_string(), "identifiers-without-keywords");
        assert_eq!(Language::Tuple.name(), "tuple");
    }
}
