//! Realizing a syntax tree as an automaton, bottom up.

use super::ast::{Ast, AstKind};
use super::parser::parse;
use crate::automaton::{Alphabet, Minimization, StateGraph, builders, combinators};
use crate::error::Result;
use tracing::debug;

/// Compile `pattern` into an automaton recognizing its language.
///
/// The result is built from the primitive builders and combinators and
/// usually contains epsilon transitions; see [`compile_with`] for a minimal
/// deterministic one.
pub fn compile(pattern: &str) -> Result<StateGraph> {
    let ast = parse(pattern)?;
    let graph = build(&ast);
    debug!(
        pattern,
        nullable = ast.is_nullable(),
        states = graph.num_states(),
        "compiled"
    );
    Ok(graph)
}

/// Compile `pattern` and minimize the result with `algorithm`.
pub fn compile_with(pattern: &str, algorithm: Minimization) -> Result<StateGraph> {
    compile(pattern)?.minimized(algorithm)
}

impl StateGraph {
    /// See [`compile`].
    pub fn from_regex(pattern: &str) -> Result<StateGraph> {
        compile(pattern)
    }
}

fn build(ast: &Ast) -> StateGraph {
    match &ast.kind {
        AstKind::Empty => builders::epsilon(),
        AstKind::Literal(ch) => builders::char(*ch),
        AstKind::AnyChar => builders::any_char(),
        AstKind::Class { negated: false, ranges } => builders::char_ranges(ranges.iter().copied()),
        AstKind::Class { negated: true, ranges } => {
            builders::char_ranges(Alphabet::unicode().uncovered(ranges))
        }
        AstKind::Concat(items) => {
            let parts: Vec<StateGraph> = items.iter().map(build).collect();
            combinators::concatenate_all(&parts)
        }
        AstKind::Alternation(branches) => {
            let parts: Vec<StateGraph> = branches.iter().map(build).collect();
            combinators::union_all(&parts)
        }
        AstKind::Repeat { inner, min, max } => {
            let inner = build(inner);
            match (min, max) {
                (0, None) => combinators::star(&inner),
                (1, None) => combinators::plus(&inner),
                (0, Some(1)) => combinators::optional(&inner),
                _ => combinators::repeat(&inner, *min, *max),
            }
        }
        AstKind::Group(inner) => build(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AutomatonError, SyntaxErrorKind};

    fn check(pattern: &str, accepted: &[&str], rejected: &[&str]) {
        let graph = compile(pattern).unwrap();
        let minimal = compile_with(pattern, Minimization::Hopcroft).unwrap();
        for input in accepted {
            assert!(graph.accepts(input), "{pattern} should accept {input:?}");
            assert!(minimal.accepts(input), "{pattern} should accept {input:?}");
        }
        for input in rejected {
            assert!(!graph.accepts(input), "{pattern} should reject {input:?}");
            assert!(!minimal.accepts(input), "{pattern} should reject {input:?}");
        }
    }

    #[test]
    fn test_contains_ab() {
        check("(a|b)*ab(a|b)*", &["ab", "aab", "abb", "bbab"], &["", "a", "ba", "bba"]);
    }

    #[test]
    fn test_integer_literal() {
        check(
            "[+-]{0,1}(0|[1-9][0-9]*)",
            &["0", "-0", "+7", "42", "-1000"],
            &["", "+", "007", "01", "1a", "+-1"],
        );
    }

    #[test]
    fn test_counted_repetition() {
        check("a{2,3}", &["aa", "aaa"], &["", "a", "aaaa"]);
        check("x{3}", &["xxx"], &["xx", "xxxx"]);
        check("(ab){1,}", &["ab", "abab"], &["", "aba"]);
    }

    #[test]
    fn test_negated_class_and_any_char() {
        check("[^0-9]", &["a", "\u{1F600}", " "], &["5", "", "ab"]);
        check("a.c", &["abc", "a c", "a\u{e9}c"], &["ac", "abbc"]);
    }

    #[test]
    fn test_empty_alternatives() {
        check("a|", &["", "a"], &["aa"]);
        check("()", &[""], &["a"]);
        check("", &[""], &["a"]);
    }

    #[test]
    fn test_escapes_are_literal() {
        check(r"\(\*\)", &["(*)"], &["", "*"]);
        check(r"a\.b", &["a.b"], &["axb"]);
        check(r"\\\n", &["\\\n"], &["\\n"]);
    }

    #[test]
    fn test_minimized_contains_ab_is_small() {
        let minimal = compile_with("(a|b)*ab(a|b)*", Minimization::Moore).unwrap();
        assert_eq!(minimal.num_states(), 3);
        assert!(minimal.is_deterministic());
    }

    #[test]
    fn test_from_regex_reports_errors() {
        let error = StateGraph::from_regex("(a|b").unwrap_err();
        assert_eq!(
            error,
            AutomatonError::syntax(0, SyntaxErrorKind::UnclosedGroup)
        );
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let depth = 10_000;
        let pattern = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        assert!(matches!(
            compile(&pattern),
            Err(AutomatonError::Syntax {
                kind: SyntaxErrorKind::NestingTooDeep,
                ..
            })
        ));
        assert!(compile("((((a))))*").unwrap().accepts("aa"));
    }
}
