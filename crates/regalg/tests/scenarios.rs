use regalg::{
    Alphabet, AlphabetError, AutomatonError, Minimization, StateGraph, SyntaxErrorKind, builders,
    regex,
};

const KEYWORDS: [&str; 7] = ["if", "then", "else", "let", "in", "true", "false"];
const IDENTIFIER_CHARS: &str = "_0123456789qwertyuiopasdfghjklzxcvbnm";

fn identifiers() -> StateGraph {
    let first = builders::char_set("_qwertyuiopasdfghjklzxcvbnm".chars());
    let rest = builders::char_set(IDENTIFIER_CHARS.chars());
    first.concatenate(&rest.star())
}

#[test]
fn test_keyword_trie_minimizes_to_shared_prefix() {
    let keywords = builders::string_union(["if", "in"])
        .minimized(Minimization::Hopcroft)
        .unwrap();
    assert_eq!(keywords.num_states(), 3);

    let start = keywords.state(keywords.initial());
    assert_eq!(start.transitions.len(), 1);
    let after_i = keywords.state(start.transitions[0].target);
    assert_eq!(after_i.transitions.len(), 2);
    assert!(!after_i.accepting);
    for transition in &after_i.transitions {
        assert!(keywords.is_accepting(transition.target));
    }

    assert!(!keywords.accepts("i"));
    assert!(keywords.accepts("if"));
    assert!(keywords.accepts("in"));
    assert!(!keywords.accepts("it"));
}

#[test]
fn test_identifiers_without_keywords() {
    let alphabet = Alphabet::from(IDENTIFIER_CHARS);
    let keywords = builders::string_union(KEYWORDS);
    let names = identifiers()
        .difference(&keywords, &alphabet)
        .unwrap()
        .minimized(Minimization::Hopcroft)
        .unwrap();

    for keyword in KEYWORDS {
        assert!(!names.accepts(keyword), "{keyword}");
    }
    for name in ["if2", "x", "_", "iff", "letter", "t"] {
        assert!(names.accepts(name), "{name}");
    }
    assert!(!names.accepts("2x"));
    assert!(!names.accepts(""));
}

#[test]
fn test_difference_formulations_agree() {
    let alphabet = Alphabet::from(IDENTIFIER_CHARS);
    let identifiers = identifiers();
    let keywords = builders::string_union(KEYWORDS);

    let direct = identifiers
        .difference(&keywords, &alphabet)
        .unwrap()
        .minimized(Minimization::Hopcroft)
        .unwrap();
    let via_intersection = identifiers
        .difference(&identifiers.intersection(&keywords), &alphabet)
        .unwrap()
        .minimized(Minimization::Hopcroft)
        .unwrap();
    assert_eq!(direct, via_intersection);
}

#[test]
fn test_difference_needs_a_covering_alphabet() {
    let keywords = builders::string_union(KEYWORDS);
    assert_eq!(
        identifiers().difference(&keywords, &Alphabet::new()),
        Err(AutomatonError::Alphabet(AlphabetError::Undeclared))
    );

    let letters_only = Alphabet::from("qwertyuiopasdfghjklzxcvbnm");
    assert!(matches!(
        identifiers().difference(&keywords, &letters_only),
        Err(AutomatonError::Alphabet(AlphabetError::SymbolOutside { .. }))
    ));
}

#[test]
fn test_regex_and_builders_agree() {
    let from_regex = regex::compile_with("[ab][ab]*", Minimization::Hopcroft).unwrap();
    let ab = builders::char_set("ab".chars());
    let from_builders = ab
        .concatenate(&ab.repeat(0, None))
        .minimized(Minimization::Hopcroft)
        .unwrap();
    assert_eq!(from_regex, from_builders);
    assert!(from_regex.is_isomorphic(&from_builders));
}

#[test]
fn test_minimized_regex_dot() {
    let graph = regex::compile_with("ab*", Minimization::Hopcroft).unwrap();
    let expected = "digraph Automaton {\n  rankdir = LR;\n  initial [shape=plaintext,label=\"\"];\n  initial -> 0\n  0 [shape=circle,label=\"0\"];\n  0 -> 1 [label=\"a\"]\n  1 [shape=doublecircle,label=\"1\"];\n  1 -> 1 [label=\"b\"]\n}\n";
    assert_eq!(graph.to_dot(), expected);
}

#[test]
fn test_complement_over_small_alphabet() {
    let alphabet = Alphabet::from("ab");
    let not_ab = regex::compile("ab")
        .unwrap()
        .complement(&alphabet)
        .unwrap();
    assert!(not_ab.accepts(""));
    assert!(not_ab.accepts("ba"));
    assert!(not_ab.accepts("abab"));
    assert!(!not_ab.accepts("ab"));
    // Outside the alphabet the complement reads nothing.
    assert!(!not_ab.accepts("c"));
}

#[test]
fn test_syntax_errors_surface_positions() {
    let error = regex::compile("ab[cd").unwrap_err();
    assert_eq!(error.position(), Some(2));
    assert!(matches!(
        error,
        AutomatonError::Syntax {
            kind: SyntaxErrorKind::UnclosedClass,
            ..
        }
    ));
}
