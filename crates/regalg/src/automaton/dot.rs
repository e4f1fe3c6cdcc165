//! Graphviz DOT rendering.

use super::graph::StateGraph;
use super::symbol::CharRange;
use std::fmt::{self, Write};

impl StateGraph {
    /// Emit a Graphviz DOT representation of the automaton.
    pub fn to_dot(&self) -> String {
        let mut buffer = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dot(&mut buffer);
        buffer
    }

    /// Write the DOT representation into `buffer`.
    ///
    /// Accepting states are drawn with a double outline; edges are labelled
    /// with their character range and epsilon edges are dashed.
    pub fn write_dot(&self, buffer: &mut impl Write) -> fmt::Result {
        writeln!(buffer, "digraph Automaton {{")?;
        writeln!(buffer, "  rankdir = LR;")?;
        writeln!(buffer, "  initial [shape=plaintext,label=\"\"];")?;
        writeln!(buffer, "  initial -> {}", self.initial())?;
        for (id, state) in self.states() {
            let shape = if state.accepting {
                "doublecircle"
            } else {
                "circle"
            };
            writeln!(buffer, "  {id} [shape={shape},label=\"{id}\"];")?;
            for transition in &state.transitions {
                writeln!(
                    buffer,
                    "  {id} -> {} [label=\"{}\"]",
                    transition.target,
                    range_label(transition.range)
                )?;
            }
            for target in &state.epsilons {
                writeln!(buffer, "  {id} -> {target} [label=\"ε\",style=dashed]")?;
            }
        }
        writeln!(buffer, "}}")
    }
}

/// Label text for a range: `c` or `lo-hi`, escaped for a quoted DOT string.
pub fn range_label(range: CharRange) -> String {
    let mut label = String::new();
    push_char(&mut label, range.lo);
    if range.lo != range.hi {
        label.push('-');
        push_char(&mut label, range.hi);
    }
    label
}

fn push_char(label: &mut String, c: char) {
    match c {
        '"' => label.push_str("\\\""),
        '\\' => label.push_str("\\\\"),
        '[' | ']' | '(' | ')' => {
            label.push_str("\\\\");
            label.push(c);
        }
        ' ' => label.push_str("\\\\s"),
        '!'..='~' => label.push(c),
        _ => {
            let _ = write!(label, "\\\\u{:04x}", c as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::builders;

    #[test]
    fn test_range_labels() {
        assert_eq!(range_label(CharRange::new('a', 'z').unwrap()), "a-z");
        assert_eq!(range_label(CharRange::single('7')), "7");
        assert_eq!(range_label(CharRange::single('"')), "\\\"");
        assert_eq!(range_label(CharRange::single('\\')), "\\\\");
        assert_eq!(range_label(CharRange::single('[')), "\\\\[");
        assert_eq!(range_label(CharRange::single(' ')), "\\\\s");
        assert_eq!(range_label(CharRange::single('\n')), "\\\\u000a");
        assert_eq!(
            range_label(CharRange::full()),
            "\\\\u0000-\\\\u10ffff"
        );
    }

    #[test]
    fn test_to_dot() {
        let dot = builders::char_range('a', 'c').to_dot();
        let expected = "digraph Automaton {\n  rankdir = LR;\n  initial [shape=plaintext,label=\"\"];\n  initial -> 0\n  0 [shape=circle,label=\"0\"];\n  0 -> 1 [label=\"a-c\"]\n  1 [shape=doublecircle,label=\"1\"];\n}\n";
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_epsilon_edges_are_dashed() {
        let graph = builders::string("x").star();
        let dot = graph.to_dot();
        assert!(dot.contains("[label=\"ε\",style=dashed]"));
        assert!(dot.contains("0 [shape=doublecircle,label=\"0\"];"));
    }
}
